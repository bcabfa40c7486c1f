//! External bundle providers consulted before any source is read.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::{BoxError, Bundle, BundleError, Locale};

/// Supplies ready-made bundles, bypassing the [`BundleLoader`](crate::BundleLoader).
///
/// Providers are asked in registration order whenever a bundle is not cached.
/// Returning `Ok(None)` declines; errors and panics are logged and treated as
/// declining, so a faulty provider never blocks source-based resolution.
///
/// # Examples
///
/// ```
/// use locale_bundle::{BoxError, Bundle, BundleProvider, Locale};
///
/// struct Nothing;
///
/// impl BundleProvider for Nothing {
///     fn supports(&self, name: &str) -> bool {
///         name == "generated"
///     }
///
///     fn supply(&self, _name: &str, _locale: &Locale) -> Result<Option<Bundle>, BoxError> {
///         Ok(None)
///     }
/// }
///
/// assert!(Nothing.supports("generated"));
/// ```
pub trait BundleProvider: Send + Sync {
    /// Label used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Returns `true` when the provider may answer for bundle `name`.
    fn supports(&self, name: &str) -> bool;

    /// Supplies the bundle `name` for `locale`, or `None` to decline.
    ///
    /// # Errors
    ///
    /// Any error is logged by the [`Bundler`](crate::Bundler) and treated as
    /// declining.
    fn supply(&self, name: &str, locale: &Locale) -> Result<Option<Bundle>, BoxError>;
}

/// Asks `provider` for a bundle, containing failures.
pub(super) fn consult(provider: &dyn BundleProvider, name: &str, locale: &Locale) -> Option<Bundle> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        if provider.supports(name) {
            provider.supply(name, locale)
        } else {
            Ok(None)
        }
    }));
    let failure = match outcome {
        Ok(Ok(Some(bundle))) if !bundle.is_empty() => {
            debug!(provider = provider.name(), bundle = name, locale = %locale, "provider supplied bundle");
            return Some(bundle);
        }
        Ok(Ok(_)) => return None,
        Ok(Err(err)) => BundleError::provider(provider.name(), err.to_string()),
        Err(payload) => BundleError::provider(provider.name(), panic_message(payload.as_ref())),
    };
    warn!(bundle = name, locale = %locale, error = %failure, "ignoring failed bundle provider");
    None
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|text| (*text).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panicked".to_owned())
}
