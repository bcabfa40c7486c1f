//! Extensions for mapping errors to `BundleResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting external error types into the crate's
//! `BundleResult<T>` alias (`Result<T, Arc<BundleError>>`).
//!
//! # Examples
//!
//! ```
//! use locale_bundle::{BundleResult, BundleResultExt};
//!
//! fn extract() -> BundleResult<u64> {
//!     // figment::Error implements Into<BundleError>
//!     figment::Figment::new().extract_inner::<u64>("cache.ttl_secs").into_bundle()
//! }
//! assert!(extract().is_err());
//! ```

use crate::BundleError;
use std::sync::Arc;

/// Result alias used throughout the crate.
///
/// Errors are shared behind [`Arc`] so a single failure can be logged, cached
/// in diagnostics, and returned without cloning the underlying source.
pub type BundleResult<T> = Result<T, Arc<BundleError>>;

/// Generic extension for mapping any `Result<T, E>` with `E: Into<BundleError>`
/// into a `BundleResult<T>`.
pub trait BundleResultExt<T, E> {
    /// Convert `Result<T, E>` into `BundleResult<T>` using `Into<BundleError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<BundleError>`.
    fn into_bundle(self) -> BundleResult<T>;
}

impl<T, E> BundleResultExt<T, E> for Result<T, E>
where
    E: Into<BundleError>,
{
    fn into_bundle(self) -> BundleResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
