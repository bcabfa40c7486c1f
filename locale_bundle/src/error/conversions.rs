//! Trait-based conversions between external error types and `BundleError`.

use figment::Error as FigmentError;

use super::BundleError;

impl From<FigmentError> for BundleError {
    fn from(e: FigmentError) -> Self {
        Self::config(e)
    }
}

impl From<BundleError> for FigmentError {
    /// Allow using `?` in tests that return `figment::Error`.
    fn from(e: BundleError) -> Self {
        match e {
            BundleError::Config(fe) => *fe,
            other => Self::from(other.to_string()),
        }
    }
}
