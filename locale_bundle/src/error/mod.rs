//! Error types produced while resolving and decoding message bundles.

mod constructors;
mod conversions;
mod types;

pub use types::{BoxError, BundleError};
