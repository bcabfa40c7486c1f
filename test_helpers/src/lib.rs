//! Test helpers shared across the workspace.
//!
//! [`figment`] wraps `figment::Jail` for configuration tests and
//! [`locale_tree`] writes temporary directories of bundle resources.

pub mod figment;
pub mod locale_tree;
