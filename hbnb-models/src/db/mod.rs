//! The `db` module provides the pieces shared by every model: the `Model`
//! trait and the driver-dependent bind-placeholder prefix.

/// The `model` module defines the trait implemented (mostly through the
/// derive macro) by every table-backed entity.
pub mod model;

#[cfg(not(feature = "postgres"))]
pub const PLACEHOLDER: &str = "?";

#[cfg(feature = "postgres")]
pub const PLACEHOLDER: &str = "$";
