//! Shared error types, typed identifiers, and observability primitives for FDQ crates.
//!
//! Architecture role:
//! - provides the common [`FdqError`] / [`Result`] contracts
//! - defines process-unique identity types for providers, tables, and
//!   create-table transactions
//! - hosts the prometheus metrics registry used by connector implementations
//!
//! Key modules:
//! - [`error`]
//! - [`ids`]
//! - [`metrics`]

pub mod error;
pub mod ids;
pub mod metrics;

pub use error::{FdqError, Result};
pub use ids::*;
pub use metrics::MetricsRegistry;
