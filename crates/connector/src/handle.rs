//! Opaque handle traits connectors hand out for resolved catalog objects.
//!
//! The engine never inspects handle internals. It carries handles between SPI
//! calls and returns them to the provider that minted them, which recovers its
//! concrete type through [`as_any`](TableHandle::as_any) downcasting. The
//! [`provider_id`](TableHandle::provider_id) stamp lets a provider reject
//! handles minted by someone else before attempting the downcast.

use fdq_common::ProviderId;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Resolved reference to an existing table.
pub trait TableHandle: fmt::Debug + Send + Sync {
    /// Provider that minted this handle.
    fn provider_id(&self) -> ProviderId;

    /// Downcast support for the owning provider.
    fn as_any(&self) -> &dyn Any;
}

/// Resolved reference to a column of some table.
pub trait ColumnHandle: fmt::Debug + Send + Sync {
    /// Provider that minted this handle.
    fn provider_id(&self) -> ProviderId;

    /// Downcast support for the owning provider.
    fn as_any(&self) -> &dyn Any;
}

/// Reference to an in-flight create-table transaction.
///
/// Minted by [`begin_create_table`](crate::provider::MetadataProvider::begin_create_table)
/// and consumed by `commit_create_table`; single-use.
pub trait OutputTableHandle: fmt::Debug + Send + Sync {
    /// Provider that minted this handle.
    fn provider_id(&self) -> ProviderId;

    /// Downcast support for the owning provider.
    fn as_any(&self) -> &dyn Any;
}

pub type TableHandleRef = Arc<dyn TableHandle>;
pub type ColumnHandleRef = Arc<dyn ColumnHandle>;
pub type OutputTableHandleRef = Arc<dyn OutputTableHandle>;
