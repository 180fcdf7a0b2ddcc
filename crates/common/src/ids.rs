//! Typed identifiers shared across connector implementations.
//!
//! Provider, table, and transaction ids are allocated from process-wide
//! atomic counters so no two instances ever share an id. Handle validation
//! leans on that: a dropped-and-recreated table gets a fresh [`TableId`],
//! which is what makes handles resolved against the old table stale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PROVIDER_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_TRANSACTION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one metadata provider instance within this process.
///
/// Every issued handle is stamped with the issuing provider id; presenting a
/// handle to any other provider instance fails handle validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderId(
    /// Raw numeric id value.
    pub u64,
);

impl ProviderId {
    /// Allocates the next process-unique provider id.
    pub fn next() -> Self {
        Self(NEXT_PROVIDER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one created table; never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(
    /// Raw numeric id value.
    pub u64,
);

impl TableId {
    /// Allocates the next process-unique table id.
    pub fn next() -> Self {
        Self(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one in-flight create-table transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(
    /// Raw numeric id value.
    pub u64,
);

impl TransactionId {
    /// Allocates the next process-unique transaction id.
    pub fn next() -> Self {
        Self(NEXT_TRANSACTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotone catalog-state version.
///
/// Bumped on every successful catalog mutation. Handles snapshot the
/// generation of the entry they were resolved against; a column handle is
/// valid only together with a table handle of the same generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogGeneration(
    /// Raw numeric generation value.
    pub u64,
);

impl CatalogGeneration {
    /// Generation of an empty, never-mutated catalog.
    pub const ZERO: Self = Self(0);

    /// Returns the following generation.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for CatalogGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
