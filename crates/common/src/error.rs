use thiserror::Error;

/// Canonical FDQ error taxonomy used across crates.
///
/// Classification guidance:
/// - [`FdqError::InvalidHandle`]: a handle no longer matches live catalog state
/// - [`FdqError::UnsupportedSchema`]: requested table shape the connector cannot hold
/// - [`FdqError::NotDroppable`]: connector constraint blocks table deletion
/// - [`FdqError::AbandonedTransaction`]: create-table transaction unknown or already finished
/// - [`FdqError::AlreadyExists`]: table-name collision during creation
/// - [`FdqError::Connector`]: backing-store specific failures surfaced through a connector
/// - [`FdqError::Io`]: raw filesystem/network IO failures from std APIs
///
/// "Not found" is deliberately absent: lookups that miss return `Option::None`
/// or an empty collection, never an error.
#[derive(Debug, Error)]
pub enum FdqError {
    /// Handle refers to catalog state that has changed or never existed from
    /// the receiving provider's perspective.
    ///
    /// Examples:
    /// - table dropped or recreated after the handle was resolved
    /// - column handle paired with a table handle from another generation
    /// - handle issued by a different provider instance or connector type
    #[error("invalid handle: {0}")]
    InvalidHandle(String),

    /// Requested table/column shape is incompatible with connector capabilities.
    ///
    /// Examples:
    /// - column type outside the connector's supported set
    /// - duplicate, empty, or malformed identifiers
    /// - sample-weight column requested while sampled tables are unsupported
    #[error("unsupported schema: {0}")]
    UnsupportedSchema(String),

    /// Connector constraint prevents dropping the table (immutability,
    /// protected namespace, in-use state).
    #[error("table not droppable: {0}")]
    NotDroppable(String),

    /// Create-table transaction is unknown, already committed, or aborted;
    /// its output handle must not be used again.
    #[error("abandoned create-table transaction: {0}")]
    AbandonedTransaction(String),

    /// Table name already taken; concurrent same-name creations resolve here.
    #[error("table already exists: {0}")]
    AlreadyExists(String),

    /// Backing-store specific failure (resource caps, transport errors of
    /// remote connectors).
    #[error("connector error: {0}")]
    Connector(String),

    /// Transparent std IO failures.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Standard FDQ result alias.
pub type Result<T> = std::result::Result<T, FdqError>;
