use std::collections::BTreeMap;

use fdq_common::{ProviderId, Result};

use crate::handle::{
    ColumnHandle, ColumnHandleRef, OutputTableHandle, OutputTableHandleRef, TableHandle,
    TableHandleRef,
};
use crate::metadata::{ColumnMetadata, Fragment, TableMetadata};
use crate::name::{SchemaTableName, SchemaTablePrefix};

/// Metadata abstraction every connector implements.
///
/// Implementations are backend-specific (for example in-memory, parquet
/// directories, remote warehouses). The engine resolves names here during
/// planning and carries the returned opaque handles through the rest of the
/// query lifecycle.
///
/// Calls must be safe to issue concurrently from multiple planner threads.
/// Discovery methods (`list_*`) describe a snapshot and never fail on absent
/// names; point resolution distinguishes "not found" (an `Option`) from
/// handle misuse (an error).
pub trait MetadataProvider: Send + Sync {
    /// Identity stamped into every handle this provider mints.
    fn provider_id(&self) -> ProviderId;

    /// All schema names known to the connector, sorted.
    fn list_schema_names(&self) -> Vec<String>;

    /// All table names, optionally restricted to one schema, sorted.
    ///
    /// A schema the connector does not know yields an empty listing, not an
    /// error.
    fn list_tables(&self, schema: Option<&str>) -> Vec<SchemaTableName>;

    /// Column metadata for every table matching `prefix`.
    ///
    /// Tables the prefix does not match, and prefixes matching nothing,
    /// simply produce fewer (or no) entries.
    fn list_table_columns(
        &self,
        prefix: &SchemaTablePrefix,
    ) -> BTreeMap<SchemaTableName, Vec<ColumnMetadata>>;

    /// Resolves a name to a table handle, or `None` if no such table exists.
    fn table_handle(&self, name: &SchemaTableName) -> Option<TableHandleRef>;

    /// Full metadata for a resolved table.
    ///
    /// # Errors
    /// Returns an error if `handle` was minted by another provider or no
    /// longer refers to a live table.
    fn table_metadata(&self, handle: &dyn TableHandle) -> Result<TableMetadata>;

    /// Resolves one column of a resolved table by name.
    ///
    /// Returns `Ok(None)` when the table exists but has no such column.
    ///
    /// # Errors
    /// Returns an error if `handle` is foreign or stale.
    fn column_handle(
        &self,
        handle: &dyn TableHandle,
        column: &str,
    ) -> Result<Option<ColumnHandleRef>>;

    /// Handles for every column of a resolved table, keyed by column name.
    ///
    /// # Errors
    /// Returns an error if `handle` is foreign or stale.
    fn column_handles(&self, handle: &dyn TableHandle) -> Result<BTreeMap<String, ColumnHandleRef>>;

    /// Metadata for one previously resolved column.
    ///
    /// # Errors
    /// Returns an error if either handle is foreign or stale, or if `column`
    /// does not belong to `table`.
    fn column_metadata(
        &self,
        table: &dyn TableHandle,
        column: &dyn ColumnHandle,
    ) -> Result<ColumnMetadata>;

    /// Handle for the table's sample-weight column, or `Ok(None)` if the
    /// table is not sampled.
    ///
    /// # Errors
    /// Returns an error if `handle` is foreign or stale.
    fn sample_weight_column_handle(
        &self,
        handle: &dyn TableHandle,
    ) -> Result<Option<ColumnHandleRef>>;

    /// Whether this connector accepts sampled tables (tables declaring a
    /// sample-weight column) in `create_table` and `begin_create_table`.
    fn can_create_sampled_tables(&self) -> bool;

    /// Creates a table immediately, without a staging transaction.
    ///
    /// The table is visible to discovery and resolution as soon as this
    /// returns.
    ///
    /// # Errors
    /// Returns an error if the metadata is invalid for this connector, the
    /// target schema refuses writes, or the name is already taken.
    fn create_table(&self, metadata: &TableMetadata) -> Result<TableHandleRef>;

    /// Drops an existing table.
    ///
    /// # Errors
    /// Returns an error if `handle` is foreign or stale, or if the table is
    /// protected from dropping.
    fn drop_table(&self, handle: &dyn TableHandle) -> Result<()>;

    /// Starts a staged create-table transaction.
    ///
    /// The table stays invisible to discovery and resolution until
    /// [`commit_create_table`](Self::commit_create_table) succeeds.
    ///
    /// # Errors
    /// Returns an error if the metadata is invalid for this connector, the
    /// target schema refuses writes, or the name is already taken by a
    /// committed table.
    fn begin_create_table(&self, metadata: &TableMetadata) -> Result<OutputTableHandleRef>;

    /// Commits a staged create-table transaction, publishing the table
    /// atomically together with the writer `fragments`.
    ///
    /// # Errors
    /// Returns an error if `handle` is foreign, refers to a transaction this
    /// provider no longer holds as pending, or loses a naming race to a
    /// table committed in the meantime.
    fn commit_create_table(
        &self,
        handle: &dyn OutputTableHandle,
        fragments: Vec<Fragment>,
    ) -> Result<()>;
}
