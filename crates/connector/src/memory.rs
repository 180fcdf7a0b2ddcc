//! In-memory reference connector.
//!
//! The whole catalog lives behind one `RwLock`, which is where the
//! atomicity guarantees come from: every SPI call observes the state either
//! before a mutation or after it, never a half-applied one. Used as the
//! fixture connector in tests and as the template for real backends.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use arrow_schema::DataType;
use fdq_common::metrics::global_metrics;
use fdq_common::{
    CatalogGeneration, FdqError, MetricsRegistry, ProviderId, Result, TableId, TransactionId,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::handle::{
    ColumnHandle, ColumnHandleRef, OutputTableHandle, OutputTableHandleRef, TableHandle,
    TableHandleRef,
};
use crate::metadata::{ColumnMetadata, Fragment, TableMetadata};
use crate::name::{SchemaTableName, SchemaTablePrefix};
use crate::provider::MetadataProvider;

/// Tuning knobs for [`MemoryConnector`].
#[derive(Debug, Clone)]
pub struct MemoryConnectorConfig {
    /// Whether tables declaring a sample-weight column may be created.
    pub supports_sampled_tables: bool,
    /// Schemas whose tables refuse `drop_table`.
    pub protected_schemas: Vec<String>,
    /// Maximum simultaneously pending create-table transactions. 0 disables
    /// the cap.
    pub max_pending_creates: usize,
    /// Schemas visible before any table is created in them.
    pub schemas: Vec<String>,
}

impl Default for MemoryConnectorConfig {
    fn default() -> Self {
        Self {
            supports_sampled_tables: true,
            protected_schemas: Vec::new(),
            max_pending_creates: 0,
            schemas: Vec::new(),
        }
    }
}

/// Lifecycle of one staged create-table transaction.
#[derive(Debug, Clone)]
enum CreateState {
    /// `begin_create_table` ran; staged metadata held, table not yet visible.
    Pending(TableMetadata),
    /// `commit_create_table` published the table under its target name.
    Committed,
    /// Transaction abandoned before commit; staged metadata discarded.
    Aborted,
}

#[derive(Debug, Clone)]
struct TableEntry {
    id: TableId,
    generation: CatalogGeneration,
    metadata: TableMetadata,
    fragments: Vec<Fragment>,
}

#[derive(Debug)]
struct CatalogState {
    generation: CatalogGeneration,
    tables: BTreeMap<SchemaTableName, TableEntry>,
    declared_schemas: BTreeSet<String>,
    pending: HashMap<TransactionId, CreateState>,
}

impl CatalogState {
    fn pending_count(&self) -> usize {
        self.pending
            .values()
            .filter(|s| matches!(s, CreateState::Pending(_)))
            .count()
    }
}

#[derive(Debug)]
struct MemoryTableHandle {
    provider: ProviderId,
    table: SchemaTableName,
    id: TableId,
    generation: CatalogGeneration,
}

impl TableHandle for MemoryTableHandle {
    fn provider_id(&self) -> ProviderId {
        self.provider
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct MemoryColumnHandle {
    provider: ProviderId,
    table_id: TableId,
    generation: CatalogGeneration,
    name: String,
    ordinal: usize,
}

impl ColumnHandle for MemoryColumnHandle {
    fn provider_id(&self) -> ProviderId {
        self.provider
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct MemoryOutputTableHandle {
    provider: ProviderId,
    txn: TransactionId,
    table: SchemaTableName,
}

impl OutputTableHandle for MemoryOutputTableHandle {
    fn provider_id(&self) -> ProviderId {
        self.provider
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Seed document accepted by [`MemoryConnector::load_from_json`].
#[derive(Debug, Deserialize)]
struct CatalogSeed {
    /// Extra schemas to declare beyond those implied by `tables`.
    #[serde(default)]
    schemas: Vec<String>,
    /// Tables to create, validated like any `create_table` call.
    #[serde(default)]
    tables: Vec<TableMetadata>,
}

/// Metadata provider backed entirely by process memory.
#[derive(Debug)]
pub struct MemoryConnector {
    provider_id: ProviderId,
    provider_label: String,
    config: MemoryConnectorConfig,
    state: RwLock<CatalogState>,
    metrics: MetricsRegistry,
}

impl MemoryConnector {
    pub fn new(config: MemoryConnectorConfig) -> Self {
        Self::with_metrics(config, global_metrics().clone())
    }

    /// Builds a connector reporting into an explicit metrics registry
    /// instead of the process-global one.
    pub fn with_metrics(config: MemoryConnectorConfig, metrics: MetricsRegistry) -> Self {
        let provider_id = ProviderId::next();
        let declared_schemas: BTreeSet<String> =
            config.schemas.iter().map(|s| s.to_lowercase()).collect();
        Self {
            provider_id,
            provider_label: format!("memory-{provider_id}"),
            config,
            state: RwLock::new(CatalogState {
                generation: CatalogGeneration::ZERO,
                tables: BTreeMap::new(),
                declared_schemas,
                pending: HashMap::new(),
            }),
            metrics,
        }
    }

    /// Metrics registry this connector reports into.
    #[must_use]
    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Number of create-table transactions currently pending.
    #[must_use]
    pub fn pending_create_count(&self) -> usize {
        self.read_state().pending_count()
    }

    /// Abandons a pending create-table transaction, discarding its staged
    /// metadata and freeing its slot under the pending cap.
    ///
    /// # Errors
    /// Returns an error if `handle` is foreign or its transaction already
    /// committed or aborted.
    pub fn abort_create_table(&self, handle: &dyn OutputTableHandle) -> Result<()> {
        let result = self.abort_create_table_inner(handle);
        self.record_mutation("abort_create_table", result.is_ok());
        result
    }

    /// Seeds the catalog from a JSON file on disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or its contents fail
    /// [`load_from_json_str`](Self::load_from_json_str).
    pub fn load_from_json(&self, path: &str) -> Result<()> {
        let text = fs::read_to_string(path)?;
        self.load_from_json_str(&text)?;
        info!(
            path = %path,
            provider_id = %self.provider_id,
            operator = "MemoryConnectorSeed",
            "loaded catalog seed"
        );
        Ok(())
    }

    /// Seeds the catalog from a JSON document of the shape
    /// `{"schemas": [...], "tables": [...]}`; both keys are optional.
    ///
    /// Every listed table goes through the same validation as
    /// `create_table`, so a bad entry aborts the load with earlier entries
    /// already applied.
    ///
    /// # Errors
    /// Returns an error on malformed JSON or when any listed table fails
    /// creation.
    pub fn load_from_json_str(&self, json: &str) -> Result<()> {
        let seed: CatalogSeed = serde_json::from_str(json)
            .map_err(|e| FdqError::Connector(format!("invalid catalog seed: {e}")))?;
        {
            let mut state = self.write_state();
            for schema in &seed.schemas {
                state.declared_schemas.insert(schema.to_lowercase());
            }
        }
        for table in &seed.tables {
            self.create_table(table)?;
        }
        Ok(())
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().expect("catalog lock poisoned")
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().expect("catalog lock poisoned")
    }

    fn record_lookup(&self, operation: &str, outcome: &str) {
        self.metrics
            .record_lookup(&self.provider_label, operation, outcome);
    }

    fn record_mutation(&self, operation: &str, ok: bool) {
        let outcome = if ok { "ok" } else { "error" };
        self.metrics
            .record_mutation(&self.provider_label, operation, outcome);
    }

    fn sync_pending_gauge(&self, state: &CatalogState) {
        self.metrics
            .set_pending_create_transactions(&self.provider_label, state.pending_count() as u64);
    }

    fn resolve_table<'a>(&self, handle: &'a dyn TableHandle) -> Result<&'a MemoryTableHandle> {
        if handle.provider_id() != self.provider_id {
            return Err(FdqError::InvalidHandle(format!(
                "table handle from provider {} presented to provider {}",
                handle.provider_id(),
                self.provider_id
            )));
        }
        handle
            .as_any()
            .downcast_ref::<MemoryTableHandle>()
            .ok_or_else(|| {
                FdqError::InvalidHandle("table handle is not a memory connector handle".to_string())
            })
    }

    fn resolve_column<'a>(&self, handle: &'a dyn ColumnHandle) -> Result<&'a MemoryColumnHandle> {
        if handle.provider_id() != self.provider_id {
            return Err(FdqError::InvalidHandle(format!(
                "column handle from provider {} presented to provider {}",
                handle.provider_id(),
                self.provider_id
            )));
        }
        handle
            .as_any()
            .downcast_ref::<MemoryColumnHandle>()
            .ok_or_else(|| {
                FdqError::InvalidHandle(
                    "column handle is not a memory connector handle".to_string(),
                )
            })
    }

    fn resolve_output<'a>(
        &self,
        handle: &'a dyn OutputTableHandle,
    ) -> Result<&'a MemoryOutputTableHandle> {
        if handle.provider_id() != self.provider_id {
            return Err(FdqError::InvalidHandle(format!(
                "output table handle from provider {} presented to provider {}",
                handle.provider_id(),
                self.provider_id
            )));
        }
        handle
            .as_any()
            .downcast_ref::<MemoryOutputTableHandle>()
            .ok_or_else(|| {
                FdqError::InvalidHandle(
                    "output table handle is not a memory connector handle".to_string(),
                )
            })
    }

    /// Finds the live entry a table handle points at, failing if the table
    /// was dropped or replaced since the handle was resolved.
    fn live_entry<'a>(
        state: &'a CatalogState,
        handle: &MemoryTableHandle,
    ) -> Result<&'a TableEntry> {
        let entry = state
            .tables
            .get(&handle.table)
            .ok_or_else(|| stale_handle(handle))?;
        if entry.id != handle.id || entry.generation != handle.generation {
            return Err(stale_handle(handle));
        }
        Ok(entry)
    }

    fn column_handle_for(&self, entry: &TableEntry, ordinal: usize, name: &str) -> ColumnHandleRef {
        Arc::new(MemoryColumnHandle {
            provider: self.provider_id,
            table_id: entry.id,
            generation: entry.generation,
            name: name.to_string(),
            ordinal,
        })
    }

    fn is_protected(&self, schema: &str) -> bool {
        self.config
            .protected_schemas
            .iter()
            .any(|s| s.eq_ignore_ascii_case(schema))
    }

    fn validate_table_metadata(&self, metadata: &TableMetadata) -> Result<()> {
        let table = metadata.table();
        if table.schema().is_empty() || table.table().is_empty() {
            return Err(FdqError::UnsupportedSchema(format!(
                "empty schema or table part in name {table}"
            )));
        }
        if metadata.columns().is_empty() {
            return Err(FdqError::UnsupportedSchema(format!(
                "table {table} declares no columns"
            )));
        }
        let mut seen = BTreeSet::new();
        let mut weight_columns = 0usize;
        for column in metadata.columns() {
            if column.name().is_empty() {
                return Err(FdqError::UnsupportedSchema(format!(
                    "table {table} declares a column with an empty name"
                )));
            }
            if !seen.insert(column.name()) {
                return Err(FdqError::UnsupportedSchema(format!(
                    "table {table} declares column {} more than once",
                    column.name()
                )));
            }
            if !type_supported(column.data_type()) {
                return Err(FdqError::UnsupportedSchema(format!(
                    "column {} of table {table} has unsupported type {:?}",
                    column.name(),
                    column.data_type()
                )));
            }
            if column.is_sample_weight() {
                weight_columns += 1;
                if *column.data_type() != DataType::Int64 {
                    return Err(FdqError::UnsupportedSchema(format!(
                        "sample-weight column {} of table {table} must be Int64, got {:?}",
                        column.name(),
                        column.data_type()
                    )));
                }
            }
        }
        if weight_columns > 1 {
            return Err(FdqError::UnsupportedSchema(format!(
                "table {table} declares {weight_columns} sample-weight columns"
            )));
        }
        if weight_columns == 1 && !self.config.supports_sampled_tables {
            return Err(FdqError::UnsupportedSchema(format!(
                "sampled tables are disabled; table {table} declares a sample-weight column"
            )));
        }
        Ok(())
    }

    fn table_metadata_inner(&self, handle: &dyn TableHandle) -> Result<TableMetadata> {
        let handle = self.resolve_table(handle)?;
        let state = self.read_state();
        let entry = Self::live_entry(&state, handle)?;
        Ok(entry.metadata.clone())
    }

    fn column_handle_inner(
        &self,
        handle: &dyn TableHandle,
        column: &str,
    ) -> Result<Option<ColumnHandleRef>> {
        let handle = self.resolve_table(handle)?;
        let state = self.read_state();
        let entry = Self::live_entry(&state, handle)?;
        let column = column.to_lowercase();
        Ok(entry
            .metadata
            .columns()
            .iter()
            .position(|c| c.name() == column)
            .map(|ordinal| self.column_handle_for(entry, ordinal, &column)))
    }

    fn column_handles_inner(
        &self,
        handle: &dyn TableHandle,
    ) -> Result<BTreeMap<String, ColumnHandleRef>> {
        let handle = self.resolve_table(handle)?;
        let state = self.read_state();
        let entry = Self::live_entry(&state, handle)?;
        Ok(entry
            .metadata
            .columns()
            .iter()
            .enumerate()
            .map(|(ordinal, c)| {
                (
                    c.name().to_string(),
                    self.column_handle_for(entry, ordinal, c.name()),
                )
            })
            .collect())
    }

    fn column_metadata_inner(
        &self,
        table: &dyn TableHandle,
        column: &dyn ColumnHandle,
    ) -> Result<ColumnMetadata> {
        let table = self.resolve_table(table)?;
        let column = self.resolve_column(column)?;
        let state = self.read_state();
        let entry = Self::live_entry(&state, table)?;
        if column.table_id != entry.id || column.generation != entry.generation {
            return Err(FdqError::InvalidHandle(format!(
                "column handle {} does not match table {}",
                column.name, table.table
            )));
        }
        entry
            .metadata
            .columns()
            .get(column.ordinal)
            .filter(|c| c.name() == column.name)
            .cloned()
            .ok_or_else(|| {
                FdqError::InvalidHandle(format!(
                    "column handle {} does not match table {}",
                    column.name, table.table
                ))
            })
    }

    fn sample_weight_column_handle_inner(
        &self,
        handle: &dyn TableHandle,
    ) -> Result<Option<ColumnHandleRef>> {
        let handle = self.resolve_table(handle)?;
        let state = self.read_state();
        let entry = Self::live_entry(&state, handle)?;
        Ok(entry
            .metadata
            .columns()
            .iter()
            .enumerate()
            .find(|(_, c)| c.is_sample_weight())
            .map(|(ordinal, c)| self.column_handle_for(entry, ordinal, c.name())))
    }

    fn create_table_inner(&self, metadata: &TableMetadata) -> Result<TableHandleRef> {
        self.validate_table_metadata(metadata)?;
        let table = metadata.table().clone();
        let mut state = self.write_state();
        if state.tables.contains_key(&table) {
            return Err(FdqError::AlreadyExists(table.to_string()));
        }
        let generation = state.generation.next();
        state.generation = generation;
        let id = TableId::next();
        state.tables.insert(
            table.clone(),
            TableEntry {
                id,
                generation,
                metadata: metadata.clone(),
                fragments: Vec::new(),
            },
        );
        info!(
            table = %table,
            table_id = %id,
            provider_id = %self.provider_id,
            operator = "MemoryConnectorCreateTable",
            "created table"
        );
        Ok(Arc::new(MemoryTableHandle {
            provider: self.provider_id,
            table,
            id,
            generation,
        }))
    }

    fn drop_table_inner(&self, handle: &dyn TableHandle) -> Result<()> {
        let handle = self.resolve_table(handle)?;
        let mut state = self.write_state();
        Self::live_entry(&state, handle)?;
        if self.is_protected(handle.table.schema()) {
            warn!(
                table = %handle.table,
                operator = "MemoryConnectorDropTable",
                "refusing to drop table in protected schema"
            );
            return Err(FdqError::NotDroppable(format!(
                "schema {} is protected",
                handle.table.schema()
            )));
        }
        state.tables.remove(&handle.table);
        state.generation = state.generation.next();
        info!(
            table = %handle.table,
            provider_id = %self.provider_id,
            operator = "MemoryConnectorDropTable",
            "dropped table"
        );
        Ok(())
    }

    fn begin_create_table_inner(&self, metadata: &TableMetadata) -> Result<OutputTableHandleRef> {
        self.validate_table_metadata(metadata)?;
        let table = metadata.table().clone();
        let mut state = self.write_state();
        if state.tables.contains_key(&table) {
            return Err(FdqError::AlreadyExists(table.to_string()));
        }
        if self.config.max_pending_creates != 0
            && state.pending_count() >= self.config.max_pending_creates
        {
            warn!(
                table = %table,
                cap = self.config.max_pending_creates,
                operator = "MemoryConnectorBeginCreateTable",
                "pending create-table cap reached"
            );
            return Err(FdqError::Connector(format!(
                "pending create-table cap of {} reached",
                self.config.max_pending_creates
            )));
        }
        let txn = TransactionId::next();
        state
            .pending
            .insert(txn, CreateState::Pending(metadata.clone()));
        self.sync_pending_gauge(&state);
        debug!(
            table = %table,
            txn = %txn,
            operator = "MemoryConnectorBeginCreateTable",
            "staged create-table transaction"
        );
        Ok(Arc::new(MemoryOutputTableHandle {
            provider: self.provider_id,
            txn,
            table,
        }))
    }

    fn commit_create_table_inner(
        &self,
        handle: &dyn OutputTableHandle,
        fragments: Vec<Fragment>,
    ) -> Result<()> {
        let handle = self.resolve_output(handle)?;
        let mut state = self.write_state();
        let metadata = match state.pending.get(&handle.txn) {
            Some(CreateState::Pending(metadata)) => metadata.clone(),
            Some(CreateState::Committed) => {
                return Err(FdqError::AbandonedTransaction(format!(
                    "transaction {} already committed",
                    handle.txn
                )))
            }
            Some(CreateState::Aborted) => {
                return Err(FdqError::AbandonedTransaction(format!(
                    "transaction {} was aborted",
                    handle.txn
                )))
            }
            None => {
                return Err(FdqError::AbandonedTransaction(format!(
                    "transaction {} is unknown to provider {}",
                    handle.txn, self.provider_id
                )))
            }
        };
        let table = metadata.table().clone();
        // Lost naming race stays pending; commit may be retried later.
        if state.tables.contains_key(&table) {
            return Err(FdqError::AlreadyExists(table.to_string()));
        }
        let fragment_count = fragments.len();
        let generation = state.generation.next();
        state.generation = generation;
        let id = TableId::next();
        state.tables.insert(
            table.clone(),
            TableEntry {
                id,
                generation,
                metadata,
                fragments,
            },
        );
        state.pending.insert(handle.txn, CreateState::Committed);
        self.sync_pending_gauge(&state);
        info!(
            table = %table,
            txn = %handle.txn,
            fragments = fragment_count,
            operator = "MemoryConnectorCommitCreateTable",
            "committed create-table transaction"
        );
        Ok(())
    }

    fn abort_create_table_inner(&self, handle: &dyn OutputTableHandle) -> Result<()> {
        let handle = self.resolve_output(handle)?;
        let mut state = self.write_state();
        match state.pending.get(&handle.txn) {
            Some(CreateState::Pending(_)) => {
                state.pending.insert(handle.txn, CreateState::Aborted);
                self.sync_pending_gauge(&state);
                debug!(
                    table = %handle.table,
                    txn = %handle.txn,
                    operator = "MemoryConnectorAbortCreateTable",
                    "aborted create-table transaction"
                );
                Ok(())
            }
            Some(CreateState::Committed) => Err(FdqError::AbandonedTransaction(format!(
                "transaction {} already committed",
                handle.txn
            ))),
            Some(CreateState::Aborted) => Err(FdqError::AbandonedTransaction(format!(
                "transaction {} was aborted",
                handle.txn
            ))),
            None => Err(FdqError::AbandonedTransaction(format!(
                "transaction {} is unknown to provider {}",
                handle.txn, self.provider_id
            ))),
        }
    }
}

impl Default for MemoryConnector {
    fn default() -> Self {
        Self::new(MemoryConnectorConfig::default())
    }
}

impl MetadataProvider for MemoryConnector {
    fn provider_id(&self) -> ProviderId {
        self.provider_id
    }

    fn list_schema_names(&self) -> Vec<String> {
        let state = self.read_state();
        let mut names = state.declared_schemas.clone();
        names.extend(state.tables.keys().map(|t| t.schema().to_string()));
        names.into_iter().collect()
    }

    fn list_tables(&self, schema: Option<&str>) -> Vec<SchemaTableName> {
        let schema = schema.map(str::to_lowercase);
        self.read_state()
            .tables
            .keys()
            .filter(|name| schema.as_deref().map_or(true, |s| name.schema() == s))
            .cloned()
            .collect()
    }

    fn list_table_columns(
        &self,
        prefix: &SchemaTablePrefix,
    ) -> BTreeMap<SchemaTableName, Vec<ColumnMetadata>> {
        self.read_state()
            .tables
            .iter()
            .filter(|(name, _)| prefix.matches(name))
            .map(|(name, entry)| (name.clone(), entry.metadata.columns().to_vec()))
            .collect()
    }

    fn table_handle(&self, name: &SchemaTableName) -> Option<TableHandleRef> {
        let state = self.read_state();
        match state.tables.get(name) {
            Some(entry) => {
                self.record_lookup("table_handle", "hit");
                Some(Arc::new(MemoryTableHandle {
                    provider: self.provider_id,
                    table: name.clone(),
                    id: entry.id,
                    generation: entry.generation,
                }))
            }
            None => {
                self.record_lookup("table_handle", "miss");
                debug!(
                    table = %name,
                    operator = "MemoryConnectorTableHandle",
                    "table not found"
                );
                None
            }
        }
    }

    fn table_metadata(&self, handle: &dyn TableHandle) -> Result<TableMetadata> {
        let result = self.table_metadata_inner(handle);
        let outcome = if result.is_ok() { "hit" } else { "invalid_handle" };
        self.record_lookup("table_metadata", outcome);
        result
    }

    fn column_handle(
        &self,
        handle: &dyn TableHandle,
        column: &str,
    ) -> Result<Option<ColumnHandleRef>> {
        let result = self.column_handle_inner(handle, column);
        let outcome = match &result {
            Ok(Some(_)) => "hit",
            Ok(None) => "miss",
            Err(_) => "invalid_handle",
        };
        self.record_lookup("column_handle", outcome);
        result
    }

    fn column_handles(&self, handle: &dyn TableHandle) -> Result<BTreeMap<String, ColumnHandleRef>> {
        let result = self.column_handles_inner(handle);
        let outcome = if result.is_ok() { "hit" } else { "invalid_handle" };
        self.record_lookup("column_handles", outcome);
        result
    }

    fn column_metadata(
        &self,
        table: &dyn TableHandle,
        column: &dyn ColumnHandle,
    ) -> Result<ColumnMetadata> {
        let result = self.column_metadata_inner(table, column);
        let outcome = if result.is_ok() { "hit" } else { "invalid_handle" };
        self.record_lookup("column_metadata", outcome);
        result
    }

    fn sample_weight_column_handle(
        &self,
        handle: &dyn TableHandle,
    ) -> Result<Option<ColumnHandleRef>> {
        let result = self.sample_weight_column_handle_inner(handle);
        let outcome = match &result {
            Ok(Some(_)) => "hit",
            Ok(None) => "miss",
            Err(_) => "invalid_handle",
        };
        self.record_lookup("sample_weight_column_handle", outcome);
        result
    }

    fn can_create_sampled_tables(&self) -> bool {
        self.config.supports_sampled_tables
    }

    fn create_table(&self, metadata: &TableMetadata) -> Result<TableHandleRef> {
        let result = self.create_table_inner(metadata);
        self.record_mutation("create_table", result.is_ok());
        result
    }

    fn drop_table(&self, handle: &dyn TableHandle) -> Result<()> {
        let result = self.drop_table_inner(handle);
        self.record_mutation("drop_table", result.is_ok());
        result
    }

    fn begin_create_table(&self, metadata: &TableMetadata) -> Result<OutputTableHandleRef> {
        let result = self.begin_create_table_inner(metadata);
        self.record_mutation("begin_create_table", result.is_ok());
        result
    }

    fn commit_create_table(
        &self,
        handle: &dyn OutputTableHandle,
        fragments: Vec<Fragment>,
    ) -> Result<()> {
        let result = self.commit_create_table_inner(handle, fragments);
        self.record_mutation("commit_create_table", result.is_ok());
        result
    }
}

fn stale_handle(handle: &MemoryTableHandle) -> FdqError {
    FdqError::InvalidHandle(format!("stale table handle for {}", handle.table))
}

fn type_supported(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Boolean
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
            | DataType::Utf8
            | DataType::LargeUtf8
            | DataType::Binary
            | DataType::LargeBinary
            | DataType::Date32
            | DataType::Date64
            | DataType::Timestamp(_, _)
    )
}
