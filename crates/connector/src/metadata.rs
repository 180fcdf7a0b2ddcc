//! Column and table descriptors exchanged across the metadata SPI.

use crate::name::SchemaTableName;
use arrow_schema::DataType;
use serde::{Deserialize, Serialize};

/// Description of a single column: its name, logical type, and whether it
/// carries per-row sample weights.
///
/// Column names are normalized to lowercase on construction, matching
/// [`SchemaTableName`] semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawColumnMetadata")]
pub struct ColumnMetadata {
    name: String,
    data_type: DataType,
    sample_weight: bool,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into().to_lowercase(),
            data_type,
            sample_weight: false,
        }
    }

    /// Marks this column as the table's sample-weight column.
    #[must_use]
    pub fn sample_weight(mut self, sample_weight: bool) -> Self {
        self.sample_weight = sample_weight;
        self
    }

    /// Column name, lowercase.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logical type of the column.
    #[must_use]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// True if this column stores per-row sample weights.
    #[must_use]
    pub fn is_sample_weight(&self) -> bool {
        self.sample_weight
    }
}

#[derive(Deserialize)]
struct RawColumnMetadata {
    name: String,
    data_type: DataType,
    #[serde(default)]
    sample_weight: bool,
}

impl From<RawColumnMetadata> for ColumnMetadata {
    fn from(raw: RawColumnMetadata) -> Self {
        ColumnMetadata::new(raw.name, raw.data_type).sample_weight(raw.sample_weight)
    }
}

/// Full logical description of a table: its name plus ordered columns.
///
/// Column order is meaningful and preserved; it is the order the connector
/// reports columns in and the order `CREATE TABLE` declared them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    table: SchemaTableName,
    columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    pub fn new(table: SchemaTableName, columns: Vec<ColumnMetadata>) -> Self {
        Self { table, columns }
    }

    /// Name of the table this metadata describes.
    #[must_use]
    pub fn table(&self) -> &SchemaTableName {
        &self.table
    }

    /// Columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    /// Looks up a column by lowercase name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// The sample-weight column, if the table declares one.
    #[must_use]
    pub fn sample_weight_column(&self) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.is_sample_weight())
    }
}

/// Opaque completion token produced by writers and drained into
/// [`commit_create_table`](crate::provider::MetadataProvider::commit_create_table).
///
/// The metadata layer never interprets fragment contents; it only counts and
/// stores them against the committed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment(pub String);
