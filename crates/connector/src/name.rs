//! Stable human-readable table identities used before a handle exists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable `(schema, table)` pair identifying a table by name.
///
/// Both parts are normalized to lowercase on construction; the engine treats
/// SQL identifiers as case-insensitive. Ordering is lexicographic on
/// `(schema, table)` so catalog listings come out deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawSchemaTableName")]
pub struct SchemaTableName {
    schema: String,
    table: String,
}

impl SchemaTableName {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into().to_lowercase(),
            table: table.into().to_lowercase(),
        }
    }

    /// Schema part of the name.
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Table part of the name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl fmt::Display for SchemaTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

#[derive(Deserialize)]
struct RawSchemaTableName {
    schema: String,
    table: String,
}

impl From<RawSchemaTableName> for SchemaTableName {
    fn from(raw: RawSchemaTableName) -> Self {
        Self::new(raw.schema, raw.table)
    }
}

/// Partial table identifier used to filter bulk listings: a schema alone, or
/// a schema plus table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSchemaTablePrefix")]
pub struct SchemaTablePrefix {
    schema: String,
    table: Option<String>,
}

impl SchemaTablePrefix {
    /// Prefix matching every table in `schema`.
    pub fn schema(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into().to_lowercase(),
            table: None,
        }
    }

    /// Prefix matching exactly `schema.table`.
    pub fn table(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into().to_lowercase(),
            table: Some(table.into().to_lowercase()),
        }
    }

    /// Schema part of the prefix.
    #[must_use]
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    /// Table part of the prefix, if this prefix names a single table.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Returns true if `name` falls under this prefix.
    #[must_use]
    pub fn matches(&self, name: &SchemaTableName) -> bool {
        if self.schema != name.schema() {
            return false;
        }
        match &self.table {
            Some(table) => table == name.table(),
            None => true,
        }
    }
}

impl fmt::Display for SchemaTablePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table.as_deref().unwrap_or("*"))
    }
}

#[derive(Deserialize)]
struct RawSchemaTablePrefix {
    schema: String,
    table: Option<String>,
}

impl From<RawSchemaTablePrefix> for SchemaTablePrefix {
    fn from(raw: RawSchemaTablePrefix) -> Self {
        match raw.table {
            Some(table) => Self::table(raw.schema, table),
            None => Self::schema(raw.schema),
        }
    }
}
