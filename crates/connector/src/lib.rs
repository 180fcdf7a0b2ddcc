//! Connector metadata SPI.
//!
//! Defines how the engine discovers schemas and tables, resolves them into
//! opaque handles, and creates or drops tables through a connector. Ships
//! one reference implementation, [`MemoryConnector`], used as the test
//! fixture connector and as the template for real backends.

pub mod handle;
pub mod memory;
pub mod metadata;
pub mod name;
pub mod provider;

pub use handle::{
    ColumnHandle, ColumnHandleRef, OutputTableHandle, OutputTableHandleRef, TableHandle,
    TableHandleRef,
};
pub use memory::{MemoryConnector, MemoryConnectorConfig};
pub use metadata::{ColumnMetadata, Fragment, TableMetadata};
pub use name::{SchemaTableName, SchemaTablePrefix};
pub use provider::MetadataProvider;
