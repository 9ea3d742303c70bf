//! Infrastructure layer: configuration, persisted tables, storage backends and
//! the persistent inventory service.

pub mod config;
pub mod fs;
pub mod service;
pub mod store;
pub mod table;


pub use config::{AppConfig, ConfigError};
pub use service::{InventoryService, ServiceError};
pub use store::{DirectoryTableStore, InMemoryTableStore, StorageError, TableStore};
pub use table::{CodecError, Table};
