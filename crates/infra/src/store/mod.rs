//! Table storage boundary.
//!
//! A store holds the encoded bytes of each [`Table`] and knows nothing about
//! their content. Writing one table never touches another.

pub mod directory;
pub mod in_memory;

use std::sync::Arc;

use thiserror::Error;

use crate::table::{CodecError, Table};

pub use directory::DirectoryTableStore;
pub use in_memory::InMemoryTableStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {table}: {source}")]
    Io {
        table: Table,
        #[source]
        source: std::io::Error,
    },

    #[error("io error clearing storage: {0}")]
    Clear(#[source] std::io::Error),

    #[error("failed to encode {table}: {source}")]
    Encode {
        table: Table,
        #[source]
        source: CodecError,
    },

    #[error("{0} has not been persisted")]
    NotFound(Table),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

pub trait TableStore: Send + Sync {
    /// Stored bytes of `table`, or `None` if it was never written.
    fn read(&self, table: Table) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the stored bytes of `table`.
    fn write(&self, table: Table, bytes: &[u8]) -> Result<(), StorageError>;

    /// Remove every stored table.
    fn clear(&self) -> Result<(), StorageError>;
}

impl<S> TableStore for Arc<S>
where
    S: TableStore + ?Sized,
{
    fn read(&self, table: Table) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).read(table)
    }

    fn write(&self, table: Table, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).write(table, bytes)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}
