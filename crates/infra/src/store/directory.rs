use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{StorageError, TableStore};
use crate::fs::{remove_if_exists, write_atomic};
use crate::table::Table;

/// One CSV file per table inside a data directory.
///
/// The directory is created on first write. Writes go through a temp file and
/// a rename, so a crash mid-write leaves the previous content in place.
#[derive(Debug, Clone)]
pub struct DirectoryTableStore {
    root: PathBuf,
}

impl DirectoryTableStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, table: Table) -> PathBuf {
        self.root.join(table.file_name())
    }
}

impl TableStore for DirectoryTableStore {
    fn read(&self, table: Table) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path(table)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { table, source }),
        }
    }

    fn write(&self, table: Table, bytes: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .and_then(|()| write_atomic(&self.path(table), bytes))
            .map_err(|source| StorageError::Io { table, source })
    }

    fn clear(&self) -> Result<(), StorageError> {
        for table in Table::ALL {
            remove_if_exists(&self.path(table)).map_err(StorageError::Clear)?;
        }
        Ok(())
    }
}
