use std::collections::HashMap;
use std::sync::RwLock;

use super::{StorageError, TableStore};
use crate::table::Table;

/// In-memory table store.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryTableStore {
    tables: RwLock<HashMap<Table, Vec<u8>>>,
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableStore for InMemoryTableStore {
    fn read(&self, table: Table) -> Result<Option<Vec<u8>>, StorageError> {
        let tables = self.tables.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(tables.get(&table).cloned())
    }

    fn write(&self, table: Table, bytes: &[u8]) -> Result<(), StorageError> {
        let mut tables = self.tables.write().map_err(|_| StorageError::LockPoisoned)?;
        tables.insert(table, bytes.to_vec());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut tables = self.tables.write().map_err(|_| StorageError::LockPoisoned)?;
        tables.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_independent() {
        let store = InMemoryTableStore::new();
        store.write(Table::Ledger, b"ledger").unwrap();
        store.write(Table::Catalog, b"catalog").unwrap();
        store.write(Table::Ledger, b"ledger v2").unwrap();

        assert_eq!(store.read(Table::Ledger).unwrap().unwrap(), b"ledger v2");
        assert_eq!(store.read(Table::Catalog).unwrap().unwrap(), b"catalog");
        assert_eq!(store.read(Table::Overview).unwrap(), None);

        store.clear().unwrap();
        assert_eq!(store.read(Table::Catalog).unwrap(), None);
    }
}
