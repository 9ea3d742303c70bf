//! Persistent inventory service.
//!
//! Wraps an [`InventorySession`] with a [`TableStore`]:
//!
//! ```text
//! operation
//!   ↓
//! 1. Validate against the current overview (no mutation)
//!   ↓
//! 2. Append to the ledger and recompute the overview
//!   ↓
//! 3. Persist every table
//! ```
//!
//! A failure in step 1 leaves everything untouched. A failure in step 3 is
//! reported after the in-memory state has already advanced; the caller retries
//! [`InventoryService::persist`], never the operation itself.

use chrono::NaiveDate;
use thiserror::Error;

use stockroom_core::{Aggregate, ValidationError};
use stockroom_inventory::{
    AddStock, Catalog, InventoryCommand, InventorySession, IssueItems, Ledger, LedgerEntry,
    Modification, OverviewTable, RecordModification,
};

use crate::store::{StorageError, TableStore};
use crate::table::{self, CodecError, Table};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Rejected; nothing changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Applied in memory but not persisted.
    #[error("change applied but not persisted: {0}")]
    Persist(#[source] StorageError),
}

#[derive(Debug)]
pub struct InventoryService<S> {
    store: S,
    session: InventorySession,
}

impl<S: TableStore> InventoryService<S> {
    /// Load persisted state from `store`.
    ///
    /// Missing tables load empty (the catalog loads its defaults); tables that
    /// fail to decode are logged and treated as missing. The overview is
    /// always recomputed from the ledgers.
    pub fn load(store: S) -> Result<Self, StorageError> {
        let movements = read_table(&store, Table::Ledger, table::decode_ledger)?.unwrap_or_default();
        let modifications =
            read_table(&store, Table::Modifications, table::decode_modifications)?
                .unwrap_or_default();
        let catalog = read_table(&store, Table::Catalog, table::decode_catalog)?
            .unwrap_or_else(Catalog::with_defaults);

        let session = InventorySession::restore(catalog, Ledger::restore(movements, modifications));
        for negative in session.overview().negative_holdings() {
            tracing::warn!(
                item = %negative.item,
                holder = %negative.holder,
                quantity = negative.quantity,
                "loaded ledger yields a negative holding"
            );
        }
        tracing::info!(
            movements = session.ledger().movements().len(),
            modifications = session.ledger().modifications().len(),
            items = session.overview().len(),
            "inventory loaded"
        );

        Ok(Self { store, session })
    }

    pub fn session(&self) -> &InventorySession {
        &self.session
    }

    pub fn overview(&self) -> &OverviewTable {
        self.session.overview()
    }

    pub fn ledger(&self) -> &Ledger {
        self.session.ledger()
    }

    pub fn catalog(&self) -> &Catalog {
        self.session.catalog()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write every table. Safe to retry.
    pub fn persist(&self) -> Result<(), StorageError> {
        let ledger = self.session.ledger();
        let tables: [(Table, Result<Vec<u8>, CodecError>); 4] = [
            (Table::Ledger, table::encode_ledger(ledger.movements().payloads())),
            (
                Table::Modifications,
                table::encode_modifications(ledger.modifications().payloads()),
            ),
            (Table::Catalog, table::encode_catalog(self.session.catalog())),
            (Table::Overview, table::encode_overview(self.session.overview())),
        ];

        for (table, encoded) in tables {
            let bytes = encoded.map_err(|source| StorageError::Encode { table, source })?;
            self.store.write(table, &bytes)?;
        }
        Ok(())
    }

    fn persist_after_change(&self) -> Result<(), ServiceError> {
        self.persist().map_err(|e| {
            tracing::error!(error = %e, "failed to persist inventory");
            ServiceError::Persist(e)
        })
    }

    fn rejected<T>(operation: &'static str, err: ValidationError) -> Result<T, ServiceError> {
        tracing::warn!(operation, code = err.code(), error = %err, "operation rejected");
        Err(ServiceError::Validation(err))
    }

    /// Validate, record and persist one ledger command.
    pub fn execute(&mut self, command: InventoryCommand) -> Result<Vec<LedgerEntry>, ServiceError> {
        let entries = match self.session.handle(&command) {
            Ok(entries) => entries,
            Err(err) => return Self::rejected("execute", err),
        };
        for entry in &entries {
            self.session.apply(entry);
            log_entry(entry);
        }
        self.persist_after_change()?;
        Ok(entries)
    }

    pub fn add_stock(&mut self, command: AddStock) -> Result<Vec<LedgerEntry>, ServiceError> {
        self.execute(InventoryCommand::AddStock(command))
    }

    pub fn issue_items(&mut self, command: IssueItems) -> Result<Vec<LedgerEntry>, ServiceError> {
        self.execute(InventoryCommand::IssueItems(command))
    }

    pub fn record_modification(
        &mut self,
        command: RecordModification,
    ) -> Result<Vec<LedgerEntry>, ServiceError> {
        self.execute(InventoryCommand::RecordModification(command))
    }

    pub fn add_department(&mut self, name: &str) -> Result<(), ServiceError> {
        if let Err(err) = self.session.add_department(name) {
            return Self::rejected("add_department", err);
        }
        tracing::info!(department = name, "department added");
        self.persist_after_change()
    }

    /// Remove a department; returns the automatic `Return to Admin` entries.
    pub fn remove_department(
        &mut self,
        name: &str,
        date: NaiveDate,
    ) -> Result<Vec<Modification>, ServiceError> {
        let returns = match self.session.remove_department(name, date) {
            Ok(returns) => returns,
            Err(err) => return Self::rejected("remove_department", err),
        };
        for m in &returns {
            tracing::info!(
                item = %m.item,
                department = %m.department,
                quantity = m.quantity,
                "stock returned to admin on department removal"
            );
        }
        tracing::info!(department = name, "department removed");
        self.persist_after_change()?;
        Ok(returns)
    }

    pub fn add_category(&mut self, name: &str) -> Result<(), ServiceError> {
        if let Err(err) = self.session.add_category(name) {
            return Self::rejected("add_category", err);
        }
        tracing::info!(category = name, "category added");
        self.persist_after_change()
    }

    pub fn remove_category(&mut self, name: &str) -> Result<(), ServiceError> {
        if let Err(err) = self.session.remove_category(name) {
            return Self::rejected("remove_category", err);
        }
        tracing::info!(category = name, "category removed");
        self.persist_after_change()
    }

    /// Delete every persisted table and return to an empty ledger with the
    /// default catalog.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.store.clear()?;
        self.session.reset();
        tracing::warn!("inventory reset: all persisted tables deleted");
        Ok(())
    }

    /// Persisted bytes of one table.
    pub fn export(&self, table: Table) -> Result<Vec<u8>, StorageError> {
        self.store.read(table)?.ok_or(StorageError::NotFound(table))
    }
}

fn read_table<S, T>(
    store: &S,
    table: Table,
    decode: impl FnOnce(&[u8]) -> Result<T, CodecError>,
) -> Result<Option<T>, StorageError>
where
    S: TableStore,
{
    let Some(bytes) = store.read(table)? else {
        tracing::info!(%table, "table not found, starting empty");
        return Ok(None);
    };
    match decode(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(%table, error = %e, "table could not be decoded, starting empty");
            Ok(None)
        }
    }
}

fn log_entry(entry: &LedgerEntry) {
    match entry {
        LedgerEntry::Movement(m) => tracing::info!(
            item = %m.item,
            holder = %m.destination,
            quantity = m.quantity,
            current_stock = m.current_stock,
            "stock movement recorded"
        ),
        LedgerEntry::Modification(m) => tracing::info!(
            item = %m.item,
            holder = %m.department,
            quantity = m.quantity,
            action = %m.action,
            "modification recorded"
        ),
    }
}
