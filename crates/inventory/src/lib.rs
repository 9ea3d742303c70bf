//! Inventory reconciliation domain (event-sourced).
//!
//! Ledger store, reconciliation engine, transaction validator and catalog
//! manager, implemented as deterministic domain logic (no IO, no HTTP, no
//! storage). The ledger is the source of truth; the overview is always
//! derivable from it.

pub mod catalog;
pub mod entry;
pub mod holder;
pub mod ledger;
pub mod overview;
pub mod reconcile;
pub mod session;
pub mod validate;

pub use catalog::{
    Catalog, CatalogKind, DEFAULT_CATEGORIES, DEFAULT_DEPARTMENTS, Departments, Registry,
};
pub use entry::{LedgerEntry, Modification, ModificationAction, StockMovement};
pub use holder::{ADMIN, Holder, LOSS_BREAKAGE};
pub use ledger::{AppendLog, Ledger};
pub use overview::{LEADING_COLUMNS, NegativeHolding, OverviewRow, OverviewTable};
pub use reconcile::{OverviewProjection, recompute_overview};
pub use session::{AddStock, InventoryCommand, InventorySession, IssueItems, RecordModification};
pub use validate::{validate_modification, validate_movement};
