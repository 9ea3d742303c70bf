//! Reconciliation engine: folds the ledger into the stock overview.
//!
//! The fold is pure and deterministic. Replaying the whole ledger is the
//! correctness baseline; anything incremental must agree with
//! [`recompute_overview`] on the same inputs.

use std::collections::{HashMap, HashSet};

use stockroom_events::{EventEnvelope, Projection};

use crate::catalog::Departments;
use crate::entry::{Modification, ModificationAction, StockMovement};
use crate::holder::Holder;
use crate::overview::{OverviewRow, OverviewTable};

/// Running balances of one item while folding.
#[derive(Debug, Clone)]
struct ItemBalance {
    item: String,
    category: String,
    admin: i64,
    departments: HashMap<String, i64>,
    loss_breakage: i64,
}

impl ItemBalance {
    fn department_mut(&mut self, name: &str) -> &mut i64 {
        self.departments.entry(name.to_string()).or_insert(0)
    }
}

/// Overview projection over both logs.
///
/// Tracks a balance for every known department, active or retired; only
/// active departments become overview columns. Entries naming a holder that
/// was never registered still create the item row (with its category) but
/// move no stock.
#[derive(Debug, Clone)]
pub struct OverviewProjection {
    columns: Vec<String>,
    tracked: HashSet<String>,
    items: Vec<ItemBalance>,
    index: HashMap<String, usize>,
}

impl OverviewProjection {
    pub fn new(departments: &Departments) -> Self {
        let tracked = departments
            .active()
            .iter()
            .chain(departments.retired())
            .cloned()
            .collect();
        Self {
            columns: departments.active().to_vec(),
            tracked,
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn balance_mut(&mut self, item: &str, category: &str) -> &mut ItemBalance {
        let idx = match self.index.get(item) {
            Some(&idx) => idx,
            None => {
                self.items.push(ItemBalance {
                    item: item.to_string(),
                    category: category.to_string(),
                    admin: 0,
                    departments: HashMap::new(),
                    loss_breakage: 0,
                });
                let idx = self.items.len() - 1;
                self.index.insert(item.to_string(), idx);
                idx
            }
        };
        &mut self.items[idx]
    }

    /// Materialize the current balances as an overview table.
    pub fn to_overview(&self) -> OverviewTable {
        let rows = self
            .items
            .iter()
            .map(|b| OverviewRow {
                item: b.item.clone(),
                category: b.category.clone(),
                admin: b.admin,
                departments: self
                    .columns
                    .iter()
                    .map(|c| b.departments.get(c).copied().unwrap_or(0))
                    .collect(),
                loss_breakage: b.loss_breakage,
            })
            .collect();
        OverviewTable::from_rows(self.columns.clone(), rows)
    }
}

impl Projection<StockMovement> for OverviewProjection {
    fn apply(&mut self, envelope: &EventEnvelope<StockMovement>) {
        let m = envelope.payload();
        let holder = m.destination_holder();
        let tracked = matches!(&holder, Holder::Department(name) if self.tracked.contains(name));

        let balance = self.balance_mut(&m.item, &m.category);
        // Saturating: hand-edited rows are folded unvalidated.
        match holder {
            Holder::Admin => balance.admin = balance.admin.saturating_add(m.quantity),
            Holder::Department(name) if tracked => {
                let held = balance.department_mut(&name);
                *held = held.saturating_add(m.quantity);
                balance.admin = balance.admin.saturating_sub(m.quantity);
            }
            // Never-registered holder, or the write-off bucket (not a movement target).
            Holder::Department(_) | Holder::LossBreakage => {}
        }
    }
}

impl Projection<Modification> for OverviewProjection {
    fn apply(&mut self, envelope: &EventEnvelope<Modification>) {
        let m = envelope.payload();
        // Modifications never originate stock: no row, nothing to correct.
        if !self.index.contains_key(&m.item) || !self.tracked.contains(&m.department) {
            return;
        }

        let balance = self.balance_mut(&m.item, &m.category);
        let held = balance.department_mut(&m.department);
        *held = held.saturating_sub(m.quantity);
        match m.action {
            ModificationAction::ReturnToAdmin => {
                balance.admin = balance.admin.saturating_add(m.quantity)
            }
            ModificationAction::MarkAsBroken => {
                balance.loss_breakage = balance.loss_breakage.saturating_add(m.quantity)
            }
        }
    }
}

/// Fold both logs, in log order, into a fresh overview.
pub fn recompute_overview(
    stock_movements: &[EventEnvelope<StockMovement>],
    modifications: &[EventEnvelope<Modification>],
    known_departments: &Departments,
) -> OverviewTable {
    let mut projection = OverviewProjection::new(known_departments);
    Projection::<StockMovement>::apply_all(&mut projection, stock_movements);
    Projection::<Modification>::apply_all(&mut projection, modifications);
    projection.to_overview()
}
