//! Derived stock overview (read model).

use std::collections::HashMap;

use serde::Serialize;

use crate::holder::{ADMIN, Holder, LOSS_BREAKAGE};

/// Fixed columns in front of the holder columns of a rendered overview.
pub const LEADING_COLUMNS: [&str; 3] = ["Item Name", "Type", "Total"];

/// Current holdings of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewRow {
    pub item: String,
    pub category: String,
    pub admin: i64,
    /// Aligned with [`OverviewTable::departments`].
    pub departments: Vec<i64>,
    pub loss_breakage: i64,
}

impl OverviewRow {
    /// Admin + every department column + Loss/Breakage.
    ///
    /// Saturates at the counter bounds; validated input never gets there.
    pub fn total(&self) -> i64 {
        self.departments
            .iter()
            .fold(self.admin, |acc, &q| acc.saturating_add(q))
            .saturating_add(self.loss_breakage)
    }
}

/// A holder cell that went below zero (only possible for unvalidated input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NegativeHolding {
    pub item: String,
    pub holder: String,
    pub quantity: i64,
}

/// Per-item, per-holder stock quantities.
///
/// Fully recomputable from the ledger and the modification log; never the
/// source of truth. Rows keep the order in which items first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverviewTable {
    departments: Vec<String>,
    rows: Vec<OverviewRow>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl OverviewTable {
    /// Empty table with one column per department.
    pub fn new(departments: Vec<String>) -> Self {
        Self {
            departments,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn from_rows(departments: Vec<String>, rows: Vec<OverviewRow>) -> Self {
        let index = rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.item.clone(), i))
            .collect();
        Self {
            departments,
            rows,
            index,
        }
    }

    /// Department column names, in column order.
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    pub fn has_department(&self, name: &str) -> bool {
        self.departments.iter().any(|d| d == name)
    }

    pub fn rows(&self) -> &[OverviewRow] {
        &self.rows
    }

    pub fn row(&self, item: &str) -> Option<&OverviewRow> {
        self.index.get(item).map(|&i| &self.rows[i])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Quantity of `item` held by `holder`; 0 for unseen items or holders
    /// without a column.
    pub fn holding(&self, item: &str, holder: &Holder) -> i64 {
        let Some(row) = self.row(item) else {
            return 0;
        };
        match holder {
            Holder::Admin => row.admin,
            Holder::LossBreakage => row.loss_breakage,
            Holder::Department(name) => self
                .departments
                .iter()
                .position(|d| d == name)
                .map(|col| row.departments[col])
                .unwrap_or(0),
        }
    }

    /// Sum of every row's total.
    pub fn grand_total(&self) -> i64 {
        self.rows
            .iter()
            .fold(0i64, |acc, row| acc.saturating_add(row.total()))
    }

    /// Every cell below zero, row by row.
    pub fn negative_holdings(&self) -> Vec<NegativeHolding> {
        let mut found = Vec::new();
        for row in &self.rows {
            let cells = std::iter::once((ADMIN, row.admin))
                .chain(
                    self.departments
                        .iter()
                        .map(String::as_str)
                        .zip(row.departments.iter().copied()),
                )
                .chain(std::iter::once((LOSS_BREAKAGE, row.loss_breakage)));
            for (holder, quantity) in cells {
                if quantity < 0 {
                    found.push(NegativeHolding {
                        item: row.item.clone(),
                        holder: holder.to_string(),
                        quantity,
                    });
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> OverviewTable {
        OverviewTable::from_rows(
            vec!["Sports".to_string(), "Arts".to_string()],
            vec![OverviewRow {
                item: "Pen".to_string(),
                category: "Stationary".to_string(),
                admin: 70,
                departments: vec![20, 0],
                loss_breakage: 10,
            }],
        )
    }

    #[test]
    fn total_sums_every_holder() {
        let t = table();
        assert_eq!(t.row("Pen").unwrap().total(), 100);
        assert_eq!(t.grand_total(), 100);
    }

    #[test]
    fn holding_defaults_to_zero() {
        let t = table();
        assert_eq!(t.holding("Pen", &Holder::department("Sports")), 20);
        assert_eq!(t.holding("Pen", &Holder::department("Owner")), 0);
        assert_eq!(t.holding("Ink", &Holder::Admin), 0);
        assert_eq!(t.holding("Pen", &Holder::LossBreakage), 10);
    }

    #[test]
    fn totals_saturate_instead_of_wrapping() {
        let row = OverviewRow {
            item: "Pen".to_string(),
            category: "Stationary".to_string(),
            admin: 1,
            departments: vec![i64::MAX, 0],
            loss_breakage: 0,
        };
        assert_eq!(row.total(), i64::MAX);

        let mut ink = row.clone();
        ink.item = "Ink".to_string();
        let t = OverviewTable::from_rows(vec!["Sports".to_string(), "Arts".to_string()], vec![row, ink]);
        assert_eq!(t.grand_total(), i64::MAX);
    }

    #[test]
    fn negative_cells_are_reported_with_their_holder() {
        let t = OverviewTable::from_rows(
            vec!["Sports".to_string()],
            vec![OverviewRow {
                item: "Pen".to_string(),
                category: "Stationary".to_string(),
                admin: -5,
                departments: vec![5],
                loss_breakage: 0,
            }],
        );
        assert_eq!(
            t.negative_holdings(),
            vec![NegativeHolding {
                item: "Pen".to_string(),
                holder: "Admin".to_string(),
                quantity: -5,
            }]
        );
        assert!(table().negative_holdings().is_empty());
    }
}
