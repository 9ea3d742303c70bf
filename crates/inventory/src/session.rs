//! Inventory session: the single owner of catalog, ledger and overview cache.
//!
//! Every mutation follows the same pipeline: validate against the current
//! overview, append to the ledger, recompute the overview by full replay.
//! Nothing here performs IO; persisting the result is the caller's step.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use stockroom_core::{Aggregate, ValidationError, ValidationResult};

use crate::catalog::{Catalog, CatalogKind};
use crate::entry::{LedgerEntry, Modification, ModificationAction, StockMovement};
use crate::holder::Holder;
use crate::ledger::Ledger;
use crate::overview::OverviewTable;
use crate::reconcile::recompute_overview;
use crate::validate::{validate_modification, validate_movement};

/// Command: receive stock into Admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStock {
    pub date: NaiveDate,
    pub category: String,
    pub item: String,
    pub quantity: i64,
    pub vendor: Option<String>,
    pub invoice_number: Option<String>,
    pub total_price: Option<Decimal>,
}

/// Command: issue stock from Admin to a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueItems {
    pub date: NaiveDate,
    pub category: String,
    pub item: String,
    pub department: String,
    pub quantity: i64,
}

/// Command: write off or return stock held by a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordModification {
    pub date: NaiveDate,
    pub category: String,
    pub item: String,
    pub department: String,
    pub quantity: i64,
    pub action: ModificationAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    AddStock(AddStock),
    IssueItems(IssueItems),
    RecordModification(RecordModification),
}

/// Aggregate root: the inventory session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySession {
    catalog: Catalog,
    ledger: Ledger,
    overview: OverviewTable,
}

impl Default for InventorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl InventorySession {
    /// Empty ledger, default catalog.
    pub fn new() -> Self {
        Self::restore(Catalog::with_defaults(), Ledger::new())
    }

    /// Rehydrate from loaded state; the overview is always recomputed.
    pub fn restore(catalog: Catalog, ledger: Ledger) -> Self {
        let mut session = Self {
            catalog,
            ledger,
            overview: OverviewTable::default(),
        };
        session.recompute();
        session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn overview(&self) -> &OverviewTable {
        &self.overview
    }

    /// Destructive reset: empty ledger, default catalog.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn recompute(&mut self) {
        self.overview = recompute_overview(
            self.ledger.movements().all(),
            self.ledger.modifications().all(),
            self.catalog.departments(),
        );
    }

    pub fn add_department(&mut self, name: &str) -> ValidationResult<()> {
        self.catalog.add(CatalogKind::Department, name)?;
        self.recompute();
        Ok(())
    }

    /// Remove a department, returning whatever it still holds to Admin first.
    ///
    /// The returns are recorded as ordinary `Return to Admin` modifications
    /// dated `date` and are handed back so the caller can report them. The
    /// department's historical rows stay in the ledger untouched.
    pub fn remove_department(
        &mut self,
        name: &str,
        date: NaiveDate,
    ) -> ValidationResult<Vec<Modification>> {
        let name = name.trim();
        if !self.catalog.contains(CatalogKind::Department, name) {
            return Err(ValidationError::not_found(CatalogKind::Department.label(), name));
        }

        let holder = Holder::department(name);
        let returns: Vec<Modification> = self
            .overview
            .rows()
            .iter()
            .filter_map(|row| {
                let held = self.overview.holding(&row.item, &holder);
                (held > 0).then(|| Modification {
                    date,
                    category: row.category.clone(),
                    item: row.item.clone(),
                    department: name.to_string(),
                    quantity: held,
                    action: ModificationAction::ReturnToAdmin,
                })
            })
            .collect();

        for m in &returns {
            self.ledger.append(LedgerEntry::Modification(m.clone()));
        }
        self.catalog.remove(CatalogKind::Department, name)?;
        self.recompute();
        Ok(returns)
    }

    pub fn add_category(&mut self, name: &str) -> ValidationResult<()> {
        self.catalog.add(CatalogKind::Category, name)
    }

    /// Existing items keep their category; new stock can no longer use it.
    pub fn remove_category(&mut self, name: &str) -> ValidationResult<()> {
        self.catalog.remove(CatalogKind::Category, name)
    }

    /// Names are compared and stored without surrounding whitespace.
    fn required<'a>(value: &'a str, field: &'static str) -> ValidationResult<&'a str> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::EmptyField { field });
        }
        Ok(value)
    }

    fn ensure_category_matches(&self, item: &str, category: &str) -> ValidationResult<()> {
        match self.overview.row(item) {
            Some(row) if row.category != category => Err(ValidationError::CategoryMismatch {
                item: item.to_string(),
                expected: row.category.clone(),
                found: category.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn handle_add_stock(&self, cmd: &AddStock) -> ValidationResult<Vec<LedgerEntry>> {
        let item = Self::required(&cmd.item, "item name")?;
        let category = Self::required(&cmd.category, "item category")?;
        if !self.catalog.contains(CatalogKind::Category, category) {
            return Err(ValidationError::UnknownCategory {
                category: category.to_string(),
            });
        }
        self.ensure_category_matches(item, category)?;
        validate_movement(&self.overview, item, &Holder::Admin, cmd.quantity)?;

        if let Some(price) = cmd.total_price {
            if price.is_sign_negative() && !price.is_zero() {
                return Err(ValidationError::InvalidPrice {
                    price: price.to_string(),
                });
            }
        }

        let held = self.overview.holding(item, &Holder::Admin);
        let current_stock = held
            .checked_add(cmd.quantity)
            .ok_or_else(|| ValidationError::QuantityOverflow {
                item: item.to_string(),
                held,
                requested: cmd.quantity,
            })?;
        Ok(vec![LedgerEntry::Movement(StockMovement {
            date: cmd.date,
            category: category.to_string(),
            item: item.to_string(),
            destination: Holder::Admin.name().to_string(),
            quantity: cmd.quantity,
            current_stock,
            vendor: non_blank(cmd.vendor.as_deref()),
            invoice_number: non_blank(cmd.invoice_number.as_deref()),
            total_price: cmd
                .total_price
                .map(|p| p.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)),
        })])
    }

    fn handle_issue(&self, cmd: &IssueItems) -> ValidationResult<Vec<LedgerEntry>> {
        let item = Self::required(&cmd.item, "item name")?;
        let department = Self::required(&cmd.department, "department")?;
        let category = cmd.category.trim();
        self.ensure_category_matches(item, category)?;
        validate_movement(&self.overview, item, &Holder::department(department), cmd.quantity)?;

        let current_stock = self.overview.holding(item, &Holder::Admin) - cmd.quantity;
        Ok(vec![LedgerEntry::Movement(StockMovement {
            date: cmd.date,
            category: category.to_string(),
            item: item.to_string(),
            destination: department.to_string(),
            quantity: cmd.quantity,
            current_stock,
            vendor: None,
            invoice_number: None,
            total_price: None,
        })])
    }

    fn handle_modification(&self, cmd: &RecordModification) -> ValidationResult<Vec<LedgerEntry>> {
        let item = Self::required(&cmd.item, "item name")?;
        let department = Self::required(&cmd.department, "department")?;
        let category = cmd.category.trim();
        validate_modification(&self.overview, item, department, cmd.quantity)?;
        self.ensure_category_matches(item, category)?;

        Ok(vec![LedgerEntry::Modification(Modification {
            date: cmd.date,
            category: category.to_string(),
            item: item.to_string(),
            department: department.to_string(),
            quantity: cmd.quantity,
            action: cmd.action,
        })])
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Aggregate for InventorySession {
    type Command = InventoryCommand;
    type Event = LedgerEntry;
    type Error = ValidationError;

    fn version(&self) -> u64 {
        self.ledger.len() as u64
    }

    fn apply(&mut self, event: &Self::Event) {
        self.ledger.append(event.clone());
        self.recompute();
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::AddStock(cmd) => self.handle_add_stock(cmd),
            InventoryCommand::IssueItems(cmd) => self.handle_issue(cmd),
            InventoryCommand::RecordModification(cmd) => self.handle_modification(cmd),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn add_pens(quantity: i64) -> InventoryCommand {
        InventoryCommand::AddStock(AddStock {
            date: date(),
            category: "Stationary".to_string(),
            item: "Pen".to_string(),
            quantity,
            vendor: None,
            invoice_number: None,
            total_price: None,
        })
    }

    fn issue_pens(department: &str, quantity: i64) -> InventoryCommand {
        InventoryCommand::IssueItems(IssueItems {
            date: date(),
            category: "Stationary".to_string(),
            item: "Pen".to_string(),
            department: department.to_string(),
            quantity,
        })
    }

    fn modify_pens(department: &str, quantity: i64, action: ModificationAction) -> InventoryCommand {
        InventoryCommand::RecordModification(RecordModification {
            date: date(),
            category: "Stationary".to_string(),
            item: "Pen".to_string(),
            department: department.to_string(),
            quantity,
            action,
        })
    }

    /// Scenario A + B: 100 pens received, 30 issued to Sports.
    fn scenario_b() -> InventorySession {
        let mut session = InventorySession::new();
        session.execute(&add_pens(100)).unwrap();
        session.execute(&issue_pens("Sports", 30)).unwrap();
        session
    }

    fn sports(session: &InventorySession) -> i64 {
        session.overview().holding("Pen", &Holder::department("Sports"))
    }

    #[test]
    fn add_stock_to_empty_state() {
        let mut session = InventorySession::new();
        session.execute(&add_pens(100)).unwrap();

        let row = session.overview().row("Pen").unwrap();
        assert_eq!(row.admin, 100);
        assert_eq!(row.total(), 100);
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn issue_moves_stock_and_records_current_stock() {
        let session = scenario_b();

        let row = session.overview().row("Pen").unwrap();
        assert_eq!(row.admin, 70);
        assert_eq!(sports(&session), 30);
        assert_eq!(row.total(), 100);

        let last = session.ledger().movements().last().unwrap().payload();
        assert_eq!(last.destination, "Sports");
        assert_eq!(last.current_stock, 70);
    }

    #[test]
    fn over_issue_fails_and_leaves_state_unchanged() {
        let mut session = scenario_b();
        let before = session.clone();

        let err = session.execute(&issue_pens("Sports", 80)).unwrap_err();
        assert_eq!(err, ValidationError::insufficient_stock("Pen", "Admin", 70, 80));
        assert_eq!(session, before);
    }

    #[test]
    fn mark_as_broken_keeps_total() {
        let mut session = scenario_b();
        session
            .execute(&modify_pens("Sports", 10, ModificationAction::MarkAsBroken))
            .unwrap();

        let row = session.overview().row("Pen").unwrap();
        assert_eq!(sports(&session), 20);
        assert_eq!(row.loss_breakage, 10);
        assert_eq!(row.total(), 100);
        assert_eq!(session.ledger().modifications().len(), 1);
    }

    #[test]
    fn removing_a_department_returns_its_stock_to_admin() {
        let mut session = scenario_b();
        session
            .execute(&modify_pens("Sports", 10, ModificationAction::MarkAsBroken))
            .unwrap();

        let returns = session.remove_department("Sports", date()).unwrap();
        assert_eq!(returns.len(), 1);
        assert_eq!(returns[0].quantity, 20);
        assert_eq!(returns[0].action, ModificationAction::ReturnToAdmin);

        let overview = session.overview();
        assert!(!overview.has_department("Sports"));
        let row = overview.row("Pen").unwrap();
        assert_eq!(row.admin, 90);
        assert_eq!(row.loss_breakage, 10);
        assert_eq!(row.total(), 100);

        // The issuance row to Sports is still in the ledger.
        assert!(session
            .ledger()
            .movements()
            .payloads()
            .any(|m| m.destination == "Sports"));
        // ...and the department can no longer receive stock.
        assert_eq!(
            session.execute(&issue_pens("Sports", 1)).unwrap_err(),
            ValidationError::unknown_destination("Sports")
        );
    }

    #[test]
    fn removed_department_survives_a_replay() {
        let mut session = scenario_b();
        session.remove_department("Sports", date()).unwrap();

        let replayed = InventorySession::restore(session.catalog().clone(), session.ledger().clone());
        assert_eq!(replayed.overview(), session.overview());
    }

    #[test]
    fn removing_unknown_department_is_not_found() {
        let mut session = InventorySession::new();
        assert_eq!(
            session.remove_department("Library", date()).unwrap_err(),
            ValidationError::not_found("department", "Library")
        );
    }

    #[test]
    fn added_department_gets_a_zero_column() {
        let mut session = scenario_b();
        session.add_department("Library").unwrap();

        assert_eq!(session.overview().departments().last().unwrap(), "Library");
        assert_eq!(session.overview().holding("Pen", &Holder::department("Library")), 0);
        session.execute(&issue_pens("Library", 5)).unwrap();
        assert_eq!(session.overview().holding("Pen", &Holder::department("Library")), 5);
    }

    #[test]
    fn add_stock_requires_a_registered_category() {
        let mut session = InventorySession::new();
        let cmd = InventoryCommand::AddStock(AddStock {
            date: date(),
            category: "Toys".to_string(),
            item: "Ball".to_string(),
            quantity: 1,
            vendor: None,
            invoice_number: None,
            total_price: None,
        });
        assert_eq!(
            session.execute(&cmd).unwrap_err(),
            ValidationError::UnknownCategory {
                category: "Toys".to_string()
            }
        );

        session.add_category("Toys").unwrap();
        session.execute(&cmd).unwrap();
    }

    #[test]
    fn existing_item_keeps_its_category() {
        let mut session = scenario_b();
        let cmd = InventoryCommand::AddStock(AddStock {
            date: date(),
            category: "Hardware".to_string(),
            item: "Pen".to_string(),
            quantity: 1,
            vendor: None,
            invoice_number: None,
            total_price: None,
        });
        assert!(matches!(
            session.execute(&cmd).unwrap_err(),
            ValidationError::CategoryMismatch { .. }
        ));
    }

    #[test]
    fn restock_details_are_normalized() {
        let mut session = InventorySession::new();
        let cmd = InventoryCommand::AddStock(AddStock {
            date: date(),
            category: "Stationary".to_string(),
            item: "Pen".to_string(),
            quantity: 3,
            vendor: Some("  ".to_string()),
            invoice_number: Some("00123".to_string()),
            total_price: Some(Decimal::new(12345, 3)),
        });
        session.execute(&cmd).unwrap();

        let entry = session.ledger().movements().last().unwrap().payload();
        assert_eq!(entry.vendor, None);
        assert_eq!(entry.invoice_number.as_deref(), Some("00123"));
        assert_eq!(entry.total_price, Some(Decimal::new(1235, 2)));
        assert_eq!(entry.current_stock, 3);
    }

    #[test]
    fn negative_price_is_rejected() {
        let session = InventorySession::new();
        let cmd = InventoryCommand::AddStock(AddStock {
            date: date(),
            category: "Stationary".to_string(),
            item: "Pen".to_string(),
            quantity: 1,
            vendor: None,
            invoice_number: None,
            total_price: Some(Decimal::new(-1, 0)),
        });
        assert!(matches!(
            session.handle(&cmd).unwrap_err(),
            ValidationError::InvalidPrice { .. }
        ));
    }

    #[test]
    fn restock_past_the_counter_range_is_rejected() {
        let mut session = InventorySession::new();
        session.execute(&add_pens(i64::MAX)).unwrap();
        let before = session.clone();

        assert_eq!(
            session.execute(&add_pens(1)).unwrap_err(),
            ValidationError::QuantityOverflow {
                item: "Pen".to_string(),
                held: i64::MAX,
                requested: 1,
            }
        );
        assert_eq!(session, before);
    }

    #[test]
    fn restock_is_bounded_by_the_total_not_just_admin() {
        let mut session = InventorySession::new();
        session.execute(&add_pens(i64::MAX)).unwrap();
        session.execute(&issue_pens("Sports", i64::MAX - 1)).unwrap();
        assert_eq!(session.overview().holding("Pen", &Holder::Admin), 1);

        assert!(matches!(
            session.execute(&add_pens(1)).unwrap_err(),
            ValidationError::QuantityOverflow { held: i64::MAX, .. }
        ));
        let row = session.overview().row("Pen").unwrap();
        assert_eq!(row.total(), i64::MAX);
        assert!(session.overview().negative_holdings().is_empty());
    }

    #[test]
    fn names_are_trimmed_at_intake() {
        let mut session = scenario_b();
        session
            .execute(&InventoryCommand::AddStock(AddStock {
                date: date(),
                category: " Stationary".to_string(),
                item: "Pen ".to_string(),
                quantity: 5,
                vendor: None,
                invoice_number: None,
                total_price: None,
            }))
            .unwrap();
        session.execute(&issue_pens(" Sports ", 5)).unwrap();

        assert_eq!(session.overview().len(), 1);
        assert_eq!(session.overview().row("Pen").unwrap().admin, 70);
        assert_eq!(sports(&session), 35);

        let restock = session.ledger().movements().all()[2].payload();
        assert_eq!(restock.item, "Pen");
        assert_eq!(restock.category, "Stationary");
        let issue = session.ledger().movements().last().unwrap().payload();
        assert_eq!(issue.destination, "Sports");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut session = scenario_b();
        session.add_department("Library").unwrap();
        session.reset();

        assert_eq!(session, InventorySession::new());
        assert!(session.ledger().is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Restock(usize, i64),
        Issue(usize, usize, i64),
        Modify(usize, usize, i64, bool),
        RemoveDepartment(usize),
        AddDepartment(usize),
    }

    const ITEMS: [&str; 3] = ["Pen", "Ink", "Mop"];
    const DEPTS: [&str; 3] = ["Sports", "Arts", "Library"];

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..ITEMS.len(), 1i64..40).prop_map(|(i, q)| Op::Restock(i, q)),
            4 => (0..ITEMS.len(), 0..DEPTS.len(), 1i64..40).prop_map(|(i, d, q)| Op::Issue(i, d, q)),
            3 => (0..ITEMS.len(), 0..DEPTS.len(), 1i64..40, any::<bool>())
                .prop_map(|(i, d, q, b)| Op::Modify(i, d, q, b)),
            1 => (0..DEPTS.len()).prop_map(Op::RemoveDepartment),
            1 => (0..DEPTS.len()).prop_map(Op::AddDepartment),
        ]
    }

    fn run(session: &mut InventorySession, op: &Op) -> Result<(), ValidationError> {
        let category = "Stationary".to_string();
        match *op {
            Op::Restock(i, q) => session
                .execute(&InventoryCommand::AddStock(AddStock {
                    date: date(),
                    category,
                    item: ITEMS[i].to_string(),
                    quantity: q,
                    vendor: None,
                    invoice_number: None,
                    total_price: None,
                }))
                .map(|_| ()),
            Op::Issue(i, d, q) => session
                .execute(&InventoryCommand::IssueItems(IssueItems {
                    date: date(),
                    category,
                    item: ITEMS[i].to_string(),
                    department: DEPTS[d].to_string(),
                    quantity: q,
                }))
                .map(|_| ()),
            Op::Modify(i, d, q, broken) => session
                .execute(&InventoryCommand::RecordModification(RecordModification {
                    date: date(),
                    category,
                    item: ITEMS[i].to_string(),
                    department: DEPTS[d].to_string(),
                    quantity: q,
                    action: if broken {
                        ModificationAction::MarkAsBroken
                    } else {
                        ModificationAction::ReturnToAdmin
                    },
                }))
                .map(|_| ()),
            Op::RemoveDepartment(d) => session.remove_department(DEPTS[d], date()).map(|_| ()),
            Op::AddDepartment(d) => session.add_department(DEPTS[d]),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after every accepted or rejected operation, no holder is
        /// negative, totals equal what was received, rejected operations change
        /// nothing, and the cached overview equals a fresh replay.
        #[test]
        fn validated_operations_conserve_stock(ops in prop::collection::vec(op_strategy(), 1..60)) {
            let mut session = InventorySession::new();
            let mut received = std::collections::HashMap::<String, i64>::new();

            for op in &ops {
                let before = session.clone();
                match run(&mut session, op) {
                    Ok(()) => {
                        if let Op::Restock(i, q) = *op {
                            *received.entry(ITEMS[i].to_string()).or_default() += q;
                        }
                    }
                    Err(_) => prop_assert_eq!(&session, &before),
                }

                let overview = session.overview();
                prop_assert!(overview.negative_holdings().is_empty());
                for row in overview.rows() {
                    prop_assert_eq!(row.total(), received.get(&row.item).copied().unwrap_or(0));
                }

                let replayed = InventorySession::restore(session.catalog().clone(), session.ledger().clone());
                prop_assert_eq!(replayed.overview(), overview);
            }
        }
    }
}
