//! Transaction validator.
//!
//! Checks run against the overview folded from every entry appended so far,
//! before the new entry is appended. A failure leaves all state untouched.

use stockroom_core::{ValidationError, ValidationResult};

use crate::holder::Holder;
use crate::overview::{OverviewRow, OverviewTable};

fn ensure_positive(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::InvalidQuantity {
            requested: quantity,
        });
    }
    Ok(())
}

/// Validate a stock movement of `quantity` units of `item` to `destination`.
///
/// Restocks (destination Admin) pass as long as the item's total, summed over
/// every holder, stays representable. Anything else must name an active
/// department and is covered by Admin-held stock; an item never seen before
/// counts as holding zero everywhere, so its first movement must be a restock.
pub fn validate_movement(
    overview: &OverviewTable,
    item: &str,
    destination: &Holder,
    quantity: i64,
) -> ValidationResult<()> {
    ensure_positive(quantity)?;

    match destination {
        Holder::Admin => {
            let held = overview.row(item).map(OverviewRow::total).unwrap_or(0);
            if held.checked_add(quantity).is_none() {
                return Err(ValidationError::QuantityOverflow {
                    item: item.to_string(),
                    held,
                    requested: quantity,
                });
            }
            Ok(())
        }
        Holder::Department(name) if overview.has_department(name) => {
            let available = overview.holding(item, &Holder::Admin);
            if quantity > available {
                return Err(ValidationError::insufficient_stock(
                    item,
                    Holder::Admin.name(),
                    available,
                    quantity,
                ));
            }
            Ok(())
        }
        other => Err(ValidationError::unknown_destination(other.name())),
    }
}

/// Validate a corrective move of `quantity` units of `item` out of `department`.
///
/// The item must already exist (modifications never originate stock) and the
/// department must hold enough of it. Both actions draw on the same balance.
pub fn validate_modification(
    overview: &OverviewTable,
    item: &str,
    department: &str,
    quantity: i64,
) -> ValidationResult<()> {
    ensure_positive(quantity)?;

    if overview.row(item).is_none() {
        return Err(ValidationError::unknown_item(item));
    }
    if !overview.has_department(department) {
        return Err(ValidationError::unknown_destination(department));
    }

    let holder = Holder::department(department);
    let available = overview.holding(item, &holder);
    if quantity > available {
        return Err(ValidationError::insufficient_stock(
            item, department, available, quantity,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overview() -> OverviewTable {
        OverviewTable::from_rows(
            vec!["Sports".to_string()],
            vec![OverviewRow {
                item: "Pen".to_string(),
                category: "Stationary".to_string(),
                admin: 70,
                departments: vec![30],
                loss_breakage: 0,
            }],
        )
    }

    #[test]
    fn restock_is_always_accepted() {
        validate_movement(&overview(), "Brand new", &Holder::Admin, 5).unwrap();
    }

    #[test]
    fn restock_cannot_overflow_the_item_total() {
        let ov = overview();
        validate_movement(&ov, "Pen", &Holder::Admin, i64::MAX - 100).unwrap();
        assert_eq!(
            validate_movement(&ov, "Pen", &Holder::Admin, i64::MAX - 99).unwrap_err(),
            ValidationError::QuantityOverflow {
                item: "Pen".to_string(),
                held: 100,
                requested: i64::MAX - 99,
            }
        );
    }

    #[test]
    fn issue_is_limited_by_admin_stock() {
        let ov = overview();
        validate_movement(&ov, "Pen", &Holder::department("Sports"), 70).unwrap();

        let err = validate_movement(&ov, "Pen", &Holder::department("Sports"), 80).unwrap_err();
        assert_eq!(err, ValidationError::insufficient_stock("Pen", "Admin", 70, 80));
    }

    #[test]
    fn first_movement_of_unseen_item_must_be_a_restock() {
        let err =
            validate_movement(&overview(), "Ink", &Holder::department("Sports"), 1).unwrap_err();
        assert_eq!(err, ValidationError::insufficient_stock("Ink", "Admin", 0, 1));
    }

    #[test]
    fn movement_to_unknown_or_write_off_holder_is_rejected() {
        let ov = overview();
        assert_eq!(
            validate_movement(&ov, "Pen", &Holder::department("Library"), 1).unwrap_err(),
            ValidationError::unknown_destination("Library")
        );
        assert_eq!(
            validate_movement(&ov, "Pen", &Holder::LossBreakage, 1).unwrap_err(),
            ValidationError::unknown_destination("Loss/Breakage")
        );
    }

    #[test]
    fn non_positive_quantities_are_invalid() {
        let ov = overview();
        assert_eq!(
            validate_movement(&ov, "Pen", &Holder::Admin, 0).unwrap_err(),
            ValidationError::InvalidQuantity { requested: 0 }
        );
        assert_eq!(
            validate_modification(&ov, "Pen", "Sports", -3).unwrap_err(),
            ValidationError::InvalidQuantity { requested: -3 }
        );
    }

    #[test]
    fn modification_is_limited_by_department_stock() {
        let ov = overview();
        validate_modification(&ov, "Pen", "Sports", 30).unwrap();
        assert_eq!(
            validate_modification(&ov, "Pen", "Sports", 31).unwrap_err(),
            ValidationError::insufficient_stock("Pen", "Sports", 30, 31)
        );
    }

    #[test]
    fn modification_never_creates_items() {
        assert_eq!(
            validate_modification(&overview(), "Ink", "Sports", 1).unwrap_err(),
            ValidationError::unknown_item("Ink")
        );
    }

    #[test]
    fn modification_from_unknown_department_is_rejected() {
        assert_eq!(
            validate_modification(&overview(), "Pen", "Library", 1).unwrap_err(),
            ValidationError::unknown_destination("Library")
        );
    }
}
