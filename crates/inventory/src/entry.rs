use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_events::Event;

use crate::holder::{ADMIN, Holder};

/// Ledger entry: a quantity moved out of Admin to a department, or received
/// into Admin (restock) when `destination` is Admin itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub date: NaiveDate,
    pub category: String,
    pub item: String,
    /// Holder name as recorded ("Admin" for restocks).
    pub destination: String,
    /// Always positive.
    pub quantity: i64,
    /// Admin stock of the item immediately after this entry.
    pub current_stock: i64,
    pub vendor: Option<String>,
    pub invoice_number: Option<String>,
    /// Rounded to 2 places; absent for issuances.
    pub total_price: Option<Decimal>,
}

impl StockMovement {
    pub fn destination_holder(&self) -> Holder {
        Holder::from_name(&self.destination)
    }

    pub fn is_restock(&self) -> bool {
        self.destination == ADMIN
    }
}

/// Corrective action applied to stock held by a department.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModificationAction {
    /// Write-off: department -> Loss/Breakage.
    #[serde(rename = "Mark as Broken")]
    MarkAsBroken,
    /// Return: department -> Admin.
    #[serde(rename = "Return to Admin")]
    ReturnToAdmin,
}

impl ModificationAction {
    /// Label used in the persisted table.
    pub fn label(self) -> &'static str {
        match self {
            Self::MarkAsBroken => "Mark as Broken",
            Self::ReturnToAdmin => "Return to Admin",
        }
    }

    /// Holder that receives the units taken from the department.
    pub fn receiver(self) -> Holder {
        match self {
            Self::MarkAsBroken => Holder::LossBreakage,
            Self::ReturnToAdmin => Holder::Admin,
        }
    }
}

impl core::fmt::Display for ModificationAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl core::str::FromStr for ModificationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mark as Broken" => Ok(Self::MarkAsBroken),
            "Return to Admin" => Ok(Self::ReturnToAdmin),
            other => Err(format!("unknown modification action: {other}")),
        }
    }
}

/// Modification-log entry: a corrective move out of a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    pub date: NaiveDate,
    pub category: String,
    pub item: String,
    pub department: String,
    /// Always positive.
    pub quantity: i64,
    pub action: ModificationAction,
}

/// Anything the session records: one variant per log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "log", rename_all = "snake_case")]
pub enum LedgerEntry {
    Movement(StockMovement),
    Modification(Modification),
}

impl Event for StockMovement {
    fn event_type(&self) -> &'static str {
        if self.is_restock() {
            "inventory.stock.received"
        } else {
            "inventory.stock.issued"
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_on(&self) -> NaiveDate {
        self.date
    }
}

impl Event for Modification {
    fn event_type(&self) -> &'static str {
        match self.action {
            ModificationAction::MarkAsBroken => "inventory.stock.written_off",
            ModificationAction::ReturnToAdmin => "inventory.stock.returned",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_on(&self) -> NaiveDate {
        self.date
    }
}

impl Event for LedgerEntry {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEntry::Movement(e) => e.event_type(),
            LedgerEntry::Modification(e) => e.event_type(),
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_on(&self) -> NaiveDate {
        match self {
            LedgerEntry::Movement(e) => e.date,
            LedgerEntry::Modification(e) => e.date,
        }
    }
}
