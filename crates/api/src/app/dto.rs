use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_events::EventEnvelope;
use stockroom_inventory::{
    AddStock, IssueItems, ModificationAction, OverviewRow, OverviewTable, RecordModification,
};

// -------------------------
// Request DTOs
// -------------------------

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Debug, Deserialize)]
pub struct AddStockRequest {
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub category: String,
    pub item: String,
    pub quantity: i64,
    pub vendor: Option<String>,
    pub invoice_number: Option<String>,
    pub total_price: Option<Decimal>,
}

impl From<AddStockRequest> for AddStock {
    fn from(r: AddStockRequest) -> Self {
        Self {
            date: r.date.unwrap_or_else(today),
            category: r.category,
            item: r.item,
            quantity: r.quantity,
            vendor: r.vendor,
            invoice_number: r.invoice_number,
            total_price: r.total_price,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IssueItemsRequest {
    pub date: Option<NaiveDate>,
    pub category: String,
    pub item: String,
    pub department: String,
    pub quantity: i64,
}

impl From<IssueItemsRequest> for IssueItems {
    fn from(r: IssueItemsRequest) -> Self {
        Self {
            date: r.date.unwrap_or_else(today),
            category: r.category,
            item: r.item,
            department: r.department,
            quantity: r.quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ModificationRequest {
    pub date: Option<NaiveDate>,
    pub category: String,
    pub item: String,
    pub department: String,
    pub quantity: i64,
    /// `"Mark as Broken"` or `"Return to Admin"`.
    pub action: ModificationAction,
}

impl From<ModificationRequest> for RecordModification {
    fn from(r: ModificationRequest) -> Self {
        Self {
            date: r.date.unwrap_or_else(today),
            category: r.category,
            item: r.item,
            department: r.department,
            quantity: r.quantity,
            action: r.action,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveDepartmentQuery {
    /// Date of the automatic returns; defaults to today.
    pub date: Option<NaiveDate>,
}

impl RemoveDepartmentQuery {
    pub fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(today)
    }
}

// -------------------------
// Response DTOs
// -------------------------

/// A log entry with its position in its log.
#[derive(Debug, Serialize)]
pub struct LogEntryResponse<'a, T> {
    pub sequence_number: u64,
    #[serde(flatten)]
    pub entry: &'a T,
}

pub fn log_entries<T>(entries: &[EventEnvelope<T>]) -> Vec<LogEntryResponse<'_, T>> {
    entries
        .iter()
        .map(|e| LogEntryResponse {
            sequence_number: e.sequence_number(),
            entry: e.payload(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct DepartmentHolding<'a> {
    pub department: &'a str,
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct OverviewRowResponse<'a> {
    pub item: &'a str,
    pub category: &'a str,
    pub total: i64,
    pub admin: i64,
    pub departments: Vec<DepartmentHolding<'a>>,
    pub loss_breakage: i64,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse<'a> {
    pub departments: &'a [String],
    pub rows: Vec<OverviewRowResponse<'a>>,
    pub grand_total: i64,
}

fn row_response<'a>(departments: &'a [String], row: &'a OverviewRow) -> OverviewRowResponse<'a> {
    OverviewRowResponse {
        item: &row.item,
        category: &row.category,
        total: row.total(),
        admin: row.admin,
        departments: departments
            .iter()
            .zip(&row.departments)
            .map(|(department, &quantity)| DepartmentHolding {
                department,
                quantity,
            })
            .collect(),
        loss_breakage: row.loss_breakage,
    }
}

impl<'a> From<&'a OverviewTable> for OverviewResponse<'a> {
    fn from(table: &'a OverviewTable) -> Self {
        Self {
            departments: table.departments(),
            rows: table
                .rows()
                .iter()
                .map(|row| row_response(table.departments(), row))
                .collect(),
            grand_total: table.grand_total(),
        }
    }
}
