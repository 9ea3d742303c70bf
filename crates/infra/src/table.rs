//! Persisted tables and their CSV encoding.
//!
//! Encoding is deterministic: the same state always renders the same bytes,
//! and decoding then re-encoding a table written here reproduces it exactly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_inventory::{
    ADMIN, Catalog, Departments, LEADING_COLUMNS, LOSS_BREAKAGE, Modification, ModificationAction,
    OverviewTable, Registry, StockMovement,
};

/// The four persisted tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    Ledger,
    Overview,
    Modifications,
    Catalog,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::Ledger,
        Table::Overview,
        Table::Modifications,
        Table::Catalog,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Table::Ledger => "Ledger.csv",
            Table::Overview => "Overview.csv",
            Table::Modifications => "Modifications.csv",
            Table::Catalog => "Catalog.csv",
        }
    }

    /// Resolve `ledger`, `Ledger` or `Ledger.csv`.
    pub fn from_name(name: &str) -> Option<Table> {
        let stem = name.strip_suffix(".csv").unwrap_or(name);
        Table::ALL
            .into_iter()
            .find(|t| t.file_name().trim_end_matches(".csv").eq_ignore_ascii_case(stem))
    }
}

impl core::fmt::Display for Table {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush csv writer: {0}")]
    Flush(String),

    #[error("unexpected header in {table}: expected [{expected}], found [{found}]")]
    Header {
        table: Table,
        expected: String,
        found: String,
    },
}

const LEDGER_HEADER: [&str; 9] = [
    "Date",
    "Type",
    "Item Name",
    "Department",
    "Quantity Issued",
    "Current Stock",
    "Vendor Name",
    "Invoice Number",
    "Total Price",
];

const MODIFICATIONS_HEADER: [&str; 6] = [
    "Date",
    "Type",
    "Item Name",
    "Department",
    "Quantity",
    "Action",
];

const CATALOG_HEADER: [&str; 3] = ["Kind", "Name", "Status"];

#[derive(Debug, Serialize, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Type")]
    category: String,
    #[serde(rename = "Item Name")]
    item: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Quantity Issued")]
    quantity: i64,
    #[serde(rename = "Current Stock")]
    current_stock: i64,
    #[serde(rename = "Vendor Name")]
    vendor: Option<String>,
    #[serde(rename = "Invoice Number")]
    invoice_number: Option<String>,
    #[serde(rename = "Total Price", with = "rust_decimal::serde::str_option")]
    total_price: Option<Decimal>,
}

impl From<&StockMovement> for LedgerRow {
    fn from(m: &StockMovement) -> Self {
        Self {
            date: m.date,
            category: m.category.clone(),
            item: m.item.clone(),
            department: m.destination.clone(),
            quantity: m.quantity,
            current_stock: m.current_stock,
            vendor: m.vendor.clone(),
            invoice_number: m.invoice_number.clone(),
            total_price: m.total_price,
        }
    }
}

impl From<LedgerRow> for StockMovement {
    fn from(r: LedgerRow) -> Self {
        Self {
            date: r.date,
            category: r.category,
            item: r.item,
            destination: r.department,
            quantity: r.quantity,
            current_stock: r.current_stock,
            vendor: r.vendor,
            invoice_number: r.invoice_number,
            total_price: r.total_price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ModificationRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Type")]
    category: String,
    #[serde(rename = "Item Name")]
    item: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Quantity")]
    quantity: i64,
    #[serde(rename = "Action")]
    action: ModificationAction,
}

impl From<&Modification> for ModificationRow {
    fn from(m: &Modification) -> Self {
        Self {
            date: m.date,
            category: m.category.clone(),
            item: m.item.clone(),
            department: m.department.clone(),
            quantity: m.quantity,
            action: m.action,
        }
    }
}

impl From<ModificationRow> for Modification {
    fn from(r: ModificationRow) -> Self {
        Self {
            date: r.date,
            category: r.category,
            item: r.item,
            department: r.department,
            quantity: r.quantity,
            action: r.action,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum CatalogRowKind {
    Department,
    Category,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum CatalogRowStatus {
    Active,
    Retired,
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Kind")]
    kind: CatalogRowKind,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Status")]
    status: CatalogRowStatus,
}

fn writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new())
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, CodecError> {
    wtr.into_inner().map_err(|e| CodecError::Flush(e.to_string()))
}

/// Header first, then one record per row; an empty table is just the header.
fn encode_rows<R: Serialize>(
    header: &[&str],
    rows: impl IntoIterator<Item = R>,
) -> Result<Vec<u8>, CodecError> {
    let mut wtr = writer();
    wtr.write_record(header)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    finish(wtr)
}

fn decode_rows<R: for<'de> Deserialize<'de>>(
    table: Table,
    header: &[&str],
    bytes: &[u8],
) -> Result<Vec<R>, CodecError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let mut rdr = csv::Reader::from_reader(bytes);
    let found = rdr.headers()?;
    if !found.iter().eq(header.iter().copied()) {
        return Err(CodecError::Header {
            table,
            expected: header.join(", "),
            found: found.iter().collect::<Vec<_>>().join(", "),
        });
    }

    rdr.deserialize()
        .map(|row| row.map_err(CodecError::from))
        .collect()
}

pub fn encode_ledger<'a>(
    movements: impl IntoIterator<Item = &'a StockMovement>,
) -> Result<Vec<u8>, CodecError> {
    encode_rows(&LEDGER_HEADER, movements.into_iter().map(LedgerRow::from))
}

pub fn decode_ledger(bytes: &[u8]) -> Result<Vec<StockMovement>, CodecError> {
    let rows: Vec<LedgerRow> = decode_rows(Table::Ledger, &LEDGER_HEADER, bytes)?;
    Ok(rows.into_iter().map(StockMovement::from).collect())
}

pub fn encode_modifications<'a>(
    modifications: impl IntoIterator<Item = &'a Modification>,
) -> Result<Vec<u8>, CodecError> {
    encode_rows(
        &MODIFICATIONS_HEADER,
        modifications.into_iter().map(ModificationRow::from),
    )
}

pub fn decode_modifications(bytes: &[u8]) -> Result<Vec<Modification>, CodecError> {
    let rows: Vec<ModificationRow> =
        decode_rows(Table::Modifications, &MODIFICATIONS_HEADER, bytes)?;
    Ok(rows.into_iter().map(Modification::from).collect())
}

pub fn encode_catalog(catalog: &Catalog) -> Result<Vec<u8>, CodecError> {
    let departments = catalog.departments();
    let row = |kind, status, name: &String| CatalogRow {
        kind,
        name: name.clone(),
        status,
    };

    let rows = departments
        .active()
        .iter()
        .map(|n| row(CatalogRowKind::Department, CatalogRowStatus::Active, n))
        .chain(
            departments
                .retired()
                .iter()
                .map(|n| row(CatalogRowKind::Department, CatalogRowStatus::Retired, n)),
        )
        .chain(
            catalog
                .categories()
                .as_slice()
                .iter()
                .map(|n| row(CatalogRowKind::Category, CatalogRowStatus::Active, n)),
        );
    encode_rows(&CATALOG_HEADER, rows)
}

/// Retired categories are not a thing; such rows are skipped.
pub fn decode_catalog(bytes: &[u8]) -> Result<Catalog, CodecError> {
    let rows: Vec<CatalogRow> = decode_rows(Table::Catalog, &CATALOG_HEADER, bytes)?;

    let mut active = Registry::new();
    let mut retired = Registry::new();
    let mut categories = Registry::new();
    for row in rows {
        match (row.kind, row.status) {
            (CatalogRowKind::Department, CatalogRowStatus::Active) => active.insert(row.name),
            (CatalogRowKind::Department, CatalogRowStatus::Retired) => retired.insert(row.name),
            (CatalogRowKind::Category, CatalogRowStatus::Active) => categories.insert(row.name),
            (CatalogRowKind::Category, CatalogRowStatus::Retired) => false,
        };
    }
    Ok(Catalog::new(Departments::new(active, retired), categories))
}

/// Render the overview with its dynamic header:
/// `Item Name, Type, Total, Admin, <departments>, Loss/Breakage`.
pub fn encode_overview(overview: &OverviewTable) -> Result<Vec<u8>, CodecError> {
    let mut wtr = writer();

    let mut header: Vec<&str> = LEADING_COLUMNS.to_vec();
    header.push(ADMIN);
    header.extend(overview.departments().iter().map(String::as_str));
    header.push(LOSS_BREAKAGE);
    wtr.write_record(&header)?;

    for row in overview.rows() {
        let mut record = vec![
            row.item.clone(),
            row.category.clone(),
            row.total().to_string(),
            row.admin.to_string(),
        ];
        record.extend(row.departments.iter().map(i64::to_string));
        record.push(row.loss_breakage.to_string());
        wtr.write_record(&record)?;
    }
    finish(wtr)
}
