//! Validation error model.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Domain-level validation failure.
///
/// Every variant is recoverable and local: the rejected operation leaves the
/// ledger, the overview and the catalog untouched. Variants carry enough
/// context (names, available vs requested quantities) for a caller to render a
/// precise message without re-querying state.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ValidationError {
    /// The holder does not have enough of the item to cover the request.
    #[error("not enough {item} held by {holder}: available {available}, requested {requested}")]
    InsufficientStock {
        item: String,
        holder: String,
        available: i64,
        requested: i64,
    },

    /// The holder name is not an active department (nor Admin where Admin is allowed).
    #[error("unknown destination: {holder}")]
    UnknownDestination { holder: String },

    /// Modifications can only target items that already exist.
    #[error("unknown item: {item}")]
    UnknownItem { item: String },

    /// The item category is not registered in the catalog.
    #[error("unknown item category: {category}")]
    UnknownCategory { category: String },

    /// An existing item was referenced with a different category.
    #[error("item {item} has category {expected}, not {found}")]
    CategoryMismatch {
        item: String,
        expected: String,
        found: String,
    },

    /// A catalog member with this exact name already exists.
    #[error("{kind} already exists: {name}")]
    AlreadyExists { kind: &'static str, name: String },

    /// No catalog member with this exact name exists.
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// Receiving the quantity would push the item's total past the counter range.
    #[error("{item} cannot grow past {held} held units by {requested}")]
    QuantityOverflow {
        item: String,
        held: i64,
        requested: i64,
    },

    /// Quantities must be positive integers.
    #[error("invalid quantity: {requested} (must be at least 1)")]
    InvalidQuantity { requested: i64 },

    /// Monetary totals cannot be negative.
    #[error("invalid total price: {price}")]
    InvalidPrice { price: String },

    /// The name belongs to a built-in holder and cannot be registered.
    #[error("reserved name: {name}")]
    ReservedName { name: String },

    /// A mandatory field was blank.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

impl ValidationError {
    pub fn insufficient_stock(
        item: impl Into<String>,
        holder: impl Into<String>,
        available: i64,
        requested: i64,
    ) -> Self {
        Self::InsufficientStock {
            item: item.into(),
            holder: holder.into(),
            available,
            requested,
        }
    }

    pub fn unknown_destination(holder: impl Into<String>) -> Self {
        Self::UnknownDestination {
            holder: holder.into(),
        }
    }

    pub fn unknown_item(item: impl Into<String>) -> Self {
        Self::UnknownItem { item: item.into() }
    }

    pub fn already_exists(kind: &'static str, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind,
            name: name.into(),
        }
    }

    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Stable machine-readable code (matches the serialized `error` tag).
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientStock { .. } => "insufficient_stock",
            Self::UnknownDestination { .. } => "unknown_destination",
            Self::UnknownItem { .. } => "unknown_item",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::CategoryMismatch { .. } => "category_mismatch",
            Self::AlreadyExists { .. } => "already_exists",
            Self::NotFound { .. } => "not_found",
            Self::QuantityOverflow { .. } => "quantity_overflow",
            Self::InvalidQuantity { .. } => "invalid_quantity",
            Self::InvalidPrice { .. } => "invalid_price",
            Self::ReservedName { .. } => "reserved_name",
            Self::EmptyField { .. } => "empty_field",
        }
    }
}
