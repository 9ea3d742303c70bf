use serde::{Deserialize, Serialize};

/// Name of the central store in ledger rows and overview columns.
pub const ADMIN: &str = "Admin";

/// Name of the write-off bucket in overview columns.
pub const LOSS_BREAKAGE: &str = "Loss/Breakage";

/// An entity that can possess item stock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Holder {
    /// Central store; every unit enters the system here.
    Admin,
    /// A registered (or formerly registered) department.
    Department(String),
    /// Units written off as lost or broken.
    LossBreakage,
}

impl Holder {
    pub fn department(name: impl Into<String>) -> Self {
        Self::Department(name.into())
    }

    /// Resolve a holder from the name stored in a ledger row.
    ///
    /// The built-in names can never be registered as departments, so this is
    /// unambiguous.
    pub fn from_name(name: &str) -> Self {
        match name {
            ADMIN => Self::Admin,
            LOSS_BREAKAGE => Self::LossBreakage,
            other => Self::Department(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Admin => ADMIN,
            Self::Department(name) => name,
            Self::LossBreakage => LOSS_BREAKAGE,
        }
    }

    /// Whether `name` belongs to a built-in holder.
    pub fn is_reserved(name: &str) -> bool {
        name == ADMIN || name == LOSS_BREAKAGE
    }
}

impl core::fmt::Display for Holder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
