//! Catalog manager: the department and item-category vocabularies.
//!
//! All membership checks go through these registries; callers never compare
//! holder or category strings on their own.

use serde::{Deserialize, Serialize};

use stockroom_core::{ValidationError, ValidationResult};

use crate::holder::Holder;
use crate::overview::LEADING_COLUMNS;

pub const DEFAULT_DEPARTMENTS: [&str; 8] = [
    "Junior block",
    "Middle block",
    "Senior block",
    "Sports",
    "Arts",
    "Boys hostel",
    "Girls hostel",
    "Owner",
];

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Housekeeping assets",
    "Housekeeping consumables",
    "Electrical equipment",
    "Hardware",
    "Gardening equipment",
    "Stationary",
    "Furnitures and fixtures",
    "Sports equipment",
];

/// Which vocabulary a catalog operation targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogKind {
    Department,
    Category,
}

impl CatalogKind {
    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Department => "department",
            CatalogKind::Category => "category",
        }
    }
}

/// Insertion-ordered set of names (case-sensitive, exact match).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    members: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from names, dropping repeats (first occurrence wins).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for name in names {
            registry.insert(name.into());
        }
        registry
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Returns `false` when the name was already a member.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.members.push(name);
        true
    }

    /// Returns `false` when the name was not a member.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != name);
        self.members.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Department vocabulary.
///
/// Removed departments are retired rather than forgotten: historical ledger
/// rows still name them, and the fold keeps tracking their balance (zero after
/// removal) so those rows replay consistently. Only active departments appear
/// as overview columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departments {
    active: Registry,
    retired: Registry,
}

impl Departments {
    pub fn new(active: Registry, retired: Registry) -> Self {
        // A name is either active or retired, never both.
        let retired = Registry::from_names(retired.iter().filter(|n| !active.contains(n)));
        Self { active, retired }
    }

    pub fn active(&self) -> &[String] {
        self.active.as_slice()
    }

    pub fn retired(&self) -> &[String] {
        self.retired.as_slice()
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains(name)
    }

    /// Active or retired: the fold tracks balances for every known department.
    pub fn is_known(&self, name: &str) -> bool {
        self.active.contains(name) || self.retired.contains(name)
    }
}

/// Both vocabularies, owned by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    departments: Departments,
    categories: Registry,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Catalog {
    /// Initial state, also restored by the destructive reset.
    pub fn with_defaults() -> Self {
        Self {
            departments: Departments::new(
                Registry::from_names(DEFAULT_DEPARTMENTS),
                Registry::new(),
            ),
            categories: Registry::from_names(DEFAULT_CATEGORIES),
        }
    }

    pub fn new(departments: Departments, categories: Registry) -> Self {
        Self {
            departments,
            categories,
        }
    }

    pub fn departments(&self) -> &Departments {
        &self.departments
    }

    pub fn categories(&self) -> &Registry {
        &self.categories
    }

    pub fn contains(&self, kind: CatalogKind, name: &str) -> bool {
        match kind {
            CatalogKind::Department => self.departments.is_active(name),
            CatalogKind::Category => self.categories.contains(name),
        }
    }

    /// Names are stored trimmed.
    pub fn add(&mut self, kind: CatalogKind, name: &str) -> ValidationResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField {
                field: kind.label(),
            });
        }
        if self.contains(kind, name) {
            return Err(ValidationError::already_exists(kind.label(), name));
        }

        match kind {
            CatalogKind::Department => {
                // Built-in holders, and the fixed columns of the rendered overview.
                if Holder::is_reserved(name) || LEADING_COLUMNS.contains(&name) {
                    return Err(ValidationError::ReservedName {
                        name: name.to_string(),
                    });
                }
                // Re-adding a retired department reactivates it.
                self.departments.retired.remove(name);
                self.departments.active.insert(name);
            }
            CatalogKind::Category => {
                self.categories.insert(name);
            }
        }
        Ok(())
    }

    /// Remove a member. Departments are retired, see [`Departments`].
    pub fn remove(&mut self, kind: CatalogKind, name: &str) -> ValidationResult<()> {
        let name = name.trim();
        if !self.contains(kind, name) {
            return Err(ValidationError::not_found(kind.label(), name));
        }

        match kind {
            CatalogKind::Department => {
                self.departments.active.remove(name);
                self.departments.retired.insert(name);
            }
            CatalogKind::Category => {
                self.categories.remove(name);
            }
        }
        Ok(())
    }
}
