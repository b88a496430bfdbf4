//! Semantic roles and the role-to-column mapping result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed business meanings a source column may be assigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SemanticRole {
    Id,
    Name,
    Description,
    HourlyRate,
    AvailableFrom,
    AvailableTo,
}

impl SemanticRole {
    /// All roles in their resolution priority order: the keyword pass runs
    /// once per role in exactly this sequence.
    pub const PRIORITY: [Self; 6] = [
        Self::Name,
        Self::Id,
        Self::Description,
        Self::HourlyRate,
        Self::AvailableFrom,
        Self::AvailableTo,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::HourlyRate => "hourly_rate",
            Self::AvailableFrom => "available_from",
            Self::AvailableTo => "available_to",
        }
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a role ended up bound to a column. Carried into the operator report
/// so heuristic outcomes stay inspectable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "detail", rename_all = "snake_case")]
pub enum MatchReason {
    /// The column identifier contained this keyword.
    Keyword(String),
    /// More than the threshold share of sampled values looked like plain numbers.
    NumericShape,
    /// Defaulted to the table's first column.
    FirstColumn,
    /// The identifier contained `unnamed` or `popis`.
    UnnamedScan,
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(keyword) => write!(f, "keyword '{keyword}'"),
            Self::NumericShape => write!(f, "numeric shape"),
            Self::FirstColumn => write!(f, "first column"),
            Self::UnnamedScan => write!(f, "unnamed/popis scan"),
        }
    }
}

/// One resolved role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBinding {
    pub role: SemanticRole,
    /// Cleaned column identifier the role resolved to.
    pub column: String,
    pub reason: MatchReason,
}

/// The role-to-column mapping produced once per cleaned table.
///
/// Not every role need resolve; `description` in particular may stay
/// unresolved. The same column may back two roles (e.g. a single-column
/// table is both `id` and `name`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMap {
    bindings: Vec<RoleBinding>,
    /// Cleaned identifiers no role claimed, in table order.
    pub unmapped_columns: Vec<String>,
}

impl RoleMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a role to a column. A role already bound keeps its first
    /// binding; the mapper never assigns a role twice.
    pub fn bind(&mut self, role: SemanticRole, column: impl Into<String>, reason: MatchReason) {
        if !self.is_resolved(role) {
            self.bindings.push(RoleBinding {
                role,
                column: column.into(),
                reason,
            });
        }
    }

    #[must_use]
    pub fn is_resolved(&self, role: SemanticRole) -> bool {
        self.bindings.iter().any(|binding| binding.role == role)
    }

    #[must_use]
    pub fn column_for(&self, role: SemanticRole) -> Option<&str> {
        self.bindings
            .iter()
            .find(|binding| binding.role == role)
            .map(|binding| binding.column.as_str())
    }

    #[must_use]
    pub fn binding_for(&self, role: SemanticRole) -> Option<&RoleBinding> {
        self.bindings.iter().find(|binding| binding.role == role)
    }

    pub fn bindings(&self) -> &[RoleBinding] {
        &self.bindings
    }

    /// Records the columns no role claimed.
    pub fn set_unmapped(&mut self, columns: Vec<String>) {
        self.unmapped_columns = columns;
    }
}
