use serde::{Deserialize, Serialize};

use crate::model::CompanyTag;

/// Default lookahead after an anchor, in characters.
pub const DEFAULT_WINDOW: usize = 250;

/// Extraction rules for one insurer's quote layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorProfileDef {
    pub company: CompanyTag,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Evaluated in order, one rule per target field.
    pub rules: Vec<FieldRuleDef>,
}

/// How to locate and normalize one field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRuleDef {
    /// Canonical field name from the master field list.
    pub field: String,
    pub kind: ValueKind,
    /// Alternative labels, tried in order. Matched case-insensitively.
    pub anchors: Vec<String>,
    /// Secondary label that must follow the anchor inside the window.
    #[serde(default)]
    pub then: Option<String>,
    /// Lookahead after the anchor, in characters.
    #[serde(default)]
    pub window: Option<usize>,
    /// Labels that end the window early (the next row of the layout).
    #[serde(default)]
    pub stop_at: Vec<String>,
    /// Longer labels that begin with an anchor; an anchor occurrence that
    /// starts one of these is skipped.
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl FieldRuleDef {
    pub fn window(&self) -> usize {
        self.window.unwrap_or(DEFAULT_WINDOW)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Money amount, normalized to two decimals.
    Currency,
    /// Percentage, normalized to a bare number.
    Percent,
    /// Free text up to the end of the line.
    Text,
    /// "Amparada" / "No Amparada" markers.
    Coverage,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValueKind::Currency => "currency",
            ValueKind::Percent => "percent",
            ValueKind::Text => "text",
            ValueKind::Coverage => "coverage",
        };
        f.pad(s)
    }
}
