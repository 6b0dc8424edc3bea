use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::fields::MASTER_FIELDS;

/// Insurer a quote document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyTag {
    Hdi,
    Qualitas,
    Ana,
    Atlas,
    Unknown,
}

impl CompanyTag {
    /// Insurers with an extraction profile, ordered by display name.
    pub const KNOWN: [CompanyTag; 4] = [
        CompanyTag::Ana,
        CompanyTag::Hdi,
        CompanyTag::Qualitas,
        CompanyTag::Atlas,
    ];

    /// Name shown in table headers. Columns are sorted by this name.
    pub fn display_name(&self) -> &'static str {
        match self {
            CompanyTag::Hdi => "HDI Seguros",
            CompanyTag::Qualitas => "Qualitas",
            CompanyTag::Ana => "ANA Seguros",
            CompanyTag::Atlas => "Seguros Atlas",
            CompanyTag::Unknown => "Desconocida",
        }
    }

    /// Short key used in profile files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            CompanyTag::Hdi => "hdi",
            CompanyTag::Qualitas => "qualitas",
            CompanyTag::Ana => "ana",
            CompanyTag::Atlas => "atlas",
            CompanyTag::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CompanyTag::Unknown)
    }

    pub fn from_str_loose(s: &str) -> Option<CompanyTag> {
        let upper = s.trim().to_uppercase();
        if upper.contains("HDI") {
            Some(CompanyTag::Hdi)
        } else if upper.contains("QUALITAS") || upper.contains("QUÁLITAS") {
            Some(CompanyTag::Qualitas)
        } else if upper.contains("ATLAS") {
            Some(CompanyTag::Atlas)
        } else if upper == "ANA" || upper.starts_with("ANA ") {
            Some(CompanyTag::Ana)
        } else {
            None
        }
    }
}

impl fmt::Display for CompanyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A normalized field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    /// Currency amount, always carried with two decimal places.
    Amount(Decimal),
    /// Percentage without the `%` sign.
    Percent(Decimal),
    Text(String),
}

impl FieldValue {
    pub fn amount(value: Decimal) -> FieldValue {
        FieldValue::Amount(to_cents(value))
    }

    pub fn percent(value: Decimal) -> FieldValue {
        FieldValue::Percent(value.normalize())
    }

    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            FieldValue::Amount(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Amount(v) => write!(f, "{}", to_cents(*v)),
            FieldValue::Percent(v) => write!(f, "{}", v.normalize()),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Round to cents and fix the scale so `15000` displays as `15000.00`.
pub(crate) fn to_cents(value: Decimal) -> Decimal {
    let mut v = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    v.rescale(2);
    v
}

/// Fields extracted from one quote document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub company: CompanyTag,
    /// Keys are members of [`MASTER_FIELDS`]. Absent fields are simply not present.
    pub fields: BTreeMap<String, FieldValue>,
    /// Vehicle descriptor, when the document names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
}

impl ExtractionResult {
    pub fn new(company: CompanyTag) -> Self {
        Self {
            company,
            fields: BTreeMap::new(),
            vehicle: None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn amount(&self, field: &str) -> Option<Decimal> {
        self.get(field).and_then(FieldValue::as_amount)
    }

    pub fn insert(&mut self, field: &str, value: FieldValue) {
        self.fields.insert(field.to_string(), value);
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Master fields this result has no value for, in master order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        MASTER_FIELDS
            .iter()
            .copied()
            .filter(|f| !self.fields.contains_key(*f))
            .collect()
    }

    /// Present fields in master order.
    pub fn ordered(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        MASTER_FIELDS
            .iter()
            .filter_map(|f| self.fields.get(*f).map(|v| (*f, v)))
    }
}

/// One document handed to the comparison pipeline.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// File name or other label used in diagnostics.
    pub name: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}
