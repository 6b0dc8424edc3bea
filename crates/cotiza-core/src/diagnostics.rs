use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::CompanyTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Important,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "critical",
            Severity::Important => "important",
            Severity::Info => "info",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The document could not be read or has no text layer.
    MalformedInput,
    UnidentifiedCompany,
    /// The insurer was identified but no field could be extracted.
    ExtractionFailed,
    PartialExtraction { missing: Vec<String> },
    /// A later document for the same insurer replaced `replaced`.
    DuplicateCompany { company: CompanyTag, replaced: String },
    UnknownField { field: String },
}

/// A per-document problem reported alongside the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// Attach the name of the document the diagnostic is about.
    pub fn for_document(mut self, document: &str) -> Self {
        self.document = Some(document.to_string());
        self
    }

    pub fn malformed_input(reason: &str) -> Self {
        Self {
            document: None,
            kind: DiagnosticKind::MalformedInput,
            severity: Severity::Critical,
            message: format!("could not read document: {reason}"),
        }
    }

    pub fn unidentified_company() -> Self {
        Self {
            document: None,
            kind: DiagnosticKind::UnidentifiedCompany,
            severity: Severity::Important,
            message: "insurer not recognized (supported: HDI, Qualitas, ANA, Atlas)".to_string(),
        }
    }

    pub fn extraction_failed(company: CompanyTag) -> Self {
        Self {
            document: None,
            kind: DiagnosticKind::ExtractionFailed,
            severity: Severity::Important,
            message: format!("no fields found in {} quote", company.display_name()),
        }
    }

    pub fn partial_extraction(missing: &[&str]) -> Self {
        Self {
            document: None,
            kind: DiagnosticKind::PartialExtraction {
                missing: missing.iter().map(|f| f.to_string()).collect(),
            },
            severity: Severity::Info,
            message: format!("{} field(s) not found: {}", missing.len(), missing.join(", ")),
        }
    }

    pub fn duplicate_company(document: &str, company: CompanyTag, replaced: &str) -> Self {
        Self {
            document: Some(document.to_string()),
            kind: DiagnosticKind::DuplicateCompany {
                company,
                replaced: replaced.to_string(),
            },
            severity: Severity::Important,
            message: format!(
                "more than one {} quote; '{}' replaces '{}'",
                company.display_name(),
                document,
                replaced
            ),
        }
    }

    pub fn unknown_field(field: &str) -> Self {
        Self {
            document: None,
            kind: DiagnosticKind::UnknownField {
                field: field.to_string(),
            },
            severity: Severity::Info,
            message: format!("dropped field '{field}' that is not part of the comparison"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.document {
            Some(doc) => write!(f, "[{}] {}: {}", self.severity, doc, self.message),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}
