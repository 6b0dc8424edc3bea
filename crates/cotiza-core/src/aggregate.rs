use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::diagnostics::Diagnostic;
use crate::fields::{is_master_field, MASTER_FIELDS};
use crate::model::{CompanyTag, ExtractionResult};

/// An extraction result together with the document it came from.
#[derive(Debug, Clone)]
pub struct LabeledResult {
    pub source: String,
    pub result: ExtractionResult,
}

/// One insurer's column of the comparison grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyColumn {
    pub company: CompanyTag,
    pub display_name: String,
    /// Document the values were taken from.
    pub source: String,
    /// `values[i]` belongs to `ComparisonTable::fields[i]`.
    pub values: Vec<String>,
}

/// Side-by-side comparison: one row per master field, one column per insurer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub fields: Vec<String>,
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    pub columns: Vec<CompanyColumn>,
}

impl ComparisonTable {
    pub fn cell(&self, company: CompanyTag, field: &str) -> Option<&str> {
        let row = self.fields.iter().position(|f| f == field)?;
        let column = self.columns.iter().find(|c| c.company == company)?;
        column.values.get(row).map(String::as_str)
    }

    pub fn companies(&self) -> Vec<CompanyTag> {
        self.columns.iter().map(|c| c.company).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct AggregateOutput {
    pub table: ComparisonTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Merge per-document results into one rectangular table.
///
/// Unknown results contribute no column. When two documents belong to the
/// same insurer the later one replaces the earlier one.
pub fn aggregate(results: &[LabeledResult], placeholder: &str) -> AggregateOutput {
    let mut diagnostics = Vec::new();
    let mut by_company: BTreeMap<CompanyTag, &LabeledResult> = BTreeMap::new();

    for labeled in results {
        let company = labeled.result.company;
        if !company.is_known() {
            continue;
        }
        if let Some(previous) = by_company.insert(company, labeled) {
            warn!(
                company = company.key(),
                kept = %labeled.source,
                replaced = %previous.source,
                "duplicate quote for insurer"
            );
            diagnostics.push(Diagnostic::duplicate_company(
                &labeled.source,
                company,
                &previous.source,
            ));
        }
    }

    let mut kept: Vec<&LabeledResult> = by_company.into_values().collect();
    kept.sort_by_key(|l| l.result.company.display_name());

    let mut columns = Vec::with_capacity(kept.len());
    for labeled in &kept {
        for field in labeled.result.fields.keys() {
            if !is_master_field(field) {
                diagnostics.push(Diagnostic::unknown_field(field).for_document(&labeled.source));
            }
        }

        let values = MASTER_FIELDS
            .iter()
            .map(|f| match labeled.result.get(f) {
                Some(value) => value.to_string(),
                None => placeholder.to_string(),
            })
            .collect();

        columns.push(CompanyColumn {
            company: labeled.result.company,
            display_name: labeled.result.company.display_name().to_string(),
            source: labeled.source.clone(),
            values,
        });
    }

    let vehicle = kept.iter().find_map(|l| l.result.vehicle.clone());

    AggregateOutput {
        table: ComparisonTable {
            fields: MASTER_FIELDS.iter().map(|f| f.to_string()).collect(),
            placeholder: placeholder.to_string(),
            vehicle,
            columns,
        },
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::fields;
    use crate::model::FieldValue;
    use rust_decimal_macros::dec;

    fn labeled(source: &str, company: CompanyTag, fields: &[(&str, FieldValue)]) -> LabeledResult {
        let mut result = ExtractionResult::new(company);
        for (field, value) in fields {
            result.insert(field, value.clone());
        }
        LabeledResult {
            source: source.to_string(),
            result,
        }
    }

    #[test]
    fn test_rectangular_with_placeholder() {
        let results = vec![
            labeled(
                "hdi.pdf",
                CompanyTag::Hdi,
                &[(fields::PRIMA_TOTAL, FieldValue::amount(dec!(15000)))],
            ),
            labeled("ana.pdf", CompanyTag::Ana, &[]),
        ];
        let out = aggregate(&results, "No disponible");

        assert_eq!(out.table.columns.len(), 2);
        for column in &out.table.columns {
            assert_eq!(column.values.len(), MASTER_FIELDS.len());
        }
        assert_eq!(
            out.table.cell(CompanyTag::Hdi, fields::PRIMA_TOTAL),
            Some("15000.00")
        );
        assert_eq!(
            out.table.cell(CompanyTag::Hdi, fields::IVA),
            Some("No disponible")
        );
        assert_eq!(
            out.table.cell(CompanyTag::Ana, fields::PRIMA_TOTAL),
            Some("No disponible")
        );
    }

    #[test]
    fn test_fields_follow_master_order() {
        let out = aggregate(&[labeled("a", CompanyTag::Atlas, &[])], "-");
        assert_eq!(out.table.fields, MASTER_FIELDS);
    }

    #[test]
    fn test_unknown_contributes_no_column() {
        let results = vec![
            labeled("x.pdf", CompanyTag::Unknown, &[]),
            labeled("q.pdf", CompanyTag::Qualitas, &[]),
        ];
        let out = aggregate(&results, "-");
        assert_eq!(out.table.companies(), vec![CompanyTag::Qualitas]);
    }

    #[test]
    fn test_duplicate_company_last_wins() {
        let results = vec![
            labeled(
                "first.pdf",
                CompanyTag::Hdi,
                &[(fields::PRIMA_TOTAL, FieldValue::amount(dec!(1000)))],
            ),
            labeled(
                "second.pdf",
                CompanyTag::Hdi,
                &[(fields::PRIMA_TOTAL, FieldValue::amount(dec!(2000)))],
            ),
        ];
        let out = aggregate(&results, "-");

        assert_eq!(out.table.columns.len(), 1);
        assert_eq!(out.table.columns[0].source, "second.pdf");
        assert_eq!(
            out.table.cell(CompanyTag::Hdi, fields::PRIMA_TOTAL),
            Some("2000.00")
        );
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(
            out.diagnostics[0].kind,
            DiagnosticKind::DuplicateCompany {
                company: CompanyTag::Hdi,
                replaced: "first.pdf".into()
            }
        );
    }

    #[test]
    fn test_columns_sorted_by_display_name() {
        let results = vec![
            labeled("1", CompanyTag::Atlas, &[]),
            labeled("2", CompanyTag::Qualitas, &[]),
            labeled("3", CompanyTag::Hdi, &[]),
            labeled("4", CompanyTag::Ana, &[]),
        ];
        let out = aggregate(&results, "-");
        let names: Vec<_> = out
            .table
            .columns
            .iter()
            .map(|c| c.display_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["ANA Seguros", "HDI Seguros", "Qualitas", "Seguros Atlas"]
        );
    }

    #[test]
    fn test_unknown_field_dropped_with_diagnostic() {
        let results = vec![labeled(
            "a.pdf",
            CompanyTag::Ana,
            &[("Prima Extra", FieldValue::Text("x".into()))],
        )];
        let out = aggregate(&results, "-");
        assert!(out.table.columns[0].values.iter().all(|v| v == "-"));
        assert_eq!(
            out.diagnostics[0].kind,
            DiagnosticKind::UnknownField {
                field: "Prima Extra".into()
            }
        );
    }

    #[test]
    fn test_vehicle_from_first_column() {
        let mut atlas = labeled("a", CompanyTag::Atlas, &[]);
        atlas.result.vehicle = Some("NISSAN VERSA".into());
        let mut ana = labeled("b", CompanyTag::Ana, &[]);
        ana.result.vehicle = Some("VOLKSWAGEN JETTA".into());

        let out = aggregate(&[atlas, ana], "-");
        assert_eq!(out.table.vehicle.as_deref(), Some("VOLKSWAGEN JETTA"));
    }

    #[test]
    fn test_empty_input() {
        let out = aggregate(&[], "-");
        assert!(out.table.is_empty());
        assert_eq!(out.table.fields.len(), MASTER_FIELDS.len());
    }
}
