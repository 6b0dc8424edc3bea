/// Property-based tests using proptest
/// Extraction is best-effort against arbitrary text: it must never panic,
/// and its outputs must keep their shape whatever the input.
use cotiza_core::aggregate::{aggregate, LabeledResult};
use cotiza_core::extract::{ExtractorSet, QuoteExtractor};
use cotiza_core::fields::{is_master_field, MASTER_FIELDS};
use cotiza_core::identify::identify;
use cotiza_core::model::{CompanyTag, ExtractionResult, FieldValue};
use cotiza_core::parsing::values::{normalize_amount, parse_amount};
use cotiza_core::{parse_text, CompareOptions};
use proptest::prelude::*;

fn company() -> impl Strategy<Value = CompanyTag> {
    prop_oneof![
        Just(CompanyTag::Hdi),
        Just(CompanyTag::Qualitas),
        Just(CompanyTag::Ana),
        Just(CompanyTag::Atlas),
        Just(CompanyTag::Unknown),
    ]
}

/// Format an integer with Mexican thousands separators.
fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// Property: identification is total and deterministic
proptest! {
    #[test]
    fn identify_never_panics(text in "\\PC*") {
        let first = identify(&text);
        prop_assert_eq!(first, identify(&text));
    }

    #[test]
    fn identify_finds_marker_in_noise(prefix in "[a-z0-9 \\n]{0,40}", suffix in "[a-z0-9 \\n]{0,40}") {
        let text = format!("{prefix}\nQUÁLITAS COMPAÑÍA DE SEGUROS\n{suffix}");
        prop_assert_eq!(identify(&text), CompanyTag::Qualitas);
    }
}

// Property: extractors never panic and only produce master fields
proptest! {
    #[test]
    fn extract_never_panics(text in "\\PC*") {
        let set = ExtractorSet::builtin().unwrap();
        let options = CompareOptions::default();
        for company in set.companies() {
            let result = set.get(company).unwrap().extract(&text, &options);
            prop_assert!(result.fields.keys().all(|k| is_master_field(k)));
        }
    }

    #[test]
    fn extract_never_panics_on_labelled_noise(
        noise in "[ $:%,.0-9A-Za-zÁÉÍÓÚÑáéíóúñ\\n-]{0,200}"
    ) {
        let set = ExtractorSet::builtin().unwrap();
        let options = CompareOptions::default();
        let text = format!(
            "Daños Materiales{noise}Deducible{noise}Prima Neta{noise}IVA{noise}Forma de Pago{noise}"
        );
        for company in set.companies() {
            let _ = set.get(company).unwrap().extract(&text, &options);
        }
    }

    #[test]
    fn parse_text_never_panics(text in "\\PC*") {
        let set = ExtractorSet::builtin().unwrap();
        let outcome = parse_text(&format!("SEGUROS ATLAS {text}"), &set, &CompareOptions::default());
        prop_assert_eq!(outcome.company, CompanyTag::Atlas);
    }
}

// Property: currency normalization is idempotent
proptest! {
    #[test]
    fn normalize_amount_idempotent(pesos in 0u64..10_000_000_000, cents in 0u32..100) {
        let raw = format!("${}.{:02}", with_thousands(pesos), cents);
        let once = normalize_amount(&raw).unwrap();
        prop_assert_eq!(normalize_amount(&once), Some(once.clone()));
        prop_assert_eq!(once, format!("{}.{:02}", pesos, cents));
    }

    #[test]
    fn parse_amount_never_panics(s in "\\PC*") {
        let _ = parse_amount(&s);
    }
}

// Property: aggregation is always a complete grid
proptest! {
    #[test]
    fn aggregate_is_rectangular(
        docs in proptest::collection::vec((company(), proptest::collection::vec(0usize..18, 0..18)), 0..8)
    ) {
        let results: Vec<LabeledResult> = docs
            .iter()
            .enumerate()
            .map(|(i, (company, present))| {
                let mut result = ExtractionResult::new(*company);
                for idx in present {
                    result.insert(MASTER_FIELDS[*idx], FieldValue::Text("x".into()));
                }
                LabeledResult { source: format!("doc{i}"), result }
            })
            .collect();

        let out = aggregate(&results, "No disponible");
        prop_assert_eq!(out.table.fields.len(), MASTER_FIELDS.len());
        for column in &out.table.columns {
            prop_assert!(column.company.is_known());
            prop_assert_eq!(column.values.len(), MASTER_FIELDS.len());
        }

        let mut companies = out.table.companies();
        let before = companies.len();
        companies.dedup();
        prop_assert_eq!(companies.len(), before);
    }
}
