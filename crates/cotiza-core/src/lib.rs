pub mod aggregate;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod extraction;
pub mod fields;
pub mod financials;
pub mod identify;
pub mod model;
pub mod parsing;
pub mod profiles;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

pub use aggregate::{CompanyColumn, ComparisonTable};
pub use config::CompareOptions;

use aggregate::{aggregate, LabeledResult};
use diagnostics::Diagnostic;
use error::CotizaError;
use extract::ExtractorSet;
use extraction::PdfExtractor;
use model::{CompanyTag, ExtractionResult, SourceDocument};

/// A PDF file handed to [`compare_pdfs`].
#[derive(Debug, Clone)]
pub struct PdfInput {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// What happened to a single document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutcome {
    pub company: CompanyTag,
    /// `None` when the document could not be attributed to an insurer.
    pub result: Option<ExtractionResult>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentOutcome {
    fn rejected(diagnostic: Diagnostic) -> Self {
        Self {
            company: CompanyTag::Unknown,
            result: None,
            diagnostics: vec![diagnostic],
        }
    }
}

/// Comparison table plus everything worth telling the user about the batch.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub table: ComparisonTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Identify and extract a single document.
///
/// Never fails: unreadable or unrecognized text is reported through
/// diagnostics and yields no result.
pub fn parse_text(
    text: &str,
    extractors: &ExtractorSet,
    options: &CompareOptions,
) -> DocumentOutcome {
    if text.trim().is_empty() {
        return DocumentOutcome::rejected(Diagnostic::malformed_input(
            "no text layer (scanned or empty document)",
        ));
    }

    let company = identify::identify(text);
    let Some(extractor) = extractors.get(company) else {
        return DocumentOutcome::rejected(Diagnostic::unidentified_company());
    };

    let mut result = extractor.extract(text, options);
    financials::complete_financials(&mut result, options);

    let mut diagnostics = Vec::new();
    if result.is_empty() {
        diagnostics.push(Diagnostic::extraction_failed(company));
    } else {
        let missing = result.missing_fields();
        if !missing.is_empty() {
            diagnostics.push(Diagnostic::partial_extraction(&missing));
        }
    }

    DocumentOutcome {
        company,
        result: Some(result),
        diagnostics,
    }
}

/// Main API entry point: compare already extracted document texts.
///
/// Documents are processed in parallel; a bad document never prevents the
/// others from being compared. Fails only when no document yields a column.
pub fn compare_texts(
    docs: &[SourceDocument],
    extractors: &ExtractorSet,
    options: &CompareOptions,
) -> Result<Comparison, CotizaError> {
    let outcomes: Vec<(String, DocumentOutcome)> = docs
        .par_iter()
        .map(|doc| (doc.name.clone(), parse_text(&doc.text, extractors, options)))
        .collect();

    build_comparison(outcomes, options)
}

/// Compare PDF files, extracting each text layer with `pdf`.
///
/// A file that cannot be read is reported as malformed input. A missing
/// `pdftotext` binary fails the whole call.
pub fn compare_pdfs(
    files: &[PdfInput],
    pdf: &dyn PdfExtractor,
    extractors: &ExtractorSet,
    options: &CompareOptions,
) -> Result<Comparison, CotizaError> {
    let outcomes: Vec<(String, DocumentOutcome)> = files
        .par_iter()
        .map(|file| {
            let outcome = match pdf.extract_text(&file.bytes) {
                Ok(text) => parse_text(&text, extractors, options),
                Err(e @ CotizaError::PdftotextNotFound) => return Err(e),
                Err(e) => DocumentOutcome::rejected(Diagnostic::malformed_input(&e.to_string())),
            };
            Ok((file.name.clone(), outcome))
        })
        .collect::<Result<_, CotizaError>>()?;

    build_comparison(outcomes, options)
}

fn build_comparison(
    outcomes: Vec<(String, DocumentOutcome)>,
    options: &CompareOptions,
) -> Result<Comparison, CotizaError> {
    let count = outcomes.len();
    let mut diagnostics = Vec::new();
    let mut results = Vec::new();

    for (name, outcome) in outcomes {
        debug!(document = %name, company = outcome.company.key(), "document processed");
        for d in outcome.diagnostics {
            if matches!(
                d.kind,
                diagnostics::DiagnosticKind::UnidentifiedCompany
                    | diagnostics::DiagnosticKind::MalformedInput
            ) {
                warn!(document = %name, "{}", d.message);
            }
            diagnostics.push(d.for_document(&name));
        }
        if let Some(result) = outcome.result {
            results.push(LabeledResult {
                source: name,
                result,
            });
        }
    }

    let output = aggregate(&results, &options.placeholder);
    diagnostics.extend(output.diagnostics);

    if output.table.is_empty() {
        return Err(CotizaError::NoComparableDocuments { count });
    }

    Ok(Comparison {
        table: output.table,
        diagnostics,
    })
}
