use regex::Regex;
use tracing::debug;

use crate::config::CompareOptions;
use crate::error::CotizaError;
use crate::model::{CompanyTag, ExtractionResult, FieldValue};
use crate::parsing::anchor::{
    after_label, cut_at_stops, label_pattern, label_starts_at, line_value, windows_after,
};
use crate::parsing::values::{
    collapse_whitespace, find_amount, find_percent, starts_with_absence_marker, truncate_chars,
};
use crate::parsing::vehicle::extract_vehicle;
use crate::profiles::builtin;
use crate::profiles::schema::{ValueKind, VendorProfileDef};
use crate::profiles::validate_profile;

/// Turns one insurer's document text into normalized fields.
///
/// Implementations must not panic on any input; unrecognized text yields a
/// result with fewer (or no) fields.
pub trait QuoteExtractor: Send + Sync {
    fn company(&self) -> CompanyTag;

    fn extract(&self, text: &str, options: &CompareOptions) -> ExtractionResult;
}

/// Profile-driven extractor, one per insurer.
pub struct VendorExtractor {
    company: CompanyTag,
    version: String,
    rules: Vec<CompiledRule>,
}

struct CompiledRule {
    field: String,
    kind: ValueKind,
    anchors: Vec<Regex>,
    then: Option<Regex>,
    stop_at: Vec<Regex>,
    exclude: Vec<Regex>,
    window: usize,
}

impl VendorExtractor {
    /// Validate a profile and compile its labels.
    pub fn from_profile(profile: &VendorProfileDef) -> Result<Self, CotizaError> {
        validate_profile(profile)?;

        let rules = profile
            .rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    field: rule.field.clone(),
                    kind: rule.kind,
                    anchors: rule
                        .anchors
                        .iter()
                        .map(|a| label_pattern(a))
                        .collect::<Result<_, _>>()?,
                    then: rule.then.as_deref().map(label_pattern).transpose()?,
                    stop_at: rule
                        .stop_at
                        .iter()
                        .map(|s| label_pattern(s))
                        .collect::<Result<_, _>>()?,
                    exclude: rule
                        .exclude
                        .iter()
                        .map(|e| label_pattern(e))
                        .collect::<Result<_, _>>()?,
                    window: rule.window(),
                })
            })
            .collect::<Result<Vec<_>, CotizaError>>()?;

        Ok(Self {
            company: profile.company,
            version: profile.version.clone(),
            rules,
        })
    }

    pub fn builtin(company: CompanyTag) -> Result<Self, CotizaError> {
        Self::from_profile(&builtin::load_builtin(company)?)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Fields this extractor has a rule for, in rule order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.field.as_str())
    }
}

impl QuoteExtractor for VendorExtractor {
    fn company(&self) -> CompanyTag {
        self.company
    }

    fn extract(&self, text: &str, options: &CompareOptions) -> ExtractionResult {
        let mut result = ExtractionResult::new(self.company);

        for rule in &self.rules {
            match rule.apply(text, options) {
                Some(value) => {
                    debug!(company = self.company.key(), field = %rule.field, %value, "field extracted");
                    result.insert(&rule.field, value);
                }
                None => {
                    debug!(company = self.company.key(), field = %rule.field, "no value found");
                }
            }
        }

        result.vehicle = extract_vehicle(text);
        result
    }
}

impl CompiledRule {
    /// The first anchor that yields a value governs.
    fn apply(&self, text: &str, options: &CompareOptions) -> Option<FieldValue> {
        self.anchors
            .iter()
            .find_map(|anchor| self.apply_anchor(text, anchor, options))
    }

    /// Occurrences are tried in reading order. Those starting an excluded
    /// label are skipped; an explicit absence marker ends the search.
    fn apply_anchor(
        &self,
        text: &str,
        anchor: &Regex,
        options: &CompareOptions,
    ) -> Option<FieldValue> {
        for (start, window) in windows_after(text, anchor, self.window) {
            if self.exclude.iter().any(|e| label_starts_at(text, start, e)) {
                continue;
            }

            let window = cut_at_stops(window, &self.stop_at);
            let window = match &self.then {
                Some(label) => match after_label(window, label) {
                    Some(rest) => rest,
                    None => continue,
                },
                None => window,
            };

            if starts_with_absence_marker(window) {
                return None;
            }
            if let Some(value) = scan_value(self.kind, window, options) {
                return Some(value);
            }
        }
        None
    }
}

fn scan_value(kind: ValueKind, window: &str, options: &CompareOptions) -> Option<FieldValue> {
    match kind {
        ValueKind::Currency => find_amount(window).map(FieldValue::amount),
        ValueKind::Percent => find_percent(window).map(FieldValue::percent),
        ValueKind::Text => {
            let value = collapse_whitespace(line_value(window)?);
            let value = truncate_chars(&value, options.max_text_len);
            (!value.is_empty()).then_some(FieldValue::Text(value))
        }
        ValueKind::Coverage => find_coverage(window).map(|c| FieldValue::Text(c.to_string())),
    }
}

/// Earliest coverage marker in the window.
fn find_coverage(window: &str) -> Option<&'static str> {
    const MARKERS: &[(&str, &str)] = &[
        ("NO AMPARAD", "NO AMPARADA"),
        ("EXCLUID", "EXCLUIDA"),
        ("AMPARAD", "AMPARADA"),
    ];

    let upper = window.to_uppercase();
    MARKERS
        .iter()
        .filter_map(|(needle, label)| upper.find(needle).map(|pos| (pos, *label)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, label)| label)
}

/// The extractors available to a comparison, at most one per insurer.
pub struct ExtractorSet {
    extractors: Vec<Box<dyn QuoteExtractor>>,
}

impl ExtractorSet {
    pub fn empty() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Extractors compiled from the built-in profiles of every known insurer.
    pub fn builtin() -> Result<Self, CotizaError> {
        let mut set = Self::empty();
        for company in CompanyTag::KNOWN {
            set.insert(Box::new(VendorExtractor::builtin(company)?));
        }
        Ok(set)
    }

    /// Add an extractor, replacing any existing one for the same insurer.
    pub fn insert(&mut self, extractor: Box<dyn QuoteExtractor>) {
        let company = extractor.company();
        self.extractors.retain(|e| e.company() != company);
        self.extractors.push(extractor);
    }

    /// Replace the extractor for the profile's insurer with one built from `profile`.
    pub fn with_profile(&mut self, profile: &VendorProfileDef) -> Result<(), CotizaError> {
        let extractor = VendorExtractor::from_profile(profile)?;
        debug!(
            company = profile.company.key(),
            version = %profile.version,
            "using custom profile"
        );
        self.insert(Box::new(extractor));
        Ok(())
    }

    pub fn get(&self, company: CompanyTag) -> Option<&dyn QuoteExtractor> {
        self.extractors
            .iter()
            .find(|e| e.company() == company)
            .map(|e| e.as_ref())
    }

    pub fn companies(&self) -> Vec<CompanyTag> {
        let mut companies: Vec<_> = self.extractors.iter().map(|e| e.company()).collect();
        companies.sort_by_key(|c| c.display_name());
        companies
    }
}
