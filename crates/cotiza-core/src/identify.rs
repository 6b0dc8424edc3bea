use crate::model::CompanyTag;

/// Header and boilerplate markers per insurer, in evaluation order.
///
/// Atlas is checked before ANA because Atlas quotes name Atlas-only products
/// ("Atlas Cero Plus"), while the bare word "ANA" is the weakest marker.
const MARKERS: &[(CompanyTag, &[&str])] = &[
    (CompanyTag::Qualitas, &["QUÁLITAS", "QUALITAS"]),
    (CompanyTag::Hdi, &["HDI SEGUROS", "HDI"]),
    (CompanyTag::Atlas, &["SEGUROS ATLAS", "ATLAS"]),
    (
        CompanyTag::Ana,
        &["ANA SEGUROS", "ANA COMPAÑÍA DE SEGUROS", "ANA"],
    ),
];

/// Classify raw document text by insurer. First matching marker wins.
///
/// Never fails: empty text, or text without any marker, is `Unknown`.
pub fn identify(text: &str) -> CompanyTag {
    if text.trim().is_empty() {
        return CompanyTag::Unknown;
    }

    let upper = text.to_uppercase();
    for (company, markers) in MARKERS {
        if markers.iter().any(|m| contains_word(&upper, m)) {
            return *company;
        }
    }

    CompanyTag::Unknown
}

/// Markers used for a company, for diagnostics and `profiles explain`.
pub fn markers_for(company: CompanyTag) -> &'static [&'static str] {
    MARKERS
        .iter()
        .find(|(c, _)| *c == company)
        .map(|(_, m)| *m)
        .unwrap_or(&[])
}

/// True if `needle` occurs in `haystack` with no alphanumeric character
/// directly before or after it.
fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let start = from + pos;
        let end = start + needle.len();

        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if before_ok && after_ok {
            return true;
        }

        // Advance past the first char of this match.
        from = start + haystack[start..].chars().next().map_or(1, |c| c.len_utf8());
    }
    false
}
