use rust_decimal::Decimal;
use std::str::FromStr;

use crate::model::to_cents;

/// Text that stands for "no value" when it directly follows a label.
const ABSENCE_MARKERS: &[&str] = &["N/A", "N/D", "NA", "NO APLICA", "NO DISPONIBLE"];

/// Dashes only mean "no value" when nothing else follows on the line.
const DASH_MARKERS: &[char] = &['-', '—', '–'];

/// Parse a single currency token into a Decimal.
///
/// Handles formats like:
/// - "$15,000.00" -> 15000.00 (Mexican thousands comma)
/// - "15.000,00" -> 15000.00 (European thousands dot)
/// - "$ 616,000" -> 616000
/// - "$1.500" -> 1500 (a lone dot grouping pesos)
/// - "1,5" -> 1.5 (lone decimal comma)
/// - "N/A", "", "abc" -> None
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let stripped = strip_currency(s);
    parse_number(stripped, stripped.len() != s.trim().len())
}

/// `currency` is set when a currency mark was attached to the number; a lone
/// dot followed by exactly three digits is then a thousands separator.
fn parse_number(s: &str, currency: bool) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.') {
        return None;
    }

    let last_comma = cleaned.rfind(',');
    let last_dot = cleaned.rfind('.');

    let canonical = match (last_comma, last_dot) {
        (Some(c), Some(d)) if d > c => cleaned.replace(',', ""),
        (Some(_), Some(_)) => cleaned.replace('.', "").replace(',', "."),
        (Some(_), None) => {
            if has_thousands_groups(&cleaned, ',') {
                cleaned.replace(',', "")
            } else if cleaned.matches(',').count() == 1 {
                cleaned.replace(',', ".")
            } else {
                return None;
            }
        }
        (None, Some(_)) => {
            if cleaned.matches('.').count() > 1 {
                if has_thousands_groups(&cleaned, '.') {
                    cleaned.replace('.', "")
                } else {
                    return None;
                }
            } else if currency && !cleaned.starts_with('0') && has_thousands_groups(&cleaned, '.')
            {
                cleaned.replace('.', "")
            } else {
                cleaned
            }
        }
        (None, None) => cleaned,
    };

    Decimal::from_str(&canonical).ok()
}

/// Normalize a currency string to a fixed two-decimal string.
///
/// Normalizing an already normalized value returns it unchanged.
pub fn normalize_amount(s: &str) -> Option<String> {
    parse_amount(s).map(|d| to_cents(d).to_string())
}

/// Parse a percentage like "5%", "2.5 %" or "3,0%" into its bare number.
pub fn parse_percent(s: &str) -> Option<Decimal> {
    let s = s.trim();
    let s = s.strip_suffix('%').unwrap_or(s).trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(&s.replace(',', ".")).ok().map(|d| d.normalize())
}

/// Find the first currency amount in a window of text.
///
/// Numbers followed by `%`, numbers glued to letters (vehicle codes such
/// as "L4") and date parts are skipped.
pub fn find_amount(window: &str) -> Option<Decimal> {
    for token in numeric_tokens(window) {
        if token.percent || token.glued {
            continue;
        }
        if let Some(d) = parse_number(token.text, token.currency) {
            return Some(d);
        }
    }
    None
}

/// Find the first percentage in a window of text.
pub fn find_percent(window: &str) -> Option<Decimal> {
    numeric_tokens(window)
        .into_iter()
        .find(|t| t.percent && !t.glued)
        .and_then(|t| parse_percent(t.text))
}

/// True if the value right after a label is an explicit "no value" marker.
///
/// A dash counts only when it is alone on its line; "Label - text $1,000"
/// uses it as a separator.
pub fn starts_with_absence_marker(s: &str) -> bool {
    let trimmed = s
        .trim_start_matches(|c: char| c == ':' || c == '$' || c.is_whitespace())
        .to_uppercase();

    if let Some(rest) = trimmed.strip_prefix(DASH_MARKERS) {
        return rest.lines().next().map_or(true, |line| line.trim().is_empty());
    }

    ABSENCE_MARKERS.iter().any(|m| {
        trimmed.starts_with(m)
            && trimmed[m.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric())
    })
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max` characters, never splitting a character.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}

fn strip_currency(s: &str) -> &str {
    let s = s.trim();
    let s = s.strip_prefix("MXN").unwrap_or(s).trim_start();
    let s = s.strip_prefix('$').unwrap_or(s).trim_start();
    let s = s.strip_suffix("M.N.").unwrap_or(s).trim_end();
    s.strip_suffix("MXN").unwrap_or(s).trim_end()
}

/// Every group after the first separator has exactly three digits.
fn has_thousands_groups(s: &str, sep: char) -> bool {
    let mut groups = s.split(sep);
    let first = groups.next().unwrap_or_default();
    if first.is_empty() || first.len() > 3 {
        return false;
    }
    groups.all(|g| g.len() == 3)
}

struct NumericToken<'a> {
    text: &'a str,
    /// Followed by a `%` sign.
    percent: bool,
    /// Directly attached to a letter or a date separator.
    glued: bool,
    /// Preceded by a `$` sign.
    currency: bool,
}

/// Split a window into runs of digits with embedded `,` and `.` separators.
fn numeric_tokens(window: &str) -> Vec<NumericToken<'_>> {
    let mut tokens = Vec::new();
    let mut iter = window.char_indices().peekable();

    while let Some((start, c)) = iter.next() {
        if !c.is_ascii_digit() {
            continue;
        }

        let mut end = start + c.len_utf8();
        while let Some(&(i, next)) = iter.peek() {
            if next.is_ascii_digit() || next == ',' || next == '.' {
                end = i + next.len_utf8();
                iter.next();
            } else {
                break;
            }
        }

        // Sentence punctuation after a number is not part of it.
        let text = window[start..end].trim_end_matches([',', '.']);

        let before = window[..start].chars().next_back();
        let rest = &window[start + text.len()..];
        let after = rest.chars().next();
        let glued = before.is_some_and(|b| b.is_alphabetic() || b == '/')
            || after.is_some_and(|a| a.is_alphabetic() || a == '/');
        let percent = rest.trim_start().starts_with('%');
        let currency = window[..start].trim_end().ends_with('$');

        tokens.push(NumericToken {
            text,
            percent,
            glued,
            currency,
        });
    }

    tokens
}
