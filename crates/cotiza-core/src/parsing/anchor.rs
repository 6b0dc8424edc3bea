use regex::Regex;

/// Compile a literal label into a case- and accent-insensitive pattern.
///
/// Runs of whitespace in the label match any whitespace, so a label split
/// across lines by the PDF text layer still matches. Labels starting or
/// ending with a letter only match on word boundaries.
pub fn label_pattern(label: &str) -> Result<Regex, regex::Error> {
    let label = label.trim();
    let words: Vec<String> = label.split_whitespace().map(fold_word).collect();

    let mut pattern = String::from("(?i)");
    if label.starts_with(char::is_alphanumeric) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&words.join(r"\s+"));
    if label.ends_with(char::is_alphanumeric) {
        pattern.push_str(r"\b");
    }
    Regex::new(&pattern)
}

/// Escape a word, letting each vowel match its accented form.
fn fold_word(word: &str) -> String {
    word.chars()
        .map(|c| match c.to_lowercase().next().unwrap_or(c) {
            'a' | 'á' => "[aá]".to_string(),
            'e' | 'é' => "[eé]".to_string(),
            'i' | 'í' => "[ií]".to_string(),
            'o' | 'ó' => "[oó]".to_string(),
            'u' | 'ú' | 'ü' => "[uúü]".to_string(),
            _ => regex::escape(&c.to_string()),
        })
        .collect()
}

/// Every occurrence of `anchor` in reading order, as the match start and the
/// text following it (at most `max_chars` long).
pub fn windows_after<'t>(
    text: &'t str,
    anchor: &Regex,
    max_chars: usize,
) -> Vec<(usize, &'t str)> {
    anchor
        .find_iter(text)
        .map(|m| (m.start(), take_chars(&text[m.end()..], max_chars)))
        .collect()
}

/// True if `label` matches starting exactly at byte offset `at`.
pub fn label_starts_at(text: &str, at: usize, label: &Regex) -> bool {
    label.find_at(text, at).is_some_and(|m| m.start() == at)
}

/// Text following the first occurrence of `label` inside `window`.
pub fn after_label<'a>(window: &'a str, label: &Regex) -> Option<&'a str> {
    label.find(window).map(|m| &window[m.end()..])
}

/// Cut the window at the earliest occurrence of any stop label.
pub fn cut_at_stops<'a>(window: &'a str, stops: &[Regex]) -> &'a str {
    let end = stops
        .iter()
        .filter_map(|s| s.find(window).map(|m| m.start()))
        .min()
        .unwrap_or(window.len());
    &window[..end]
}

/// The value written after a label on the same line, or on the next
/// non-empty line when the label ends its line.
///
/// Handles patterns like "Label: value" and "Label\nvalue". Layout text puts
/// neighbouring columns on the same line, so the value ends at the first gap
/// of two or more spaces.
pub fn line_value(window: &str) -> Option<&str> {
    let trimmed = window.trim_start_matches(|c: char| c == ':' || c == ' ' || c == '\t');
    let mut lines = trimmed.lines();

    let first = lines.next()?.trim();
    if !first.is_empty() {
        return first_segment(first);
    }

    lines
        .map(|l| l.trim().trim_start_matches(':').trim())
        .find(|l| !l.is_empty())
        .and_then(first_segment)
}

fn first_segment(line: &str) -> Option<&str> {
    split_by_whitespace_gaps(line).into_iter().next()
}

/// Split a line by gaps of 2+ whitespace characters.
pub fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut space_count = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start {
                    segments.push(line[s..i].trim_end());
                    start = None;
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            space_count = 0;
        }
    }

    if let Some(s) = start {
        segments.push(line[s..].trim_end());
    }

    segments
}

fn take_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
