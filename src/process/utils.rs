use scraper::ElementRef;

/// Placeholder for header columns the extractor does not populate.
pub const PLACEHOLDER: &str = "0";

/// Drop every thousands separator: `"1,234,567"` → `"1234567"`.
pub fn strip_commas(raw: &str) -> String {
    raw.replace(',', "")
}

/// First non-blank text node under `el`, trimmed. Country names sit inside
/// an `<a>`, so the cell's own whitespace nodes are skipped.
pub fn first_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// All text under `el`, right-trimmed (header cells).
pub fn full_text_rtrim(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim_end().to_string()
}

/// Parse a count as shown on the page (`"+1,234"`, `" 56 "`, `""`).
pub fn parse_count(raw: &str) -> Option<f64> {
    let cleaned = strip_commas(raw.trim());
    let cleaned = cleaned.trim_start_matches('+');
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("N/A") {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
