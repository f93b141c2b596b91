use once_cell::sync::Lazy;
use regex::Regex;

// A field is either a double-quoted run (commas allowed inside) or a bare
// run of non-comma characters that does not lead with whitespace or a quote.
// Empty positions between commas match neither alternative and are skipped.
static FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)"|([^",\s][^,]*)"#).expect("valid field regex"));

/// Split one CSV line into trimmed, unquoted fields.
///
/// Best-effort tokenizer, not RFC 4180: escaped quotes (`""`) inside a
/// quoted field are not handled, and fields containing only whitespace are
/// dropped. A blank line yields an empty vec; callers filter those out.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    for caps in FIELD_RE.captures_iter(line) {
        let raw = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or("");
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            fields.push(trimmed.to_string());
        }
    }
    fields
}
