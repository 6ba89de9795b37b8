//! PGN tag-pair lookup.
//!
//! Header lines look like `[White "alice"]`. Values are returned verbatim;
//! escaped quotes inside a value are not unescaped.

use regex::Regex;
use std::sync::LazyLock;

/// Placeholder returned for tags that are absent or empty.
pub const MISSING: &str = "?";

static TAG_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[([A-Za-z0-9_]+) "([^"]+)"\]"#).expect("tag pair pattern is valid")
});

/// Returns the value of the first `[name "value"]` tag in `headers`, or
/// [`MISSING`].
pub fn extract_header<'a>(headers: &'a str, name: &str) -> &'a str {
    TAG_PAIR
        .captures_iter(headers)
        .find(|caps| &caps[1] == name)
        .and_then(|caps| caps.get(2))
        .map_or(MISSING, |m| m.as_str())
}

/// Like [`extract_header`] but maps the placeholder to `None`.
pub fn header_value<'a>(headers: &'a str, name: &str) -> Option<&'a str> {
    match extract_header(headers, name) {
        MISSING => None,
        value => Some(value),
    }
}
