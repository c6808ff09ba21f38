//! Input scrubbing for user-supplied catalog text.
//!
//! - [`strip_tags`] removes markup from display text, keeping inner text.
//! - [`scrub_filename`] removes characters that are not allowed in a file
//!   name, so an icon reference can never carry a path or markup.
//! - [`action_type_from_text`] condenses display text into an action key.
//! - [`parse_int_or_zero`] is the lenient integer parse used for numeric
//!   form fields.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a tag, or an unterminated `<` through the end of input.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*(?:>|$)").expect("valid regex"));

/// Characters removed from file names.
const FILENAME_FORBIDDEN: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Remove every HTML tag from `input`, keeping the text between tags.
///
/// An unterminated `<` drops the remainder of the input. The result is
/// trimmed.
///
/// ```
/// use waypoint_core::sanitize::strip_tags;
///
/// assert_eq!(strip_tags("<script>alert(1)</script>"), "alert(1)");
/// ```
pub fn strip_tags(input: &str) -> String {
    TAG_RE.replace_all(input, "").trim().to_string()
}

/// Remove path separators and other characters illegal in file names.
///
/// ```
/// use waypoint_core::sanitize::scrub_filename;
///
/// assert_eq!(scrub_filename("../files/icon.png"), "..filesicon.png");
/// ```
pub fn scrub_filename(input: &str) -> String {
    input
        .chars()
        .filter(|c| !FILENAME_FORBIDDEN.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Derive an action key: ASCII letters, digits and `_`, lower-cased.
pub fn action_type_from_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parse a decimal integer form field, falling back to `0` on anything
/// that is not a plain integer.
pub fn parse_int_or_zero(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}
