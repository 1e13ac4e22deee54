//! Free-text cleanup for incident summaries.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use sla_core::constants::TRUNCATION_MARKER;

static MARKUP_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").ok());
static WHITESPACE_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

fn replace_all<'t>(pattern: &LazyLock<Option<Regex>>, text: &'t str, with: &str) -> Cow<'t, str> {
    match pattern.as_ref() {
        Some(re) => re.replace_all(text, with),
        None => Cow::Borrowed(text),
    }
}

/// Remove markup tags and decode the common character entities, then
/// collapse runs of whitespace.
pub fn strip_markup(raw: &str) -> String {
    let without_tags = replace_all(&MARKUP_TAG, raw, " ");
    let decoded = decode_entities(&without_tags);
    replace_all(&WHITESPACE_RUN, decoded.trim(), " ").into_owned()
}

/// Keep at most `max_chars` characters, appending `...` when anything was cut.
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{TRUNCATION_MARKER}", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// `strip_markup` followed by `truncate_summary`.
pub fn clean_summary(raw: &str, max_chars: usize) -> String {
    truncate_summary(&strip_markup(raw), max_chars)
}

fn decode_entities(text: &str) -> String {
    // `&amp;` last so `&amp;lt;` decodes to `&lt;`, not `<`.
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
