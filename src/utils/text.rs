//! Text helpers shared by the research, content and deck layers.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

/// Return at most the first `max_chars` characters of `text`.
///
/// Slicing happens on a character boundary, so multi-byte topics and
/// abstracts never panic.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Turn a topic into a file-name fragment.
///
/// Every run of whitespace becomes a single `_`, and path separators are
/// replaced with `_` so the name stays inside the output directory.
pub fn sanitize_topic(topic: &str) -> String {
    let collapsed = match WHITESPACE_RUN.as_ref() {
        Some(re) => re.replace_all(topic, "_"),
        None => Cow::Borrowed(topic),
    };

    collapsed.replace(['/', '\\'], "_")
}
