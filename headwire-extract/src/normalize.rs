//! Title normalization: strips trailing site-identity suffixes.

use regex::Regex;
use std::sync::OnceLock;

// Requires whitespace before the dash so hyphenated words ("Covid-19")
// survive; the suffix runs to the end of the segment, stopping at a pipe.
fn dash_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+[-–—]\s*[^|\r\n]*").expect("dash suffix pattern"))
}

fn pipe_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\|\s*[^|\r\n]*").expect("pipe suffix pattern"))
}

/// Remove known site-suffix noise ("Headline - SiteName", "Headline | Site")
/// from a raw title and trim surrounding whitespace.
///
/// Idempotent: normalizing an already-clean title is a no-op. The sentinel
/// title contains no separator, so it passes through unchanged.
pub fn clean_title(title: &str) -> String {
    let cleaned = dash_suffix().replace_all(title, "");
    let cleaned = pipe_suffix().replace_all(&cleaned, "");
    cleaned.trim().to_string()
}

/// Collapse runs of whitespace (including newlines from pretty-printed
/// markup) into single spaces.
pub(crate) fn squash_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
