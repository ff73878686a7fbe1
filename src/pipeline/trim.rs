//! The first-page trimming rule.
//!
//! ## Why match structurally instead of by substring?
//!
//! A substring search for `class="page-break"` would fire on markup it must
//! not fire on: `class="no-page-break"`, a class list that merely contains
//! the text, or the literal string inside escaped content. The scanner here
//! locates candidate `<hr …>` tags, parses each tag's `class` attribute,
//! and matches only when one whitespace-separated token equals the marker
//! class exactly.
//!
//! The rule itself is a pure function over the HTML string: with the
//! preference off it is the identity; with it on, everything up to and
//! including the **first** marker is dropped. A document with no marker is
//! returned unchanged — that is the normal case for single-page documents,
//! not an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// Candidate marker tags. Attribute order and self-closing slashes vary,
/// so the candidate match is deliberately loose; the class check below is
/// what decides.
static RE_HR_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<hr\b[^>]*>").unwrap());

/// The `class` attribute inside a single tag, quoted or bare.
static RE_CLASS_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap());

/// Apply the first-page trimming rule.
///
/// Returns the suffix of `html` starting immediately after the first
/// page-break marker's closing `>`, or `html` unchanged when `enabled` is
/// false or no marker is present. The returned slice always borrows from
/// the input; applying the rule twice yields the same suffix because the
/// matched marker itself is dropped.
pub fn trim_first_page<'a>(html: &'a str, enabled: bool, marker_class: &str) -> &'a str {
    if !enabled {
        return html;
    }
    match find_page_break(html, marker_class) {
        Some(end) => &html[end..],
        None => html,
    }
}

/// Byte offset just past the first page-break marker, if one exists.
fn find_page_break(html: &str, marker_class: &str) -> Option<usize> {
    RE_HR_TAG
        .find_iter(html)
        .find(|m| tag_has_class(m.as_str(), marker_class))
        .map(|m| m.end())
}

/// Whether a tag's `class` attribute contains `marker_class` as a token.
fn tag_has_class(tag: &str, marker_class: &str) -> bool {
    let Some(caps) = RE_CLASS_ATTR.captures(tag) else {
        return false;
    };
    let value = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
        .unwrap_or("");
    value.split_whitespace().any(|token| token == marker_class)
}
