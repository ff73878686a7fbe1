//! Plain-text projection of the extracted HTML.
//!
//! The display surface's contract is that the text it exposes for copying
//! is the *rendered* text, not the markup. `html2text` gives us the same
//! projection a terminal rendering would show, wrapped at the configured
//! width.

/// Project HTML to plain text at the given wrap width.
pub fn visible_text(html: &str, width: usize) -> String {
    html2text::from_read(html.as_bytes(), width.max(20))
}
