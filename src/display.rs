//! The display-surface contract.
//!
//! A display surface renders the extracted HTML and exposes the *rendered*
//! plain text — what a copy operation places on the clipboard is the text a
//! reader sees, never the markup. The HTML handed to `render` is trusted:
//! it only ever originates from the converter, which escapes all document
//! text itself.

use crate::pipeline::text;

/// Something that can show HTML and report its plain-text projection.
pub trait DisplaySurface {
    /// Replace the surface's content with the given HTML.
    fn render(&mut self, html: &str);

    /// The plain-text projection of the currently rendered HTML.
    fn visible_text(&self) -> String;
}

/// A headless display surface that projects HTML to wrapped plain text.
///
/// This is what the CLI prints and what tests inspect; a GUI host would
/// implement [`DisplaySurface`] over its own widget instead.
#[derive(Debug, Clone)]
pub struct TextDisplay {
    html: String,
    width: usize,
}

impl TextDisplay {
    pub fn new(width: usize) -> Self {
        Self {
            html: String::new(),
            width,
        }
    }

    /// The raw HTML currently rendered.
    pub fn html(&self) -> &str {
        &self.html
    }
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new(80)
    }
}

impl DisplaySurface for TextDisplay {
    fn render(&mut self, html: &str) {
        self.html = html.to_string();
    }

    fn visible_text(&self) -> String {
        text::visible_text(&self.html, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_and_projects() {
        let mut display = TextDisplay::new(80);
        display.render("<p>Hello <strong>there</strong></p>");
        let text = display.visible_text();
        assert!(text.contains("Hello"));
        assert!(!text.contains("<strong>"));
    }

    #[test]
    fn rerender_replaces_content() {
        let mut display = TextDisplay::default();
        display.render("<p>one</p>");
        display.render("<p>two</p>");
        assert!(!display.visible_text().contains("one"));
        assert!(display.visible_text().contains("two"));
    }
}
