//! Configuration types for DOCX-to-HTML extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share a config between the one-shot pipeline and the
//! interactive controller, and to diff two runs to understand why their
//! outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest; `build()` validates the marker
//! class so a bad token is caught at configuration time, not at trim time.

use crate::error::ExtractError;
use crate::pipeline::docx::DocumentConverter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a DOCX-to-HTML extraction.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use docx2html::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .skip_first_page(false)
///     .text_width(100)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Drop everything up to and including the first page-break marker.
    /// Default: `true`.
    ///
    /// This is a user preference, not a property of one document: it
    /// survives resets and new submissions. Documents without a detected
    /// page break are returned unchanged regardless of this flag.
    pub skip_first_page: bool,

    /// How page-break runs are rendered in the output HTML.
    /// Default: `<hr class="page-break">`.
    ///
    /// This is the single style-map entry handed to the converter. The
    /// marker is emitted at a fresh block boundary (a page break inside a
    /// paragraph closes the paragraph, emits the marker, and reopens), so
    /// the trimming rule can cut on a clean element edge.
    pub page_break: PageBreakStyle,

    /// Map `Heading1`–`Heading6` and `Title` paragraph styles to
    /// `<h1>`–`<h6>`. Default: `true`.
    pub map_headings: bool,

    /// Wrap column for the plain-text projection of the HTML. Default: 80.
    ///
    /// This is the width the display surface renders at; the clipboard
    /// receives exactly the projected text.
    pub text_width: usize,

    /// How long the copy acknowledgment label stays up before reverting,
    /// in milliseconds. Default: 2000.
    pub copy_ack_ms: u64,

    /// Pre-constructed document converter. When `None`, the built-in
    /// [`crate::DocxConverter`] is used. Mainly useful in tests or when a
    /// caller wants to wrap the converter with extra behaviour.
    pub converter: Option<Arc<dyn DocumentConverter>>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            skip_first_page: true,
            page_break: PageBreakStyle::default(),
            map_headings: true,
            text_width: 80,
            copy_ack_ms: 2_000,
            converter: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("skip_first_page", &self.skip_first_page)
            .field("page_break", &self.page_break)
            .field("map_headings", &self.map_headings)
            .field("text_width", &self.text_width)
            .field("copy_ack_ms", &self.copy_ack_ms)
            .field(
                "converter",
                &self.converter.as_ref().map(|_| "<dyn DocumentConverter>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The copy acknowledgment duration as a [`Duration`].
    pub fn copy_ack(&self) -> Duration {
        Duration::from_millis(self.copy_ack_ms)
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn skip_first_page(mut self, v: bool) -> Self {
        self.config.skip_first_page = v;
        self
    }

    pub fn page_break_class(mut self, class: impl Into<String>) -> Self {
        self.config.page_break.class = class.into();
        self
    }

    pub fn map_headings(mut self, v: bool) -> Self {
        self.config.map_headings = v;
        self
    }

    pub fn text_width(mut self, width: usize) -> Self {
        self.config.text_width = width.max(20);
        self
    }

    pub fn copy_ack_ms(mut self, ms: u64) -> Self {
        self.config.copy_ack_ms = ms;
        self
    }

    pub fn converter(mut self, converter: Arc<dyn DocumentConverter>) -> Self {
        self.config.converter = Some(converter);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let class = &self.config.page_break.class;
        if class.is_empty() {
            return Err(ExtractError::InvalidConfig(
                "page-break marker class must not be empty".into(),
            ));
        }
        if class
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>'))
        {
            return Err(ExtractError::InvalidConfig(format!(
                "page-break marker class '{class}' must be a single attribute token"
            )));
        }
        Ok(self.config)
    }
}

// ── Page-break marker ────────────────────────────────────────────────────

/// The horizontal-rule element page-break runs are rendered as.
///
/// Only the class is configurable; the element is always `<hr>` so the
/// trimming rule and the converter agree on the tag they are looking for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBreakStyle {
    /// Class attribute token on the marker element.
    pub class: String,
}

impl Default for PageBreakStyle {
    fn default() -> Self {
        Self {
            class: "page-break".to_string(),
        }
    }
}

impl PageBreakStyle {
    /// Render the marker element for the output HTML.
    pub fn render(&self) -> String {
        format!("<hr class=\"{}\">", self.class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let c = ExtractionConfig::default();
        assert!(c.skip_first_page);
        assert!(c.map_headings);
        assert_eq!(c.text_width, 80);
        assert_eq!(c.copy_ack_ms, 2_000);
        assert_eq!(c.page_break.render(), "<hr class=\"page-break\">");
    }

    #[test]
    fn text_width_is_clamped() {
        let c = ExtractionConfig::builder().text_width(3).build().unwrap();
        assert_eq!(c.text_width, 20);
    }

    #[test]
    fn empty_marker_class_is_rejected() {
        let err = ExtractionConfig::builder()
            .page_break_class("")
            .build()
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)));
    }

    #[test]
    fn marker_class_with_whitespace_is_rejected() {
        let err = ExtractionConfig::builder()
            .page_break_class("page break")
            .build()
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)));
    }

    #[test]
    fn custom_marker_class_renders() {
        let c = ExtractionConfig::builder()
            .page_break_class("pb")
            .build()
            .unwrap();
        assert_eq!(c.page_break.render(), "<hr class=\"pb\">");
    }

    #[test]
    fn copy_ack_duration_roundtrip() {
        let c = ExtractionConfig::builder().copy_ack_ms(250).build().unwrap();
        assert_eq!(c.copy_ack(), Duration::from_millis(250));
    }
}
