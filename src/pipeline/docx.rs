//! Document conversion: DOCX bytes in, HTML out.
//!
//! ## Why a trait for one implementation?
//!
//! The rest of the system must not depend on how the document format is
//! parsed. [`DocumentConverter`] is the narrow contract — bytes plus the
//! style configuration in, an HTML string plus auxiliary warnings out —
//! and [`DocxConverter`] is the one production implementation, built on
//! `docx-rs`. Tests substitute their own converter through
//! [`crate::ExtractionConfig::converter`] to exercise the controller
//! without real documents.
//!
//! ## What the emitted HTML looks like
//!
//! * paragraphs become `<p>`, or `<h1>`–`<h6>` for `Heading1`–`Heading6` /
//!   `Title` styles when heading mapping is enabled;
//! * run formatting becomes `<strong>` / `<em>` / `<u>`;
//! * page-break runs become the configured marker element, always placed at
//!   a fresh block boundary: a break in the middle of a paragraph closes
//!   the paragraph, emits the marker, and reopens;
//! * line and column breaks become `<br />`;
//! * hyperlinks are flattened to their text;
//! * tables, drawings, and other constructs outside the text extraction
//!   are skipped and recorded as warnings.
//!
//! Text content is always HTML-escaped, so the emitted markup contains no
//! element that did not come from this writer.

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use docx_rs::{read_docx, BreakType, DocumentChild, ParagraphChild, RunChild};
use tracing::debug;

/// The document-converter contract: raw bytes plus the extraction
/// configuration in, HTML plus warnings out.
///
/// Implementations run inside `spawn_blocking` — conversion is CPU-bound
/// and must not be `await`-ed on the event loop directly.
pub trait DocumentConverter: Send + Sync {
    fn convert(&self, bytes: &[u8], config: &ExtractionConfig) -> Result<Converted, ExtractError>;
}

/// Result of a successful conversion, before trimming.
#[derive(Debug, Clone)]
pub struct Converted {
    /// The emitted HTML.
    pub html: String,
    /// Auxiliary warnings about constructs the converter skipped.
    pub warnings: Vec<String>,
    /// Paragraph-level blocks emitted.
    pub paragraph_count: usize,
    /// Page-break markers emitted.
    pub page_break_count: usize,
}

/// The built-in converter, backed by `docx-rs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxConverter;

impl DocxConverter {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentConverter for DocxConverter {
    fn convert(&self, bytes: &[u8], config: &ExtractionConfig) -> Result<Converted, ExtractError> {
        let docx = read_docx(bytes).map_err(|e| ExtractError::ConversionFailure {
            detail: e.to_string(),
        })?;

        let mut writer = HtmlWriter::new(config);
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => writer.paragraph(p),
                DocumentChild::Table(_) => {
                    writer.warn("table skipped: tables are outside the text extraction");
                }
                _ => {}
            }
        }

        let converted = writer.finish();
        debug!(
            paragraphs = converted.paragraph_count,
            page_breaks = converted.page_break_count,
            warnings = converted.warnings.len(),
            "conversion complete"
        );
        Ok(converted)
    }
}

// ── HTML writer ──────────────────────────────────────────────────────────

/// A fragment produced while walking a paragraph's runs: either markup to
/// append to the open block, or a page break that must split it.
enum Piece {
    Html(String),
    PageBreak,
}

struct HtmlWriter<'a> {
    config: &'a ExtractionConfig,
    html: String,
    warnings: Vec<String>,
    paragraph_count: usize,
    page_break_count: usize,
}

impl<'a> HtmlWriter<'a> {
    fn new(config: &'a ExtractionConfig) -> Self {
        Self {
            config,
            html: String::new(),
            warnings: Vec::new(),
            paragraph_count: 0,
            page_break_count: 0,
        }
    }

    fn warn(&mut self, message: &str) {
        // One entry per construct kind keeps the list readable for long documents.
        if !self.warnings.iter().any(|w| w == message) {
            self.warnings.push(message.to_string());
        }
    }

    fn paragraph(&mut self, p: &docx_rs::Paragraph) {
        let tag = self.block_tag(p);
        let mut pieces: Vec<Piece> = Vec::new();

        for child in &p.children {
            match child {
                ParagraphChild::Run(r) => run_pieces(r, &mut pieces),
                ParagraphChild::Hyperlink(link) => {
                    // Link targets live in the relationship part; the text
                    // extraction keeps only the visible content.
                    for inner in &link.children {
                        if let ParagraphChild::Run(r) = inner {
                            run_pieces(r, &mut pieces);
                        }
                    }
                }
                _ => {}
            }
        }

        // An empty paragraph produces nothing, but a paragraph whose only
        // content is a page break must still emit the marker.
        let marker = self.config.page_break.render();
        let mut block = String::new();
        for piece in pieces {
            match piece {
                Piece::Html(s) => block.push_str(&s),
                Piece::PageBreak => {
                    self.close_block(tag, &mut block);
                    self.html.push_str(&marker);
                    self.page_break_count += 1;
                }
            }
        }
        self.close_block(tag, &mut block);
    }

    /// Flush the accumulated run markup as one `<tag>…</tag>` block.
    fn close_block(&mut self, tag: &str, block: &mut String) {
        if block.is_empty() {
            return;
        }
        self.html.push('<');
        self.html.push_str(tag);
        self.html.push('>');
        self.html.push_str(block);
        self.html.push_str("</");
        self.html.push_str(tag);
        self.html.push('>');
        self.paragraph_count += 1;
        block.clear();
    }

    fn block_tag(&self, p: &docx_rs::Paragraph) -> &'static str {
        if !self.config.map_headings {
            return "p";
        }
        match p.property.style.as_ref().map(|s| s.val.as_str()) {
            Some("Title") | Some("Heading1") => "h1",
            Some("Heading2") => "h2",
            Some("Heading3") => "h3",
            Some("Heading4") => "h4",
            Some("Heading5") => "h5",
            Some("Heading6") => "h6",
            _ => "p",
        }
    }

    fn finish(self) -> Converted {
        Converted {
            html: self.html,
            warnings: self.warnings,
            paragraph_count: self.paragraph_count,
            page_break_count: self.page_break_count,
        }
    }
}

/// Walk one run's children into pieces, applying the run's formatting to
/// each contiguous text span. A page break inside the run ends the current
/// span so the marker lands between two complete blocks.
fn run_pieces(run: &docx_rs::Run, pieces: &mut Vec<Piece>) {
    let props = &run.run_property;
    let bold = props.bold.as_ref().map_or(false, |b| *b == docx_rs::Bold::new());
    let italic = props
        .italic
        .as_ref()
        .map_or(false, |i| *i == docx_rs::Italic::new());
    let underline = props.underline.is_some();

    let mut span = String::new();
    for child in &run.children {
        match child {
            RunChild::Text(t) => span.push_str(&escape_html(&t.text)),
            RunChild::Tab(_) => span.push('\t'),
            RunChild::Break(b) if *b == docx_rs::Break::new(BreakType::Page) => {
                if !span.is_empty() {
                    pieces.push(Piece::Html(wrap_formatting(&span, bold, italic, underline)));
                    span.clear();
                }
                pieces.push(Piece::PageBreak);
            }
            RunChild::Break(_) => span.push_str("<br />"),
            _ => {}
        }
    }
    if !span.is_empty() {
        pieces.push(Piece::Html(wrap_formatting(&span, bold, italic, underline)));
    }
}

/// Wrap a span in formatting elements, outermost first.
fn wrap_formatting(span: &str, bold: bool, italic: bool, underline: bool) -> String {
    let mut out = span.to_string();
    if underline {
        out = format!("<u>{out}</u>");
    }
    if italic {
        out = format!("<em>{out}</em>");
    }
    if bold {
        out = format!("<strong>{out}</strong>");
    }
    out
}

/// Minimal text escaping for element content.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};

    fn pack(mut docx: Docx) -> Vec<u8> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).expect("pack fixture docx");
        cursor.into_inner()
    }

    fn convert(docx: Docx) -> Converted {
        let config = ExtractionConfig::default();
        DocxConverter::new()
            .convert(&pack(docx), &config)
            .expect("conversion succeeds")
    }

    #[test]
    fn plain_paragraph_is_escaped() {
        let out = convert(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Fish & <chips>"))),
        );
        assert_eq!(out.html, "<p>Fish &amp; &lt;chips&gt;</p>");
        assert_eq!(out.paragraph_count, 1);
        assert_eq!(out.page_break_count, 0);
    }

    #[test]
    fn page_break_splits_the_paragraph_fresh() {
        let out = convert(Docx::new().add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text("Title")
                    .add_break(BreakType::Page)
                    .add_text("Body"),
            ),
        ));
        assert_eq!(
            out.html,
            "<p>Title</p><hr class=\"page-break\"><p>Body</p>"
        );
        assert_eq!(out.paragraph_count, 2);
        assert_eq!(out.page_break_count, 1);
    }

    #[test]
    fn page_break_only_paragraph_emits_just_the_marker() {
        let out = convert(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page))),
        );
        assert_eq!(out.html, "<hr class=\"page-break\">");
        assert_eq!(out.paragraph_count, 0);
        assert_eq!(out.page_break_count, 1);
    }

    #[test]
    fn empty_paragraph_produces_nothing() {
        let out = convert(Docx::new().add_paragraph(Paragraph::new()));
        assert_eq!(out.html, "");
        assert_eq!(out.paragraph_count, 0);
    }

    #[test]
    fn bold_and_italic_runs() {
        let out = convert(
            Docx::new().add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("loud").bold())
                    .add_run(Run::new().add_text(" and "))
                    .add_run(Run::new().add_text("slanted").italic()),
            ),
        );
        assert_eq!(
            out.html,
            "<p><strong>loud</strong> and <em>slanted</em></p>"
        );
    }

    #[test]
    fn line_break_stays_inside_the_paragraph() {
        let out = convert(Docx::new().add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text("a")
                    .add_break(BreakType::TextWrapping)
                    .add_text("b"),
            ),
        ));
        assert_eq!(out.html, "<p>a<br />b</p>");
        assert_eq!(out.page_break_count, 0);
    }

    #[test]
    fn heading_styles_map_to_heading_tags() {
        let out = convert(
            Docx::new()
                .add_paragraph(
                    Paragraph::new()
                        .style("Heading2")
                        .add_run(Run::new().add_text("Section")),
                )
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("prose"))),
        );
        assert_eq!(out.html, "<h2>Section</h2><p>prose</p>");
    }

    #[test]
    fn heading_mapping_can_be_disabled() {
        let config = ExtractionConfig::builder()
            .map_headings(false)
            .build()
            .unwrap();
        let bytes = pack(Docx::new().add_paragraph(
            Paragraph::new()
                .style("Heading1")
                .add_run(Run::new().add_text("Top")),
        ));
        let out = DocxConverter::new().convert(&bytes, &config).unwrap();
        assert_eq!(out.html, "<p>Top</p>");
    }

    #[test]
    fn custom_marker_class_is_used() {
        let config = ExtractionConfig::builder()
            .page_break_class("pb")
            .build()
            .unwrap();
        let bytes = pack(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page))),
        );
        let out = DocxConverter::new().convert(&bytes, &config).unwrap();
        assert_eq!(out.html, "<hr class=\"pb\">");
    }

    #[test]
    fn garbage_bytes_are_a_conversion_failure() {
        let config = ExtractionConfig::default();
        let err = DocxConverter::new()
            .convert(b"PK\x03\x04 but not actually a zip", &config)
            .unwrap_err();
        assert!(matches!(err, ExtractError::ConversionFailure { .. }));
    }

    #[test]
    fn escape_html_covers_the_specials() {
        assert_eq!(escape_html("a<b>&c"), "a&lt;b&gt;&amp;c");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn formatting_nests_strong_outside_em() {
        assert_eq!(
            wrap_formatting("x", true, true, false),
            "<strong><em>x</em></strong>"
        );
    }
}
