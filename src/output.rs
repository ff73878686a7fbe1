//! Output types returned by the extraction pipeline.

use serde::{Deserialize, Serialize};

/// The complete result of one extraction.
///
/// `html` is the post-trim markup; `text` is its plain-text projection at
/// the configured wrap width (this is exactly what a clipboard copy would
/// place on the clipboard). `warnings` carries the converter's auxiliary
/// messages about constructs it skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    /// Declared name of the source file.
    pub source_file_name: String,

    /// Extracted HTML, after the first-page trimming rule was applied
    /// (or not, per the configuration).
    pub html: String,

    /// Plain-text projection of `html`.
    pub text: String,

    /// Converter warnings about skipped constructs (tables, drawings, …).
    pub warnings: Vec<String>,

    /// Timing and shape statistics for this run.
    pub stats: ExtractionStats,
}

/// Statistics about a single extraction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Time spent reading the file's bytes, in milliseconds.
    pub read_duration_ms: u64,

    /// Time spent inside the document converter, in milliseconds.
    pub convert_duration_ms: u64,

    /// Total wall-clock time for the extraction, in milliseconds.
    pub total_duration_ms: u64,

    /// Paragraph-level blocks emitted into the HTML (pre-trim).
    pub paragraph_count: usize,

    /// Page-break markers emitted into the HTML (pre-trim).
    pub page_break_count: usize,

    /// Whether the first-page trimming rule actually removed content.
    pub trimmed: bool,
}
