//! Error types for the docx2html library.
//!
//! Every failure the pipeline or the controller can hit maps to one variant
//! of [`ExtractError`]. The taxonomy follows the places a submission can
//! fail, in order: the synchronous extension guard, the byte-read, the
//! conversion, and finally the clipboard.
//!
//! Two representations exist for each failure:
//!
//! * the `Display` text — full diagnostic detail, intended for the
//!   `tracing` channel and for library callers;
//! * [`ExtractError::user_message`] — the short fixed string a host UI
//!   shows. The diagnostic detail is logged, never shown verbatim.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the docx2html library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Guard errors (synchronous, pre-I/O) ──────────────────────────────
    /// File name does not end in `.docx`. Detected before any byte is read.
    #[error("unsupported file type: '{name}' (expected a .docx suffix)")]
    UnsupportedFileType { name: String },

    // ── Byte-read errors ─────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// Reading the file's bytes failed for any other reason.
    #[error("failed to read '{path}': {source}")]
    FileReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Conversion errors ────────────────────────────────────────────────
    /// The bytes were read but are not a DOCX container (wrong magic).
    #[error("'{name}' is not a DOCX file; first bytes: {magic:?}")]
    NotADocx { name: String, magic: [u8; 4] },

    /// The document parser rejected the file.
    #[error("conversion failed: {detail}")]
    ConversionFailure { detail: String },

    // ── Clipboard errors ─────────────────────────────────────────────────
    /// Clipboard write failed or was denied. Never mutates the session.
    #[error("clipboard write failed: {detail}")]
    ClipboardFailure { detail: String },

    // ── I/O errors ───────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// The fixed, user-facing message for this failure.
    ///
    /// Unreadable-file and unsupported-content failures get distinct
    /// wording; the raw diagnostic never leaks into the returned string.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractError::UnsupportedFileType { .. } => "Please upload a valid .docx file.",
            ExtractError::FileNotFound { .. }
            | ExtractError::PermissionDenied { .. }
            | ExtractError::FileReadFailure { .. } => "Failed to read the file.",
            ExtractError::NotADocx { .. } | ExtractError::ConversionFailure { .. } => {
                "Failed to extract text from the document. \
                 The file might be corrupted or in an unsupported format."
            }
            ExtractError::ClipboardFailure { .. } => "Failed to copy text.",
            ExtractError::OutputWriteFailed { .. }
            | ExtractError::InvalidConfig(_)
            | ExtractError::Internal(_) => "Something went wrong. Please try again.",
        }
    }
}
