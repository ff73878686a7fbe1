//! # docx2html
//!
//! Extract DOCX documents to HTML and plain text, with optional first-page
//! trimming and clipboard copy.
//!
//! ## Why this crate?
//!
//! Word documents that follow a template — reports, theses, generated
//! letters — usually carry a cover page nobody wants in the extracted
//! text. This crate converts the document to HTML, renders explicit page
//! breaks as detectable marker elements, and (by default) drops everything
//! up to and including the first one, leaving the content that starts on
//! page two.
//!
//! ## Pipeline Overview
//!
//! ```text
//! DOCX
//!  │
//!  ├─ 1. Input   extension guard, byte-read, container magic check
//!  ├─ 2. Convert parse via docx-rs, emit HTML (page breaks → <hr> marker)
//!  ├─ 3. Trim    drop through the first page-break marker (optional)
//!  ├─ 4. Text    plain-text projection at the configured width
//!  └─ 5. Output  HTML + text + warnings + per-run stats
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docx2html::{extract, ExtractionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::default();
//!     let output = extract("report.docx", &config).await?;
//!     println!("{}", output.html);
//!     eprintln!("{} paragraphs, {} page breaks",
//!         output.stats.paragraph_count,
//!         output.stats.page_break_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Interactive hosts
//!
//! GUI or TUI embeddings drive [`Controller`] instead of [`extract`]: it
//! owns the session state machine (idle → loading → result, with errors as
//! a sub-state of idle), guards submissions, discards results of
//! superseded submissions by sequence number, and handles the clipboard
//! copy with its timed acknowledgment label.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `docx2html` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! docx2html = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod convert;
pub mod display;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use clipboard::{ClipboardSink, MemoryClipboard, SystemClipboard};
pub use config::{ExtractionConfig, ExtractionConfigBuilder, PageBreakStyle};
pub use controller::{
    spawn_copy_label_revert, Controller, CopyLabel, Session, SubmitTicket, ViewState,
};
pub use convert::{extract, extract_from_bytes, extract_sync, extract_to_file};
pub use display::{DisplaySurface, TextDisplay};
pub use error::ExtractError;
pub use output::{ExtractionOutput, ExtractionStats};
pub use pipeline::docx::{Converted, DocumentConverter, DocxConverter};
pub use pipeline::input::{FileSource, PathFileSource};
pub use pipeline::trim::trim_first_page;
