//! Pipeline stages for DOCX-to-HTML extraction.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different document parser) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ docx ──▶ trim ──▶ text
//! (path/bytes) (HTML)  (first page)  (projection)
//! ```
//!
//! 1. [`input`] — extension guard, byte-read, container magic check
//! 2. [`docx`]  — parse the document and emit HTML driven by the style
//!    map; runs in `spawn_blocking` because parsing is CPU-bound
//! 3. [`trim`]  — the first-page trimming rule (pure function)
//! 4. [`text`]  — plain-text projection used by display and clipboard

pub mod docx;
pub mod input;
pub mod text;
pub mod trim;
