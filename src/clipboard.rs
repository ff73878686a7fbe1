//! Clipboard access behind a narrow write-only seam.
//!
//! The system clipboard is plain-text and write-only here; nothing in the
//! pipeline ever reads it back. [`ClipboardSink`] exists so the controller
//! can be tested headlessly — CI machines rarely have a display server —
//! and so a GUI host can route the copy through its own toolkit instead.

use crate::error::ExtractError;
use std::sync::Mutex;
use tracing::debug;

/// Write-only plain-text clipboard.
///
/// `write_text` may block (the system clipboard is not async); callers on
/// the event loop go through `spawn_blocking`.
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ExtractError>;
}

/// The real system clipboard, via `arboard`.
///
/// The `arboard` handle is not `Send`, so it is created on demand inside
/// each write rather than stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ExtractError> {
        let mut clip = arboard::Clipboard::new().map_err(|e| ExtractError::ClipboardFailure {
            detail: e.to_string(),
        })?;
        clip.set_text(text)
            .map_err(|e| ExtractError::ClipboardFailure {
                detail: e.to_string(),
            })?;
        debug!(bytes = text.len(), "wrote text to system clipboard");
        Ok(())
    }
}

/// An in-memory clipboard for tests and headless environments.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last text written, if any.
    pub fn contents(&self) -> Option<String> {
        self.content.lock().ok().and_then(|g| g.clone())
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ExtractError> {
        if let Ok(mut guard) = self.content.lock() {
            *guard = Some(text.to_string());
        }
        Ok(())
    }
}
