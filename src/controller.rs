//! The view-state controller: one state machine owning everything a host
//! UI shows.
//!
//! ## Shape
//!
//! All transient state lives in one explicit [`Session`] owned by a
//! [`Controller`] instance — no ambient statics, so tests stay
//! deterministic and two controllers never interfere. The controller
//! mediates between three collaborators it only knows through traits: a
//! [`FileSource`] supplying bytes, a [`DocumentConverter`] turning them
//! into HTML, and a [`ClipboardSink`] receiving the copied text.
//!
//! ## The submit handshake
//!
//! A submission is split into a synchronous begin and an asynchronous
//! finish. [`Controller::begin_submit`] runs the extension guard, performs
//! the implicit reset, enters `Loading`, and hands back a [`SubmitTicket`]
//! carrying a monotonically increasing sequence number.
//! [`Controller::finish_submit`] applies the outcome **only if the ticket
//! is still current** — a second submission bumps the sequence, so a stale
//! read or conversion that completes afterwards is discarded instead of
//! overwriting newer state. [`Controller::submit`] is the convenience that
//! drives both halves for a file source.

use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::config::ExtractionConfig;
use crate::convert::resolve_converter;
use crate::display::DisplaySurface;
use crate::error::ExtractError;
use crate::pipeline::docx::{Converted, DocumentConverter};
use crate::pipeline::input::{has_docx_extension, looks_like_docx, magic_of, FileSource};
use crate::pipeline::trim::trim_first_page;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

// ── Session ──────────────────────────────────────────────────────────────

/// The complete transient state behind the view. Created empty, cleared by
/// [`Controller::reset`] (except the skip-first-page preference, which is a
/// user preference rather than a property of one document), gone when the
/// controller is dropped.
#[derive(Debug, Clone)]
pub struct Session {
    /// Declared name of the current file, once one was accepted.
    pub source_file_name: Option<String>,
    /// Extracted (post-trim) HTML; empty until a conversion succeeds.
    pub raw_html: String,
    /// The first-page trimming preference. Survives files and resets.
    pub skip_first_page: bool,
    /// Whether a submission is currently in flight.
    pub is_loading: bool,
    /// User-facing failure message; only set while no successful
    /// conversion has completed since the last reset or submission.
    pub error_message: Option<String>,
    /// Current text of the copy button/acknowledgment label.
    pub copy_label: CopyLabel,
}

impl Session {
    fn new(skip_first_page: bool) -> Self {
        Self {
            source_file_name: None,
            raw_html: String::new(),
            skip_first_page,
            is_loading: false,
            error_message: None,
            copy_label: CopyLabel::Default,
        }
    }

    /// Derive the one view the host should show.
    ///
    /// Exactly one of loading / result / idle describes the session at any
    /// time; an error is a sub-state of idle (the upload surface stays
    /// interactive under it).
    pub fn view(&self) -> ViewState {
        if self.is_loading {
            ViewState::Loading
        } else if !self.raw_html.is_empty() {
            ViewState::Result
        } else if self.error_message.is_some() {
            ViewState::Error
        } else {
            ViewState::Idle
        }
    }
}

/// The four views a host can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    /// Idle with a failure message showing; the upload surface remains
    /// interactive.
    Error,
    Loading,
    Result,
}

/// Text of the copy acknowledgment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyLabel {
    #[default]
    Default,
    Copied,
}

impl CopyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyLabel::Default => "Copy Text",
            CopyLabel::Copied => "Copied!",
        }
    }
}

// ── Submit ticket ────────────────────────────────────────────────────────

/// Proof of a started submission.
///
/// The sequence number inside is compared on finish; results belonging to
/// a superseded submission are dropped.
#[must_use = "a ticket must be passed back to finish_submit"]
#[derive(Debug)]
pub struct SubmitTicket {
    seq: u64,
}

impl SubmitTicket {
    pub fn sequence(&self) -> u64 {
        self.seq
    }
}

// ── Controller ───────────────────────────────────────────────────────────

/// Owns the [`Session`] and runs every state transition.
pub struct Controller {
    session: Session,
    seq: u64,
    clipboard: Arc<dyn ClipboardSink>,
    config: ExtractionConfig,
}

impl Controller {
    /// A controller writing to the real system clipboard.
    pub fn new(config: ExtractionConfig) -> Self {
        Self::with_clipboard(config, Arc::new(SystemClipboard::new()))
    }

    /// A controller with an injected clipboard (tests, GUI hosts).
    pub fn with_clipboard(config: ExtractionConfig, clipboard: Arc<dyn ClipboardSink>) -> Self {
        let session = Session::new(config.skip_first_page);
        Self {
            session,
            seq: 0,
            clipboard,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> ViewState {
        self.session.view()
    }

    /// Start a submission.
    ///
    /// The extension guard runs here, synchronously: a name without the
    /// `.docx` suffix sets the error message and refuses the transition
    /// without starting any asynchronous work. An accepted name performs
    /// the implicit reset (preserving the preference), enters `Loading`,
    /// and returns the ticket the eventual outcome must present.
    pub fn begin_submit(&mut self, file_name: &str) -> Result<SubmitTicket, ExtractError> {
        if !has_docx_extension(file_name) {
            let err = ExtractError::UnsupportedFileType {
                name: file_name.to_string(),
            };
            warn!(error = %err, "submission refused");
            self.session.error_message = Some(err.user_message().to_string());
            return Err(err);
        }

        self.reset();
        self.session.is_loading = true;
        self.session.source_file_name = Some(file_name.to_string());
        self.seq += 1;
        debug!(seq = self.seq, file = file_name, "submission started");
        Ok(SubmitTicket { seq: self.seq })
    }

    /// Apply the outcome of a submission's asynchronous half.
    ///
    /// Returns `false` when the ticket was superseded by a newer
    /// submission; the outcome is dropped and the session untouched.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<Converted, ExtractError>,
    ) -> bool {
        if ticket.seq != self.seq {
            debug!(
                stale = ticket.seq,
                current = self.seq,
                "discarding result of a superseded submission"
            );
            return false;
        }

        self.session.is_loading = false;
        match outcome {
            Ok(converted) => {
                for warning in &converted.warnings {
                    debug!(warning = %warning, "converter warning");
                }
                let html = trim_first_page(
                    &converted.html,
                    self.session.skip_first_page,
                    &self.config.page_break.class,
                );
                info!(
                    seq = ticket.seq,
                    bytes = html.len(),
                    trimmed = html.len() != converted.html.len(),
                    "conversion succeeded"
                );
                self.session.raw_html = html.to_string();
                self.session.error_message = None;
            }
            Err(e) => {
                warn!(seq = ticket.seq, error = %e, "submission failed");
                self.session.raw_html.clear();
                self.session.error_message = Some(e.user_message().to_string());
            }
        }
        true
    }

    /// Drive a full submission for a file source: guard, read, convert,
    /// apply.
    pub async fn submit(&mut self, source: &dyn FileSource) {
        let ticket = match self.begin_submit(source.name()) {
            Ok(t) => t,
            Err(_) => return,
        };
        let converter = resolve_converter(&self.config);
        let outcome = Self::load(source, converter, self.config.clone()).await;
        self.finish_submit(ticket, outcome);
    }

    /// The asynchronous half of a submission: byte-read, container check,
    /// conversion off the event loop.
    async fn load(
        source: &dyn FileSource,
        converter: Arc<dyn DocumentConverter>,
        config: ExtractionConfig,
    ) -> Result<Converted, ExtractError> {
        let bytes = source.read().await?;
        if !looks_like_docx(&bytes) {
            return Err(ExtractError::NotADocx {
                name: source.name().to_string(),
                magic: magic_of(&bytes),
            });
        }
        tokio::task::spawn_blocking(move || converter.convert(&bytes, &config))
            .await
            .map_err(|e| ExtractError::Internal(format!("converter task failed: {e}")))?
    }

    /// Clear everything except the skip-first-page preference.
    pub fn reset(&mut self) {
        self.session.source_file_name = None;
        self.session.raw_html.clear();
        self.session.is_loading = false;
        self.session.error_message = None;
        self.session.copy_label = CopyLabel::Default;
    }

    /// Update the first-page trimming preference.
    ///
    /// Refused while a submission is in flight; returns whether the value
    /// was applied.
    pub fn set_skip_first_page(&mut self, enabled: bool) -> bool {
        if self.session.is_loading {
            debug!("preference toggle ignored while loading");
            return false;
        }
        self.session.skip_first_page = enabled;
        true
    }

    /// Copy the display surface's rendered text to the clipboard.
    ///
    /// On success the acknowledgment label flips to [`CopyLabel::Copied`];
    /// call [`Controller::revert_copy_label`] after
    /// [`Controller::copy_ack_duration`] (or use
    /// [`spawn_copy_label_revert`]) to restore it. On failure the session
    /// is left untouched and the error is returned for the host to surface
    /// as a one-off notice.
    pub async fn copy_visible_text(
        &mut self,
        display: &dyn DisplaySurface,
    ) -> Result<(), ExtractError> {
        let text = display.visible_text();
        let clipboard = Arc::clone(&self.clipboard);
        let written = tokio::task::spawn_blocking(move || clipboard.write_text(&text))
            .await
            .map_err(|e| ExtractError::Internal(format!("clipboard task failed: {e}")))?;

        match written {
            Ok(()) => {
                self.session.copy_label = CopyLabel::Copied;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                Err(e)
            }
        }
    }

    /// Restore the copy label to its default text.
    pub fn revert_copy_label(&mut self) {
        self.session.copy_label = CopyLabel::Default;
    }

    /// How long the copy acknowledgment should stay up.
    pub fn copy_ack_duration(&self) -> Duration {
        self.config.copy_ack()
    }
}

/// Spawn the timed revert of the copy acknowledgment label.
///
/// For hosts that share the controller behind `Arc<Mutex<_>>`: sleeps for
/// the configured acknowledgment duration, then restores the label. The
/// lock is only held for the flip itself, never across the sleep.
pub fn spawn_copy_label_revert(
    controller: &Arc<Mutex<Controller>>,
) -> tokio::task::JoinHandle<()> {
    let ctrl = Arc::clone(controller);
    let ack = ctrl
        .lock()
        .map(|c| c.copy_ack_duration())
        .unwrap_or(Duration::from_secs(2));
    tokio::spawn(async move {
        tokio::time::sleep(ack).await;
        if let Ok(mut c) = ctrl.lock() {
            c.revert_copy_label();
        }
    })
}
