//! One-shot extraction entry points.
//!
//! These are the non-interactive surface: give a file (or bytes), get the
//! full [`ExtractionOutput`] back. The interactive surface — the state
//! machine a host UI drives — lives in [`crate::controller`]; both run the
//! same pipeline stages.

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::output::{ExtractionOutput, ExtractionStats};
use crate::pipeline::docx::{DocumentConverter, DocxConverter};
use crate::pipeline::{input, text, trim};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Extract a DOCX file to HTML and plain text.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// - [`ExtractError::UnsupportedFileType`] — name lacks the `.docx` suffix;
///   refused before any I/O
/// - the byte-read family — file missing, unreadable
/// - [`ExtractError::NotADocx`] / [`ExtractError::ConversionFailure`] —
///   readable, but not a convertible document
pub async fn extract(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let total_start = Instant::now();
    let path = path.as_ref();
    let name = file_name_of(path);
    info!("starting extraction: {}", path.display());

    // The extension guard runs before the file is touched.
    if !input::has_docx_extension(&name) {
        return Err(ExtractError::UnsupportedFileType { name });
    }
    input::resolve_local(path)?;

    let read_start = Instant::now();
    let bytes = input::read_file_bytes(path).await?;
    let read_duration_ms = read_start.elapsed().as_millis() as u64;
    debug!(bytes = bytes.len(), "file read");

    run_pipeline(name, bytes, config, read_duration_ms, total_start).await
}

/// Extract DOCX bytes already in memory.
///
/// The declared `name` still goes through the extension guard — the guard
/// is about what the caller claims the file is, not where the bytes came
/// from.
pub async fn extract_from_bytes(
    name: impl Into<String>,
    bytes: Vec<u8>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let total_start = Instant::now();
    let name = name.into();
    if !input::has_docx_extension(&name) {
        return Err(ExtractError::UnsupportedFileType { name });
    }
    run_pipeline(name, bytes, config, 0, total_start).await
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ExtractError::Internal(format!("failed to create tokio runtime: {e}")))?
        .block_on(extract(path, config))
}

/// Extract a DOCX file and write the HTML to `output_path`.
///
/// Uses atomic write (temp file + rename) so a failed run never leaves a
/// partial output file behind.
pub async fn extract_to_file(
    path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let output = extract(path, config).await?;
    let out = output_path.as_ref();

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ExtractError::OutputWriteFailed {
                    path: out.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = out.with_extension("html.tmp");
    tokio::fs::write(&tmp_path, &output.html)
        .await
        .map_err(|e| ExtractError::OutputWriteFailed {
            path: out.to_path_buf(),
            source: e,
        })?;
    tokio::fs::rename(&tmp_path, out)
        .await
        .map_err(|e| ExtractError::OutputWriteFailed {
            path: out.to_path_buf(),
            source: e,
        })?;

    Ok(output)
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// The converter to use: the caller-provided one, or the built-in.
pub(crate) fn resolve_converter(config: &ExtractionConfig) -> Arc<dyn DocumentConverter> {
    match &config.converter {
        Some(converter) => Arc::clone(converter),
        None => Arc::new(DocxConverter::new()),
    }
}

async fn run_pipeline(
    name: String,
    bytes: Vec<u8>,
    config: &ExtractionConfig,
    read_duration_ms: u64,
    total_start: Instant,
) -> Result<ExtractionOutput, ExtractError> {
    if !input::looks_like_docx(&bytes) {
        return Err(ExtractError::NotADocx {
            magic: input::magic_of(&bytes),
            name,
        });
    }

    // Parsing is CPU-bound; keep it off the event loop.
    let converter = resolve_converter(config);
    let convert_config = config.clone();
    let convert_start = Instant::now();
    let converted =
        tokio::task::spawn_blocking(move || converter.convert(&bytes, &convert_config))
            .await
            .map_err(|e| ExtractError::Internal(format!("converter task failed: {e}")))??;
    let convert_duration_ms = convert_start.elapsed().as_millis() as u64;

    let html = trim::trim_first_page(
        &converted.html,
        config.skip_first_page,
        &config.page_break.class,
    );
    let trimmed = html.len() != converted.html.len();
    let text = text::visible_text(html, config.text_width);

    let stats = ExtractionStats {
        read_duration_ms,
        convert_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        paragraph_count: converted.paragraph_count,
        page_break_count: converted.page_break_count,
        trimmed,
    };
    info!(
        paragraphs = stats.paragraph_count,
        page_breaks = stats.page_break_count,
        trimmed = stats.trimmed,
        total_ms = stats.total_duration_ms,
        "extraction complete"
    );

    Ok(ExtractionOutput {
        source_file_name: name,
        html: html.to_string(),
        text,
        warnings: converted.warnings,
        stats,
    })
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
