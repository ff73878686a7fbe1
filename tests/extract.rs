//! End-to-end tests for docx2html.
//!
//! Fixture documents are authored in-memory with `docx-rs` itself, so the
//! suite needs no binary files in the repository and exercises the same
//! parser the pipeline uses.

use docx2html::{
    extract, extract_from_bytes, extract_to_file, ClipboardSink, Controller, CopyLabel,
    DisplaySurface, ExtractError, ExtractionConfig, ExtractionOutput, MemoryClipboard,
    PathFileSource, TextDisplay, ViewState,
};
use docx_rs::{BreakType, Docx, Paragraph, Run};
use std::sync::Arc;

// ── Fixture helpers ──────────────────────────────────────────────────────

fn pack(mut docx: Docx) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).expect("pack fixture docx");
    cursor.into_inner()
}

/// A two-page report: a cover page, an explicit page break, then body text.
fn report_with_cover() -> Vec<u8> {
    pack(
        Docx::new()
            .add_paragraph(
                Paragraph::new()
                    .style("Title")
                    .add_run(Run::new().add_text("Annual Report")),
            )
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Prepared by the team")))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
            .add_paragraph(
                Paragraph::new()
                    .style("Heading1")
                    .add_run(Run::new().add_text("Introduction")),
            )
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Body of the report."))),
    )
}

/// A single-page note with no page break at all.
fn single_page_note() -> Vec<u8> {
    pack(
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Just a short note."))),
    )
}

fn write_fixture(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}

// ── One-shot pipeline ────────────────────────────────────────────────────

#[tokio::test]
async fn default_extraction_drops_the_cover_page() {
    let out = extract_from_bytes(
        "report.docx",
        report_with_cover(),
        &ExtractionConfig::default(),
    )
    .await
    .expect("extraction succeeds");

    assert!(!out.html.contains("Annual Report"), "cover must be gone");
    assert!(!out.html.contains("page-break"), "marker must be consumed");
    assert!(out.html.contains("<h1>Introduction</h1>"));
    assert!(out.html.contains("Body of the report."));
    assert!(out.stats.trimmed);
    assert_eq!(out.stats.page_break_count, 1);

    // The text projection mirrors the trimmed HTML, not the full document.
    assert!(out.text.contains("Introduction"));
    assert!(!out.text.contains("Annual Report"));
}

#[tokio::test]
async fn keeping_the_first_page_preserves_everything() {
    let config = ExtractionConfig::builder()
        .skip_first_page(false)
        .build()
        .unwrap();
    let out = extract_from_bytes("report.docx", report_with_cover(), &config)
        .await
        .expect("extraction succeeds");

    assert!(out.html.contains("Annual Report"));
    assert!(out.html.contains("<hr class=\"page-break\">"));
    assert!(out.html.contains("Body of the report."));
    assert!(!out.stats.trimmed);
}

#[tokio::test]
async fn document_without_page_breaks_is_never_trimmed() {
    let out = extract_from_bytes(
        "note.docx",
        single_page_note(),
        &ExtractionConfig::default(),
    )
    .await
    .expect("extraction succeeds");

    assert_eq!(out.html, "<p>Just a short note.</p>");
    assert!(!out.stats.trimmed);
    assert_eq!(out.stats.page_break_count, 0);
}

#[tokio::test]
async fn extract_reads_from_the_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "report.docx", &report_with_cover());

    let out = extract(&path, &ExtractionConfig::default())
        .await
        .expect("extraction succeeds");

    assert_eq!(out.source_file_name, "report.docx");
    assert!(out.html.contains("Introduction"));
}

#[tokio::test]
async fn wrong_extension_is_refused_without_touching_the_file() {
    let dir = tempfile::tempdir().unwrap();
    // Valid DOCX bytes behind a refused name: the guard is on the name.
    let path = write_fixture(&dir, "report.pdf", &report_with_cover());

    let err = extract(&path, &ExtractionConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::UnsupportedFileType { .. }));
    assert_eq!(err.user_message(), "Please upload a valid .docx file.");
}

#[tokio::test]
async fn garbage_content_is_an_extraction_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "broken.docx", b"this is not a zip container");

    let err = extract(&path, &ExtractionConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::NotADocx { .. }));
    assert!(err.user_message().starts_with("Failed to extract text"));
}

#[tokio::test]
async fn extract_to_file_writes_the_trimmed_html() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(&dir, "report.docx", &report_with_cover());
    let output_path = dir.path().join("out").join("report.html");

    let out = extract_to_file(&input, &output_path, &ExtractionConfig::default())
        .await
        .expect("extraction succeeds");

    let written = std::fs::read_to_string(&output_path).expect("output file exists");
    assert_eq!(written, out.html);
    assert!(
        !dir.path().join("out").join("report.html.tmp").exists(),
        "temp file must be renamed away"
    );
}

#[tokio::test]
async fn output_serialises_to_json_and_back() {
    let out = extract_from_bytes(
        "report.docx",
        report_with_cover(),
        &ExtractionConfig::default(),
    )
    .await
    .unwrap();

    let json = serde_json::to_string_pretty(&out).expect("serialise");
    let back: ExtractionOutput = serde_json::from_str(&json).expect("deserialise");
    assert_eq!(back.html, out.html);
    assert_eq!(back.stats.page_break_count, out.stats.page_break_count);
}

// ── Controller flow ──────────────────────────────────────────────────────

fn test_controller() -> (Controller, Arc<MemoryClipboard>) {
    let clipboard = Arc::new(MemoryClipboard::new());
    let controller = Controller::with_clipboard(
        ExtractionConfig::default(),
        Arc::clone(&clipboard) as Arc<dyn ClipboardSink>,
    );
    (controller, clipboard)
}

#[tokio::test]
async fn controller_full_session_against_a_real_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "report.docx", &report_with_cover());
    let (mut controller, clipboard) = test_controller();

    // Submit: Idle → Loading → Result, cover trimmed per the preference.
    controller.submit(&PathFileSource::new(&path)).await;
    assert_eq!(controller.view(), ViewState::Result);
    assert_eq!(
        controller.session().source_file_name.as_deref(),
        Some("report.docx")
    );
    assert!(controller.session().raw_html.contains("Introduction"));
    assert!(!controller.session().raw_html.contains("Annual Report"));

    // Render and copy: the clipboard receives the rendered text.
    let mut display = TextDisplay::new(80);
    display.render(&controller.session().raw_html);
    controller.copy_visible_text(&display).await.unwrap();
    assert_eq!(controller.session().copy_label, CopyLabel::Copied);
    let copied = clipboard.contents().unwrap();
    assert!(copied.contains("Body of the report."));
    assert!(!copied.contains("<p>"));

    // Reset: back to Idle, preference untouched.
    controller.reset();
    assert_eq!(controller.view(), ViewState::Idle);
    assert!(controller.session().raw_html.is_empty());
    assert!(controller.session().source_file_name.is_none());
    assert!(controller.session().skip_first_page);
    assert_eq!(controller.session().copy_label, CopyLabel::Default);
}

#[tokio::test]
async fn controller_preference_survives_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "report.docx", &report_with_cover());
    let (mut controller, _clipboard) = test_controller();

    assert!(controller.set_skip_first_page(false));
    controller.submit(&PathFileSource::new(&path)).await;
    assert!(controller.session().raw_html.contains("Annual Report"));

    // A second submission of the same file inherits the preference.
    controller.submit(&PathFileSource::new(&path)).await;
    assert!(!controller.session().skip_first_page);
    assert!(controller.session().raw_html.contains("Annual Report"));
}

#[tokio::test]
async fn controller_read_failure_leaves_html_empty() {
    let (mut controller, _clipboard) = test_controller();
    let source = PathFileSource::new("/nowhere/at/all/report.docx");

    controller.submit(&source).await;

    assert_eq!(controller.view(), ViewState::Error);
    assert!(controller.session().raw_html.is_empty());
    assert_eq!(
        controller.session().error_message.as_deref(),
        Some("Failed to read the file.")
    );

    // Recoverable: a good file afterwards succeeds.
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "note.docx", &single_page_note());
    controller.submit(&PathFileSource::new(&path)).await;
    assert_eq!(controller.view(), ViewState::Result);
    assert!(controller.session().error_message.is_none());
}

#[tokio::test]
async fn controller_refuses_non_docx_names_synchronously() {
    let (mut controller, _clipboard) = test_controller();
    let source = PathFileSource::new("/nowhere/report.pdf");

    controller.submit(&source).await;

    assert_eq!(controller.view(), ViewState::Error);
    assert_eq!(
        controller.session().error_message.as_deref(),
        Some("Please upload a valid .docx file.")
    );
}

#[tokio::test]
async fn copy_label_reverts_after_the_configured_duration() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "note.docx", &single_page_note());

    let clipboard = Arc::new(MemoryClipboard::new());
    let config = ExtractionConfig::builder().copy_ack_ms(20).build().unwrap();
    let mut controller =
        Controller::with_clipboard(config, Arc::clone(&clipboard) as Arc<dyn ClipboardSink>);

    controller.submit(&PathFileSource::new(&path)).await;
    let mut display = TextDisplay::new(80);
    display.render(&controller.session().raw_html);
    controller.copy_visible_text(&display).await.unwrap();
    assert_eq!(controller.session().copy_label.as_str(), "Copied!");

    let shared = Arc::new(std::sync::Mutex::new(controller));
    docx2html::spawn_copy_label_revert(&shared).await.unwrap();
    assert_eq!(
        shared.lock().unwrap().session().copy_label.as_str(),
        "Copy Text"
    );
}
