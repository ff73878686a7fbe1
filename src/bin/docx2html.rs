//! CLI binary for docx2html.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use docx2html::{
    extract, extract_to_file, ClipboardSink, ExtractionConfig, ExtractionOutput, SystemClipboard,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract to HTML on stdout (first page skipped by default)
  docx2html report.docx

  # Keep the cover page
  docx2html --keep-first-page report.docx

  # Write the HTML to a file
  docx2html report.docx -o report.html

  # Print the plain-text projection instead of HTML
  docx2html --text report.docx

  # Put the plain text on the system clipboard
  docx2html --copy report.docx

  # Structured JSON output (HTML, text, warnings, stats)
  docx2html --json report.docx > report.json

NOTES:
  Page breaks are detected from explicit breaks in the document
  (Ctrl+Enter in Word) and rendered as <hr class="page-break"> in the
  HTML. Documents without an explicit break are never trimmed.

ENVIRONMENT VARIABLES:
  DOCX2HTML_OUTPUT   Default for -o/--output
  DOCX2HTML_WIDTH    Default for --width
  RUST_LOG           Overrides the log filter (tracing-subscriber syntax)
"#;

/// Extract DOCX documents to HTML and plain text.
#[derive(Parser, Debug)]
#[command(
    name = "docx2html",
    version,
    about = "Extract DOCX documents to HTML and plain text",
    long_about = "Convert a Word document (.docx) to HTML, optionally dropping everything up \
to and including the first page break (cover pages, title pages), and print, save, or copy \
the result.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the .docx file.
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long, env = "DOCX2HTML_OUTPUT")]
    output: Option<PathBuf>,

    /// Print the plain-text projection instead of HTML.
    #[arg(long)]
    text: bool,

    /// Copy the plain-text projection to the system clipboard.
    #[arg(long)]
    copy: bool,

    /// Keep the first page (disable the default trim).
    #[arg(long)]
    keep_first_page: bool,

    /// Wrap column for the plain-text projection.
    #[arg(long, env = "DOCX2HTML_WIDTH", default_value_t = 80)]
    width: usize,

    /// Output structured JSON (ExtractionOutput) instead of HTML.
    #[arg(long)]
    json: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = ExtractionConfig::builder()
        .skip_first_page(!cli.keep_first_page)
        .text_width(cli.width)
        .build()
        .context("Invalid configuration")?;

    // ── Spinner ──────────────────────────────────────────────────────────
    // One file converts in well under a second normally; the spinner only
    // earns its keep on very large documents.
    let show_spinner = !cli.quiet && !cli.json && cli.output.is_some();
    let spinner = if show_spinner {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("Extracting {}…", cli.input.display()));
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    // ── Run extraction ───────────────────────────────────────────────────
    let output = if let Some(ref output_path) = cli.output {
        extract_to_file(&cli.input, output_path, &config).await
    } else {
        extract(&cli.input, &config).await
    };

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let output = match output {
        Ok(o) => o,
        Err(e) => {
            // The full diagnostic is already on the tracing channel.
            tracing::debug!(error = %e, "extraction failed");
            anyhow::bail!("{}", e);
        }
    };

    // ── Print / copy ─────────────────────────────────────────────────────
    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if let Some(ref output_path) = cli.output {
        if !cli.quiet {
            print_summary(&output, &format!("→  {}", output_path.display()));
        }
    } else {
        let body = if cli.text { &output.text } else { &output.html };
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(body.as_bytes())
            .context("Failed to write to stdout")?;
        if !body.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    if cli.copy {
        SystemClipboard::new()
            .write_text(&output.text)
            .context("Failed to copy text to the clipboard")?;
        if !cli.quiet {
            eprintln!(
                "{} copied {} to the clipboard",
                green("✔"),
                bold(&format!("{} chars", output.text.chars().count()))
            );
        }
    }

    if !cli.quiet && !cli.json && cli.output.is_none() {
        print_summary(&output, "");
    }

    Ok(())
}

fn print_summary(output: &ExtractionOutput, suffix: &str) {
    eprintln!(
        "{} {}  {} paragraphs, {} page breaks{}  {}ms  {}",
        green("✔"),
        bold(&output.source_file_name),
        output.stats.paragraph_count,
        output.stats.page_break_count,
        if output.stats.trimmed {
            "  (first page trimmed)".to_string()
        } else {
            String::new()
        },
        output.stats.total_duration_ms,
        dim(suffix),
    );
    for warning in &output.warnings {
        eprintln!("  {} {}", yellow("⚠"), warning);
    }
}
