//! CLI binary for smartdoc-intake.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `IntakeConfig`, drives one intake session, and prints the result panels.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use smartdoc_intake::{
    aggregate, render, IntakeConfig, IntakeProgressCallback, IntakeSession, StatusCallback,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI status callback using indicatif ──────────────────────────────────────

/// Terminal status callback: a single spinner whose message follows the
/// workflow's status line ("Uploading document..." / "Processing
/// document...") and disappears when the submission finishes.
struct CliStatusCallback {
    bar: ProgressBar,
}

impl CliStatusCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl IntakeProgressCallback for CliStatusCallback {
    fn on_file_selected(&self, name: &str, size_display: &str) {
        self.bar.println(format!(
            "{} {}  {}",
            cyan("◆"),
            bold(name),
            dim(&format!("({size_display})")),
        ));
    }

    fn on_status(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn on_status_dismissed(&self) {
        self.bar.finish_and_clear();
    }

    fn on_completed(&self, _result: &smartdoc_intake::ProcessingResult) {
        eprintln!("{} document processed", green("✔"));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Process a document against a local service
  smartdoc invoice.pdf

  # Point at another service instance
  smartdoc --base-url http://docs.internal:5001 contract.pdf

  # Raw JSON result instead of panels
  smartdoc --json scan.png > result.json

  # Save a dated export artifact next to the panels
  smartdoc --export . statement.pdf

  # Override the guessed MIME type
  smartdoc --mime image/tiff page.tif

  # Include the full cleaned OCR text in the result
  smartdoc --include-text --json receipt.jpg

SUPPORTED FILE TYPES:
  application/pdf   .pdf
  image/jpeg        .jpg .jpeg
  image/png         .png
  image/bmp         .bmp
  image/tiff        .tif .tiff
  text/plain        .txt

  Maximum file size: 16 MB.

ENVIRONMENT VARIABLES:
  SMARTDOC_BASE_URL        Base URL of the processing service
  SMARTDOC_UPLOAD_TIMEOUT  Upload round-trip timeout in seconds
  RUST_LOG                 Tracing filter (overrides -v/-q)
"#;

/// Upload a document to a SmartDoc processing service and print the verdict.
#[derive(Parser, Debug)]
#[command(
    name = "smartdoc",
    version,
    about = "Upload a document to a SmartDoc processing service and print the verdict",
    long_about = "Validate a document (MIME allow-list, 16 MB cap), upload it to a SmartDoc \
processing service, and print the result as overview / summary / fields / validation panels, \
raw JSON, or a dated export file.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Document to process.
    file: PathBuf,

    /// Base URL of the processing service.
    #[arg(long, env = "SMARTDOC_BASE_URL", default_value = "http://127.0.0.1:5001")]
    base_url: String,

    /// Upload round-trip timeout in seconds.
    #[arg(long, env = "SMARTDOC_UPLOAD_TIMEOUT", default_value_t = 120)]
    upload_timeout: u64,

    /// Override the MIME type guessed from the file extension.
    #[arg(long)]
    mime: Option<String>,

    /// Ask the service to include the full cleaned OCR text in the result.
    #[arg(long)]
    include_text: bool,

    /// Print the raw JSON result instead of panels.
    #[arg(long)]
    json: bool,

    /// Write a dated export file (smartdoc-results-YYYY-MM-DD.json) to DIR.
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,

    /// Disable the status spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and the requested result.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner owns the terminal while a submission runs, so library
    // logs stay at error level unless -v asks for them.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let mut builder = IntakeConfig::builder()
        .base_url(&cli.base_url)
        .upload_timeout_secs(cli.upload_timeout)
        .include_text(cli.include_text);
    if show_progress {
        let cb = CliStatusCallback::new();
        builder = builder.status_callback(cb as StatusCallback);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Select and submit ────────────────────────────────────────────────
    let file_name = cli
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("Input path has no file name")?;
    let mime_type = match &cli.mime {
        Some(m) => m.clone(),
        None => mime_guess::from_path(&cli.file)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string(),
    };
    let bytes = tokio::fs::read(&cli.file)
        .await
        .with_context(|| format!("Failed to read {:?}", cli.file))?;

    let mut session = IntakeSession::new(config).context("Failed to create session")?;
    session
        .select(&file_name, &mime_type, bytes)
        .with_context(|| format!("'{file_name}' was rejected"))?;

    let result = session
        .submit()
        .await
        .with_context(|| format!("Processing '{file_name}' failed"))?;

    // ── Print the result ─────────────────────────────────────────────────
    if cli.json {
        let json = result.to_pretty_json();
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(json.as_bytes())
            .context("Failed to write to stdout")?;
        handle.write_all(b"\n").ok();
    } else {
        print_panels(&result);
    }

    // ── Export ───────────────────────────────────────────────────────────
    if let Some(ref dir) = cli.export {
        let artifact = session.export().context("Export failed")?;
        let path = artifact
            .write_to_dir(dir)
            .with_context(|| format!("Failed to write export to {:?}", dir))?;
        if !cli.quiet {
            eprintln!("{} exported to {}", green("✔"), bold(&path.display().to_string()));
        }
    }

    Ok(())
}

/// Print the overview / summary / fields / validation panels.
fn print_panels(result: &smartdoc_intake::ProcessingResult) {
    let view = render(result);
    let totals = aggregate(result);

    println!("{}", bold("Overview"));
    println!("  Document type   {}", cyan(&view.overview.document_type));
    println!("  Classification  {}", view.overview.confidence);
    println!("  OCR quality     {}", view.overview.ocr_quality);
    println!("  Text length     {}", view.overview.text_length);
    println!(
        "  Fields          {} / {}",
        view.overview.fields_summary, view.overview.valid_fields_summary
    );
    println!();

    println!("{}", bold("Summary"));
    println!("  {}", view.summary);
    println!();

    println!("{}", bold("Extracted Fields"));
    if view.fields.is_empty() {
        println!("  {}", dim("No fields extracted"));
    } else {
        for group in &view.fields {
            println!("  {}", bold(&group.label));
            for value in &group.values {
                println!("    {value}");
            }
        }
    }
    println!();

    println!("{}", bold("Validation"));
    if view.validation.is_empty() {
        println!("  {}", dim("No validation results"));
    } else {
        for line in &view.validation {
            let mark = if line.is_valid { green("✓") } else { red("✗") };
            let mut text = format!("  {} {}  {}", mark, bold(&line.field), line.value);
            if !line.message.is_empty() {
                text.push_str(&format!("  {}", dim(&line.message)));
            }
            println!("{text}");
        }
    }

    if totals.fields_count > 0 {
        println!();
        println!(
            "{}",
            dim(&format!(
                "{} fields, {} valid",
                totals.fields_count, totals.valid_fields_count
            ))
        );
    }
}
