//! # smartdoc-intake
//!
//! Client-side workflow controller for the SmartDoc document-processing
//! service: validate a file, upload it, and turn the JSON verdict into
//! display-ready panels and a dated export artifact.
//!
//! ## Why this crate?
//!
//! The intake workflow is deceptively stateful: a file must be validated
//! before it is held, a submission must not be re-entered while one is in
//! flight, a failed upload must keep both the candidate and the previous
//! result, and the status line has a fixed two-phase script ("Uploading
//! document..." then "Processing document..."). Scattering that across UI
//! code breeds subtle regressions. This crate centralises it in one typed
//! state machine, with rendering and export as pure functions over the
//! service's result document.
//!
//! ## Workflow Overview
//!
//! ```text
//! file bytes
//!  │
//!  ├─ 1. Validate  MIME allow-list + 16 MB cap (validate)
//!  ├─ 2. Select    hold the candidate, notify observers (workflow)
//!  ├─ 3. Submit    multipart POST /upload (upload)
//!  ├─ 4. Parse     lenient JSON → ProcessingResult (result)
//!  ├─ 5. Render    overview / summary / fields / validation / raw (render)
//!  └─ 6. Export    smartdoc-results-YYYY-MM-DD.json (export)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use smartdoc_intake::{IntakeConfig, IntakeSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = IntakeConfig::builder()
//!         .base_url("http://127.0.0.1:5001")
//!         .build()?;
//!     let mut session = IntakeSession::new(config)?;
//!
//!     let bytes = std::fs::read("invoice.pdf")?;
//!     session.select("invoice.pdf", "application/pdf", bytes)?;
//!     let result = session.submit().await?;
//!
//!     let view = smartdoc_intake::render(&result);
//!     println!("{}", view.overview.document_type);
//!     println!("{}", view.summary);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `smartdoc` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! smartdoc-intake = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod render;
pub mod result;
pub mod status;
pub mod upload;
pub mod validate;
pub mod workflow;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use aggregate::{aggregate, FieldTotals};
pub use config::{IntakeConfig, IntakeConfigBuilder};
pub use error::IntakeError;
pub use export::{export, export_dated, ExportArtifact, EXPORT_CONTENT_TYPE};
pub use render::{render, FieldGroup, OverviewPanel, ResultView, ValidationLine};
pub use result::{Classification, OcrReport, ProcessingResult, ValidationEntry};
pub use status::{IntakeProgressCallback, NoopProgressCallback, StatusCallback};
pub use validate::{
    format_file_size, validate, CandidateFile, ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES,
};
pub use workflow::{IntakeSession, WorkflowState};
