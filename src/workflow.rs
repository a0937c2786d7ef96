//! The intake workflow: selection, submission, and result retention.
//!
//! [`IntakeSession`] is a small state machine mirroring how an operator uses
//! the intake UI: pick a file, send it, read the result, maybe export it.
//! Each session holds at most one candidate file and at most one result; a
//! fresh successful submission replaces the previous result, a failed one
//! leaves it untouched so whatever the operator last saw stays available.
//!
//! State transitions are strict. `submit` refuses to run while a submission
//! is already in flight, and every transition is reported through the
//! configured [`IntakeProgressCallback`](crate::status::IntakeProgressCallback)
//! before work continues.

use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::export::{self, ExportArtifact};
use crate::render::{self, ResultView};
use crate::result::ProcessingResult;
use crate::upload;
use crate::validate::{self, CandidateFile};
use std::fmt;
use tracing::{debug, info, warn};

// ── Workflow state ──────────────────────────────────────────────────────────

/// Where an [`IntakeSession`] currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// No file selected. The starting state, and the state after
    /// `clear_selection` or a failed validation.
    Idle,
    /// A validated candidate is held and ready to submit.
    FileSelected,
    /// The multipart request is being transferred.
    Uploading,
    /// The service accepted the upload and is working; we are waiting on
    /// (or parsing) the response body.
    Processing,
    /// A submission finished and its result is stored.
    Completed,
    /// The last submission failed. The candidate file is retained so the
    /// operator can resubmit without re-selecting.
    Failed,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::FileSelected => "file-selected",
            Self::Uploading => "uploading",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

// ── Session ─────────────────────────────────────────────────────────────────

/// A single-document intake session against one processing service.
pub struct IntakeSession {
    config: IntakeConfig,
    client: reqwest::Client,
    state: WorkflowState,
    selected: Option<(CandidateFile, Vec<u8>)>,
    last_result: Option<ProcessingResult>,
}

impl fmt::Debug for IntakeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntakeSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("selected", &self.selected.as_ref().map(|(c, _)| &c.name))
            .field("has_result", &self.last_result.is_some())
            .finish()
    }
}

impl IntakeSession {
    /// Create a session from a config. Fails only if the HTTP client cannot
    /// be constructed.
    pub fn new(config: IntakeConfig) -> Result<Self, IntakeError> {
        let client = upload::build_client(&config)?;
        Ok(Self {
            config,
            client,
            state: WorkflowState::Idle,
            selected: None,
            last_result: None,
        })
    }

    /// Current workflow state.
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// The currently held candidate, if any.
    pub fn selected_file(&self) -> Option<&CandidateFile> {
        self.selected.as_ref().map(|(c, _)| c)
    }

    /// The most recent successful result, if any.
    pub fn last_result(&self) -> Option<&ProcessingResult> {
        self.last_result.as_ref()
    }

    /// Render the last result into display-ready panels.
    pub fn view(&self) -> Option<ResultView> {
        self.last_result.as_ref().map(render::render)
    }

    /// Export the last result as a dated JSON artifact.
    pub fn export(&self) -> Result<ExportArtifact, IntakeError> {
        export::export(self.last_result.as_ref())
    }

    /// Validate and hold a candidate file for submission.
    ///
    /// On success the session moves to [`WorkflowState::FileSelected`] and
    /// the callback is told the name and human-readable size. On validation
    /// failure any previously held candidate is dropped and the session
    /// returns to [`WorkflowState::Idle`]; a stale selection must never
    /// outlive a rejected replacement.
    pub fn select(
        &mut self,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), IntakeError> {
        let candidate = CandidateFile::new(name, bytes.len() as u64, mime_type);
        if let Err(e) = validate::validate(&candidate) {
            warn!("rejected '{}': {e}", candidate.name);
            self.selected = None;
            self.transition(WorkflowState::Idle);
            return Err(e);
        }

        info!(
            "selected '{}' ({}, {})",
            candidate.name,
            candidate.size_display(),
            candidate.mime_type
        );
        if let Some(cb) = &self.config.status_callback {
            cb.on_file_selected(&candidate.name, &candidate.size_display());
        }
        self.selected = Some((candidate, bytes));
        self.transition(WorkflowState::FileSelected);
        Ok(())
    }

    /// Drop the held candidate and return to [`WorkflowState::Idle`].
    ///
    /// The last result is kept; clearing the selection is not a reset.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.transition(WorkflowState::Idle);
    }

    /// Submit the held candidate to the processing service.
    ///
    /// Emits `"Uploading document..."` before the request is dispatched and
    /// `"Processing document..."` only once a 2xx response has arrived,
    /// before the body is parsed; a non-2xx answer fails without ever
    /// showing the processing status. On success the result is stored and
    /// returned; the candidate stays selected so it can be resubmitted.
    ///
    /// # Errors
    /// * [`IntakeError::NoFileSelected`] — nothing is held
    /// * [`IntakeError::SubmitInFlight`] — a submission is already running
    /// * [`IntakeError::RequestFailed`] — the service answered non-2xx
    /// * [`IntakeError::TransportFailed`] — the request never completed
    /// * [`IntakeError::InvalidResponse`] — the body was not a result
    ///
    /// On any failure the session moves to [`WorkflowState::Failed`], the
    /// status line is dismissed, the candidate is retained, and the previous
    /// result is left untouched.
    pub async fn submit(&mut self) -> Result<ProcessingResult, IntakeError> {
        if matches!(
            self.state,
            WorkflowState::Uploading | WorkflowState::Processing
        ) {
            return Err(IntakeError::SubmitInFlight);
        }
        let (candidate, bytes) = match &self.selected {
            Some((c, b)) => (c.clone(), b.clone()),
            None => return Err(IntakeError::NoFileSelected),
        };

        self.emit_status("Uploading document...");
        self.transition(WorkflowState::Uploading);

        let response = match upload::send_upload(&self.client, &self.config, &candidate, bytes)
            .await
            .and_then(upload::ensure_success)
        {
            Ok(r) => r,
            Err(e) => return Err(self.fail(e)),
        };

        self.emit_status("Processing document...");
        self.transition(WorkflowState::Processing);

        let result = match upload::parse_response(response).await {
            Ok(r) => r,
            Err(e) => return Err(self.fail(e)),
        };

        debug!(
            "result for '{}': status {:?}",
            candidate.name, result.status
        );
        self.last_result = Some(result.clone());
        self.transition(WorkflowState::Completed);
        self.dismiss_status();
        if let Some(cb) = &self.config.status_callback {
            cb.on_completed(&result);
        }
        Ok(result)
    }

    /// Blocking wrapper around [`IntakeSession::submit`] for non-async callers.
    pub fn submit_sync(&mut self) -> Result<ProcessingResult, IntakeError> {
        tokio::runtime::Runtime::new()
            .map_err(|e| IntakeError::Internal(format!("failed to create tokio runtime: {e}")))?
            .block_on(self.submit())
    }

    fn fail(&mut self, e: IntakeError) -> IntakeError {
        warn!("submission failed: {e}");
        self.transition(WorkflowState::Failed);
        self.dismiss_status();
        e
    }

    fn transition(&mut self, to: WorkflowState) {
        if self.state == to {
            return;
        }
        let from = self.state;
        debug!("state {from} -> {to}");
        self.state = to;
        if let Some(cb) = &self.config.status_callback {
            cb.on_state_change(from, to);
        }
    }

    fn emit_status(&self, message: &str) {
        if let Some(cb) = &self.config.status_callback {
            cb.on_status(message);
        }
    }

    fn dismiss_status(&self) {
        if let Some(cb) = &self.config.status_callback {
            cb.on_status_dismissed();
        }
    }
}
