//! Error types for the smartdoc-intake library.
//!
//! One enum, four failure families, matching how callers recover:
//!
//! * **Validation** — the file was rejected locally, before any network
//!   activity. The selection is cleared; the user picks another file.
//! * **Workflow** — the operation does not make sense in the current state
//!   (nothing selected, or a request is already in flight).
//! * **Request / Transport** — the upload reached the wire and failed.
//!   The selected file is retained so the user can resubmit as-is.
//! * **Export** — nothing stored to export. No other effect.
//!
//! No failure is fatal to an [`crate::workflow::IntakeSession`]: every variant
//! leaves the session in an interactive, resubmittable state. Recovery is
//! always user-initiated; the library performs no automatic retries.

use thiserror::Error;

/// All errors returned by the smartdoc-intake library.
#[derive(Debug, Error)]
pub enum IntakeError {
    // ── Validation errors ─────────────────────────────────────────────────
    /// The candidate file's MIME type is not in the accepted set.
    #[error("Unsupported file type '{mime_type}'. Accepted: PDF, JPG, PNG, TXT, BMP, TIFF.")]
    UnsupportedType { mime_type: String },

    /// The candidate file exceeds the upload size cap.
    #[error("File is too large: {size} bytes (maximum is {max} bytes / 16 MB)")]
    FileTooLarge { size: u64, max: u64 },

    // ── Workflow errors ───────────────────────────────────────────────────
    /// `submit` was called with no file selected.
    #[error("No file selected. Select a file before submitting.")]
    NoFileSelected,

    /// `submit` was called while a previous submission is still in flight.
    ///
    /// Re-entrant submits are rejected rather than queued; the in-flight
    /// request runs to completion untouched.
    #[error("A submission is already in flight; wait for it to finish")]
    SubmitInFlight,

    // ── Request errors ────────────────────────────────────────────────────
    /// The service answered with a non-success HTTP status.
    #[error("HTTP error! status: {status}")]
    RequestFailed { status: u16 },

    // ── Transport errors ──────────────────────────────────────────────────
    /// The request never produced a response (connection refused, timeout,
    /// DNS failure, ...).
    #[error("Upload failed: {detail}")]
    TransportFailed { detail: String },

    /// The service answered 2xx but the body was not parseable JSON.
    #[error("Invalid response from service: {detail}")]
    InvalidResponse { detail: String },

    // ── Export errors ─────────────────────────────────────────────────────
    /// Export requested with no stored result.
    #[error("No processing result available to export")]
    NothingToExport,

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntakeError {
    /// True when the selected file survives the failure and `submit` may be
    /// called again without reselecting.
    pub fn is_resubmittable(&self) -> bool {
        matches!(
            self,
            IntakeError::RequestFailed { .. }
                | IntakeError::TransportFailed { .. }
                | IntakeError::InvalidResponse { .. }
        )
    }

    /// True when the failure was detected locally, before any network I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            IntakeError::UnsupportedType { .. } | IntakeError::FileTooLarge { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_display_matches_status_pattern() {
        let e = IntakeError::RequestFailed { status: 500 };
        assert_eq!(e.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn too_large_display_carries_both_sizes() {
        let e = IntakeError::FileTooLarge {
            size: 16 * 1024 * 1024 + 1,
            max: 16 * 1024 * 1024,
        };
        let msg = e.to_string();
        assert!(msg.contains("16777217"), "got: {msg}");
        assert!(msg.contains("16777216"), "got: {msg}");
    }

    #[test]
    fn resubmittable_classification() {
        assert!(IntakeError::RequestFailed { status: 503 }.is_resubmittable());
        assert!(IntakeError::TransportFailed {
            detail: "connection refused".into()
        }
        .is_resubmittable());
        assert!(IntakeError::InvalidResponse {
            detail: "expected value at line 1".into()
        }
        .is_resubmittable());
        assert!(!IntakeError::NoFileSelected.is_resubmittable());
        assert!(!IntakeError::NothingToExport.is_resubmittable());
    }

    #[test]
    fn validation_classification() {
        assert!(IntakeError::UnsupportedType {
            mime_type: "application/zip".into()
        }
        .is_validation());
        assert!(IntakeError::FileTooLarge { size: 1, max: 0 }.is_validation());
        assert!(!IntakeError::RequestFailed { status: 404 }.is_validation());
    }
}
