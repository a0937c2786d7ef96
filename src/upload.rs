//! The wire call: one multipart POST to the processing service.
//!
//! Kept separate from the state machine so [`crate::workflow`] stays focused
//! on transitions and this module on reqwest plumbing. The split also pins
//! the required event ordering: the session emits "Uploading document..."
//! before calling [`send_upload`], judges the HTTP status with
//! [`ensure_success`], and only then emits "Processing document..." before
//! [`parse_response`] touches the body.

use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::result::ProcessingResult;
use crate::validate::CandidateFile;
use std::time::Duration;
use tracing::debug;

/// Build the HTTP client used for the session's uploads.
pub fn build_client(config: &IntakeConfig) -> Result<reqwest::Client, IntakeError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upload_timeout_secs))
        .build()
        .map_err(|e| IntakeError::Internal(format!("failed to build HTTP client: {e}")))
}

/// The upload endpoint, with the `include_text` debugging flag when enabled.
pub fn endpoint(config: &IntakeConfig) -> String {
    if config.include_text {
        format!("{}?include_text=true", config.upload_url())
    } else {
        config.upload_url()
    }
}

/// Dispatch the multipart POST: a single part named `file` carrying the raw
/// bytes, the original filename, and the declared MIME type.
///
/// Errors here are transport-level only, meaning the request never produced
/// a response. HTTP-level failure is judged by [`parse_response`].
pub async fn send_upload(
    client: &reqwest::Client,
    config: &IntakeConfig,
    file: &CandidateFile,
    bytes: Vec<u8>,
) -> Result<reqwest::Response, IntakeError> {
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(file.name.clone())
        .mime_str(&file.mime_type)
        .map_err(|e| IntakeError::Internal(format!("invalid MIME '{}': {e}", file.mime_type)))?;
    let form = reqwest::multipart::Form::new().part("file", part);

    let url = endpoint(config);
    debug!("POST {url} ({} bytes)", file.byte_size);

    client.post(&url).multipart(form).send().await.map_err(|e| {
        let detail = if e.is_timeout() {
            format!("request timed out after {}s", config.upload_timeout_secs)
        } else {
            e.to_string()
        };
        IntakeError::TransportFailed { detail }
    })
}

/// Judge the HTTP status of a response.
///
/// Any 2xx passes the response through untouched; everything else is a
/// [`IntakeError::RequestFailed`] carrying the status code, and the body is
/// never read.
pub fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, IntakeError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(IntakeError::RequestFailed {
            status: status.as_u16(),
        })
    }
}

/// Parse the body of a successful response as a [`ProcessingResult`].
pub async fn parse_response(response: reqwest::Response) -> Result<ProcessingResult, IntakeError> {
    let body = response
        .text()
        .await
        .map_err(|e| IntakeError::TransportFailed {
            detail: e.to_string(),
        })?;

    ProcessingResult::from_json(&body).map_err(|e| IntakeError::InvalidResponse {
        detail: e.to_string(),
    })
}
