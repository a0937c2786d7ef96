//! Configuration for an intake session.
//!
//! All behaviour is controlled through [`IntakeConfig`], built via its
//! [`IntakeConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share a config across sessions, log it, and diff two runs.

use crate::error::IntakeError;
use crate::status::StatusCallback;
use std::fmt;

/// Configuration for a document-intake session.
///
/// Built via [`IntakeConfig::builder()`] or [`IntakeConfig::default()`].
///
/// # Example
/// ```rust
/// use smartdoc_intake::IntakeConfig;
///
/// let config = IntakeConfig::builder()
///     .base_url("http://docs.internal:5001")
///     .upload_timeout_secs(60)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct IntakeConfig {
    /// Base URL of the processing service. The upload endpoint is
    /// `{base_url}/upload`. Default: `http://127.0.0.1:5001`.
    pub base_url: String,

    /// End-to-end timeout for the upload round trip, in seconds. Default: 120.
    ///
    /// Covers connect, request body transfer, server-side processing, and the
    /// response. Server-side OCR on a dense 16 MB scan can take tens of
    /// seconds, so this is deliberately generous.
    pub upload_timeout_secs: u64,

    /// Ask the service to echo the full cleaned OCR text back in the result
    /// (`?include_text=true`). Default: false.
    ///
    /// Useful for debugging extraction quality; inflates the response by the
    /// size of the document text.
    pub include_text: bool,

    /// Observer for state transitions and status messages. If None, events
    /// are simply not delivered.
    pub status_callback: Option<StatusCallback>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5001".to_string(),
            upload_timeout_secs: 120,
            include_text: false,
            status_callback: None,
        }
    }
}

impl fmt::Debug for IntakeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntakeConfig")
            .field("base_url", &self.base_url)
            .field("upload_timeout_secs", &self.upload_timeout_secs)
            .field("include_text", &self.include_text)
            .field(
                "status_callback",
                &self
                    .status_callback
                    .as_ref()
                    .map(|_| "<dyn IntakeProgressCallback>"),
            )
            .finish()
    }
}

impl IntakeConfig {
    /// Create a new builder for `IntakeConfig`.
    pub fn builder() -> IntakeConfigBuilder {
        IntakeConfigBuilder {
            config: Self::default(),
        }
    }

    /// The fully-formed upload endpoint URL.
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }
}

/// Builder for [`IntakeConfig`].
pub struct IntakeConfigBuilder {
    config: IntakeConfig,
}

impl IntakeConfigBuilder {
    /// Trailing slashes are trimmed so `upload_url()` never doubles them.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn upload_timeout_secs(mut self, secs: u64) -> Self {
        self.config.upload_timeout_secs = secs.max(1);
        self
    }

    pub fn include_text(mut self, v: bool) -> Self {
        self.config.include_text = v;
        self
    }

    pub fn status_callback(mut self, cb: StatusCallback) -> Self {
        self.config.status_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<IntakeConfig, IntakeError> {
        let c = &self.config;
        if !c.base_url.starts_with("http://") && !c.base_url.starts_with("https://") {
            return Err(IntakeError::InvalidConfig(format!(
                "base_url must be an http(s) URL, got '{}'",
                c.base_url
            )));
        }
        Ok(self.config)
    }
}
