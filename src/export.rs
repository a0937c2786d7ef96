//! Export the stored processing result as a downloadable JSON artifact.

use crate::error::IntakeError;
use crate::result::ProcessingResult;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// The MIME type of every export artifact.
pub const EXPORT_CONTENT_TYPE: &str = "application/json";

/// A re-exportable snapshot of the last successful [`ProcessingResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// `smartdoc-results-{YYYY-MM-DD}.json`, dated at export time.
    pub file_name: String,
    /// Always [`EXPORT_CONTENT_TYPE`].
    pub content_type: &'static str,
    /// UTF-8 JSON, 2-space indentation.
    pub body: Vec<u8>,
}

impl ExportArtifact {
    /// The body as a string slice. Export bodies are always valid UTF-8.
    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or_default()
    }

    /// Write the artifact into `dir` under its own [`file_name`].
    ///
    /// Returns the full path written.
    ///
    /// [`file_name`]: Self::file_name
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, IntakeError> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.body)
            .map_err(|e| IntakeError::Internal(format!("failed to write {}: {e}", path.display())))?;
        Ok(path)
    }
}

/// Serialise the stored result using the current UTC date for the name.
///
/// UTC, not local time: the filename matches what an ISO-8601 timestamp
/// truncated to its date part would carry.
///
/// Fails with [`IntakeError::NothingToExport`] when no result is stored;
/// the failure is user-visible but mutates nothing.
pub fn export(result: Option<&ProcessingResult>) -> Result<ExportArtifact, IntakeError> {
    export_dated(result, chrono::Utc::now().date_naive())
}

/// Same as [`export`] with an injectable date.
pub fn export_dated(
    result: Option<&ProcessingResult>,
    date: NaiveDate,
) -> Result<ExportArtifact, IntakeError> {
    let result = result.ok_or(IntakeError::NothingToExport)?;
    Ok(ExportArtifact {
        file_name: format!("smartdoc-results-{}.json", date.format("%Y-%m-%d")),
        content_type: EXPORT_CONTENT_TYPE,
        body: result.to_pretty_json().into_bytes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn export_without_result_fails() {
        match export(None) {
            Err(IntakeError::NothingToExport) => {}
            other => panic!("expected NothingToExport, got {other:?}"),
        }
    }

    #[test]
    fn export_names_artifact_with_iso_date() {
        let r = ProcessingResult::from_json(r#"{"summary":"ok"}"#).unwrap();
        let artifact = export_dated(Some(&r), date(2024, 1, 15)).expect("export");

        assert_eq!(artifact.file_name, "smartdoc-results-2024-01-15.json");
        assert_eq!(artifact.content_type, "application/json");
        assert_eq!(artifact.body_str(), "{\n  \"summary\": \"ok\"\n}");
    }

    #[test]
    fn export_is_dated_in_utc() {
        let r = ProcessingResult::from_json(r#"{"summary":"ok"}"#).unwrap();
        let artifact = export(Some(&r)).expect("export");
        let expected = format!(
            "smartdoc-results-{}.json",
            chrono::Utc::now().date_naive().format("%Y-%m-%d")
        );
        assert_eq!(artifact.file_name, expected);
    }

    #[test]
    fn export_body_reproduces_unknown_keys() {
        let r = ProcessingResult::from_json(r#"{"summary":"ok","file_id":"x","custom":1}"#)
            .unwrap();
        let artifact = export_dated(Some(&r), date(2026, 8, 29)).expect("export");
        let back: serde_json::Value = serde_json::from_slice(&artifact.body).unwrap();
        assert_eq!(back["custom"], 1);
        assert_eq!(back["file_id"], "x");
    }

    #[test]
    fn write_to_dir_uses_artifact_name() {
        let r = ProcessingResult::from_json(r#"{"summary":"ok"}"#).unwrap();
        let artifact = export_dated(Some(&r), date(2024, 1, 15)).expect("export");

        let dir = tempfile::tempdir().expect("tempdir");
        let path = artifact.write_to_dir(dir.path()).expect("write");
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "smartdoc-results-2024-01-15.json"
        );
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "{\n  \"summary\": \"ok\"\n}"
        );
    }
}
