//! Local file validation: the gate every candidate passes before any
//! network activity.
//!
//! Validation is a pure check over a [`CandidateFile`] descriptor (name,
//! size, MIME type), so it can run anywhere a file is picked (CLI argument,
//! drag-and-drop shim, test fixture) without touching the bytes themselves.
//! The accepted-type list matches the service's own allow-list exactly;
//! rejecting locally just saves a round trip for a file the service would
//! refuse anyway.

use crate::error::IntakeError;
use serde::{Deserialize, Serialize};

/// MIME types the processing service accepts.
///
/// Matching is by MIME string, never by file extension: a `.pdf` renamed
/// from a zip archive is still rejected once its real type is known.
pub const ALLOWED_MIME_TYPES: [&str; 7] = [
    "application/pdf",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "text/plain",
    "image/bmp",
    "image/tiff",
];

/// Upload size cap: 16 MiB, inclusive. A file of exactly 16 MiB is accepted;
/// one byte over is rejected. Mirrors the service's `MAX_CONTENT_LENGTH`.
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// A user-selected file pending validation and submission.
///
/// Transient: it exists only between selection and either rejection or a
/// successful hand-off to the upload coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    /// Original filename, forwarded verbatim in the multipart part.
    pub name: String,
    /// Size in bytes.
    pub byte_size: u64,
    /// Declared MIME type, e.g. `application/pdf`.
    pub mime_type: String,
}

impl CandidateFile {
    pub fn new(
        name: impl Into<String>,
        byte_size: u64,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            byte_size,
            mime_type: mime_type.into(),
        }
    }

    /// Human-readable size of this file (display-only).
    pub fn size_display(&self) -> String {
        format_file_size(self.byte_size)
    }
}

/// Check a candidate against the accepted-type list and the size cap.
///
/// Pure, no side effects; the caller decides what to do with the selection.
/// Type is checked before size, so an oversized file of a disallowed type
/// reports [`IntakeError::UnsupportedType`].
pub fn validate(file: &CandidateFile) -> Result<(), IntakeError> {
    if !ALLOWED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(IntakeError::UnsupportedType {
            mime_type: file.mime_type.clone(),
        });
    }
    if file.byte_size > MAX_UPLOAD_BYTES {
        return Err(IntakeError::FileTooLarge {
            size: file.byte_size,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Format a byte count with base-1024 units (Bytes/KB/MB/GB).
///
/// Two-decimal rounding with trailing zeros trimmed: `1536` → `"1.5 KB"`,
/// `1024` → `"1 KB"`. A zero-byte file is the literal `"0 Bytes"`.
/// Sizes past the GB bucket stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exp = (((bytes as f64).ln() / 1024f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exp as i32);

    let mut num = format!("{:.2}", scaled);
    while num.ends_with('0') {
        num.pop();
    }
    if num.ends_with('.') {
        num.pop();
    }

    format!("{} {}", num, UNITS[exp])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(size: u64) -> CandidateFile {
        CandidateFile::new("doc.pdf", size, "application/pdf")
    }

    #[test]
    fn accepts_every_allowed_type() {
        for mime in ALLOWED_MIME_TYPES {
            let f = CandidateFile::new("f", 10, mime);
            assert!(validate(&f).is_ok(), "{mime} should be accepted");
        }
    }

    #[test]
    fn rejects_disallowed_type_regardless_of_size() {
        for size in [0, 1, MAX_UPLOAD_BYTES, MAX_UPLOAD_BYTES * 4] {
            let f = CandidateFile::new("archive.zip", size, "application/zip");
            match validate(&f) {
                Err(IntakeError::UnsupportedType { mime_type }) => {
                    assert_eq!(mime_type, "application/zip");
                }
                other => panic!("expected UnsupportedType, got {other:?}"),
            }
        }
    }

    #[test]
    fn size_boundary_is_inclusive() {
        assert!(validate(&pdf(MAX_UPLOAD_BYTES)).is_ok());

        match validate(&pdf(MAX_UPLOAD_BYTES + 1)) {
            Err(IntakeError::FileTooLarge { size, max }) => {
                assert_eq!(size, MAX_UPLOAD_BYTES + 1);
                assert_eq!(max, MAX_UPLOAD_BYTES);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn zero_byte_file_is_valid_and_displays_literal() {
        let f = pdf(0);
        assert!(validate(&f).is_ok());
        assert_eq!(f.size_display(), "0 Bytes");
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(16 * 1024 * 1024), "16 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn size_formatting_rounds_to_two_decimals() {
        // 1,234,567 bytes = 1.177... MB → 1.18 MB
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
        // 1100 bytes = 1.074... KB → 1.07 KB
        assert_eq!(format_file_size(1100), "1.07 KB");
    }

    #[test]
    fn huge_sizes_stay_in_gb() {
        // 2 TiB; the unit table ends at GB
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }
}
