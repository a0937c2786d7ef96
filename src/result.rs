//! The processing-service response model.
//!
//! The service's JSON is treated as read-only and *lenient*: every
//! sub-object is optional, unknown keys are retained, and map-valued fields
//! tolerate malformed entries instead of failing the whole parse. Explicit
//! typed options replace ad-hoc "reach in and hope" access; rendering does
//! the default substitution, never silent null propagation.
//!
//! Round-trip fidelity matters: the raw panel and the export artifact must
//! reproduce the payload the service actually sent. Absent fields are
//! skipped on serialisation and unknown keys are captured via
//! `#[serde(flatten)]`, so a result parsed from `{"summary":"ok"}`
//! serialises back to exactly that object. `serde_json`'s `preserve_order`
//! feature keeps `extracted_fields` / `validation` iteration in response
//! order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The structured response from the remote document-processing service.
///
/// Stored by the session only after a 2xx response with a parseable JSON
/// body; each success overwrites the previous result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Original filename, echoed back by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Service-side pipeline status (`"completed"` / `"failed"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// OCR confidence and extracted-text length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr: Option<OcrReport>,

    /// Document classification verdict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,

    /// Field-type name → ordered list of extracted string values.
    /// Keys are unique; order is as received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_fields: Option<Map<String, Value>>,

    /// Field-type name → ordered list of validation verdicts.
    /// Values that are not arrays are tolerated and skipped by consumers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Map<String, Value>>,

    /// Service-generated document summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Server-side identifier for follow-up text extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,

    /// Service-side error description when `status` is `"failed"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Full cleaned OCR text, present only when requested with
    /// `include_text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,

    /// Any response keys this model does not declare, retained verbatim so
    /// the raw panel and export reproduce the complete payload.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Document classification verdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    /// Percentage, 0–100.
    #[serde(default)]
    pub confidence: f64,
}

/// OCR quality report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrReport {
    /// Percentage, 0–100.
    #[serde(default)]
    pub confidence: f64,
    /// Length of the cleaned extracted text, in characters.
    #[serde(default)]
    pub text_length: u64,
}

/// A single per-value validation verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationEntry {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default)]
    pub message: String,
}

impl ValidationEntry {
    /// Lenient conversion from an arbitrary array element. Missing or
    /// mistyped members fall back to their defaults (`is_valid` = false),
    /// never an error.
    pub fn from_value(v: &Value) -> Self {
        serde_json::from_value(v.clone()).unwrap_or_default()
    }
}

impl ProcessingResult {
    /// Parse a service response body.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Pretty-print this result as JSON with 2-space indentation.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// The string values under one extracted-fields key, in received order.
    ///
    /// Array elements that are not strings are rendered through their JSON
    /// representation; a non-array value yields an empty list.
    pub fn field_values(value: &Value) -> Vec<String> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The validation verdicts under one validation key, in received order.
    /// `None` when the value is not an array (silently skipped by callers).
    pub fn validation_entries(value: &Value) -> Option<Vec<ValidationEntry>> {
        match value {
            Value::Array(items) => Some(items.iter().map(ValidationEntry::from_value).collect()),
            _ => None,
        }
    }
}
