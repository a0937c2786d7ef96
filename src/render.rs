//! Pure mapping from a [`ProcessingResult`] to renderable panel models.
//!
//! Rendering is split from presentation on purpose: this module produces
//! plain data (strings, lists, flags) with every fallback substitution
//! already applied, and knows nothing about terminals, widgets, or HTML.
//! The CLI writes these models to stdout; any other surface can consume
//! them unchanged. Each panel is independent: a missing sub-object
//! degrades only its own panel, never the others.

use crate::aggregate::{aggregate, FieldTotals};
use crate::result::ProcessingResult;
use serde::{Deserialize, Serialize};

/// Fallback shown when the result carries no (or an empty) summary.
pub const SUMMARY_FALLBACK: &str = "No summary available";
/// Fallback shown when no extracted-fields group has any values.
pub const FIELDS_FALLBACK: &str = "No fields extracted";
/// Fallback shown when the validation map is empty or absent.
pub const VALIDATION_FALLBACK: &str = "No validation results";
/// Fallback document type when classification is absent.
pub const UNKNOWN_DOCUMENT_TYPE: &str = "UNKNOWN";

/// Render models for the five display panels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultView {
    pub overview: OverviewPanel,
    /// The literal summary text, or [`SUMMARY_FALLBACK`].
    pub summary: String,
    /// One group per extracted-fields key with at least one value, in
    /// received order. Empty means "render [`FIELDS_FALLBACK`]".
    pub fields: Vec<FieldGroup>,
    /// One line per validation verdict, in received order. Empty means
    /// "render [`VALIDATION_FALLBACK`]".
    pub validation: Vec<ValidationLine>,
    /// The full result, pretty-printed JSON, 2-space indentation.
    pub raw: String,
}

/// The headline cards: document type, confidences, counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewPanel {
    /// Uppercased `classification.document_type`, or `UNKNOWN`.
    pub document_type: String,
    /// `"{n}% confidence"`, n defaulting to 0.
    pub confidence: String,
    /// `"{n}% quality"`, n defaulting to 0.
    pub ocr_quality: String,
    /// `"{n} characters"`, n defaulting to 0.
    pub text_length: String,
    /// `"{n} fields"`.
    pub fields_summary: String,
    /// `"{n} valid"`.
    pub valid_fields_summary: String,
}

/// One extracted-fields group: a display label and its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    /// The field-type key with underscores replaced by spaces.
    pub label: String,
    pub values: Vec<String>,
}

/// One validation verdict line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLine {
    /// The validation-map key this verdict belongs to.
    pub field: String,
    pub value: String,
    pub is_valid: bool,
    pub message: String,
}

/// Map a result into the five panel models. Pure.
pub fn render(result: &ProcessingResult) -> ResultView {
    let totals = aggregate(result);
    ResultView {
        overview: render_overview(result, totals),
        summary: render_summary(result),
        fields: render_fields(result),
        validation: render_validation(result),
        raw: result.to_pretty_json(),
    }
}

fn render_overview(result: &ProcessingResult, totals: FieldTotals) -> OverviewPanel {
    // An empty type string falls back the same way an absent one does.
    let document_type = result
        .classification
        .as_ref()
        .and_then(|c| c.document_type.as_deref())
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| UNKNOWN_DOCUMENT_TYPE.to_string());

    let confidence = result
        .classification
        .as_ref()
        .map(|c| c.confidence)
        .unwrap_or(0.0);
    let (ocr_confidence, text_length) = result
        .ocr
        .as_ref()
        .map(|o| (o.confidence, o.text_length))
        .unwrap_or((0.0, 0));

    OverviewPanel {
        document_type,
        confidence: format!("{confidence}% confidence"),
        ocr_quality: format!("{ocr_confidence}% quality"),
        text_length: format!("{text_length} characters"),
        fields_summary: format!("{} fields", totals.fields_count),
        valid_fields_summary: format!("{} valid", totals.valid_fields_count),
    }
}

fn render_summary(result: &ProcessingResult) -> String {
    match result.summary.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => SUMMARY_FALLBACK.to_string(),
    }
}

fn render_fields(result: &ProcessingResult) -> Vec<FieldGroup> {
    let Some(fields) = result.extracted_fields.as_ref() else {
        return Vec::new();
    };
    fields
        .iter()
        .filter_map(|(key, value)| {
            let values = ProcessingResult::field_values(value);
            if values.is_empty() {
                None
            } else {
                Some(FieldGroup {
                    label: key.replace('_', " "),
                    values,
                })
            }
        })
        .collect()
}

fn render_validation(result: &ProcessingResult) -> Vec<ValidationLine> {
    let Some(validation) = result.validation.as_ref() else {
        return Vec::new();
    };
    validation
        .iter()
        .filter_map(|(key, value)| {
            ProcessingResult::validation_entries(value).map(|entries| (key, entries))
        })
        .flat_map(|(key, entries)| {
            entries.into_iter().map(move |e| ValidationLine {
                field: key.clone(),
                value: e.value,
                is_valid: e.is_valid,
                message: e.message,
            })
        })
        .collect()
}
