//! Summary counts derived from a processing result.

use crate::result::ProcessingResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Headline counts shown in the overview panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTotals {
    /// Distinct keys in `extracted_fields`. Keys mapping to empty lists
    /// still count: presence is what's tallied, not emptiness.
    pub fields_count: usize,
    /// Entries across all `validation` arrays whose `is_valid` is true.
    pub valid_fields_count: usize,
}

/// Derive [`FieldTotals`] from a result. Pure; an absent map contributes 0,
/// and non-array values under a validation key are silently skipped.
pub fn aggregate(result: &ProcessingResult) -> FieldTotals {
    let fields_count = result
        .extracted_fields
        .as_ref()
        .map(|m| m.len())
        .unwrap_or(0);

    let valid_fields_count = result
        .validation
        .iter()
        .flat_map(|m| m.values())
        .filter_map(|v| match v {
            Value::Array(items) => Some(items),
            _ => None,
        })
        .flatten()
        .filter(|entry| entry.get("is_valid").and_then(Value::as_bool) == Some(true))
        .count();

    FieldTotals {
        fields_count,
        valid_fields_count,
    }
}
