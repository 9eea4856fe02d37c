//! Municipality code extraction.

use crate::error::PipelineError;

/// Leading numeric code of a municipality label: `"12040 Some Town"` →
/// 12040.
///
/// Labels reaching this point have already been screened for missing and
/// unclassified-distribution entries, so a non-numeric lead token is a data
/// defect to surface, not a row to skip.
pub fn municipality_code(label: &str) -> Result<u32, PipelineError> {
    label
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<u32>().ok())
        .ok_or_else(|| PipelineError::MalformedMunicipalityLabel(label.to_string()))
}
