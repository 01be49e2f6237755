//! Form input parsing
//!
//! Raw text from a form goes through two stages: completeness (identifier
//! present, both weights numeric) and weight order (empty <= gross).

use pesadas_types::RecordError;

use crate::model::normalize_identifier;

/// Validated form values, ready to become a record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInput {
    pub identifier: String,
    pub empty_weight: f64,
    pub gross_weight: f64,
}

impl RecordInput {
    pub fn net_weight(&self) -> f64 {
        self.gross_weight - self.empty_weight
    }
}

/// Parse a weight field. Blank text and non-finite values are rejected.
pub fn parse_weight(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|w| w.is_finite())
}

/// Validate raw form text.
///
/// Completeness is checked before weight order, so a blank identifier is
/// reported as `IncompleteInput` even when the weights are also inverted.
pub fn parse_record_input(
    raw_identifier: &str,
    raw_empty_weight: &str,
    raw_gross_weight: &str,
) -> Result<RecordInput, RecordError> {
    let identifier = normalize_identifier(raw_identifier);
    let empty_weight = parse_weight(raw_empty_weight);
    let gross_weight = parse_weight(raw_gross_weight);

    let (empty_weight, gross_weight) = match (empty_weight, gross_weight) {
        (Some(e), Some(g)) if !identifier.is_empty() => (e, g),
        _ => return Err(RecordError::IncompleteInput),
    };

    if empty_weight > gross_weight {
        return Err(RecordError::InvalidWeights {
            empty: empty_weight,
            gross: gross_weight,
        });
    }

    Ok(RecordInput {
        identifier,
        empty_weight,
        gross_weight,
    })
}
