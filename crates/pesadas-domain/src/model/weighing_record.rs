//! Weighing record (pesada)

use pesadas_types::RecordError;
use serde::{Deserialize, Serialize};

/// Normalize a vehicle identifier: trim surrounding whitespace and upper-case.
///
/// Applied at creation, at edit time and to search text, so stored, displayed
/// and searched identifiers always follow the same rule.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// One scale reading for a vehicle
///
/// Net weight is never stored on the struct; it is derived from the current
/// gross and empty weights. `recorded_at` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PersistedRecord", into = "PersistedRecord")]
pub struct WeighingRecord {
    identifier: String,
    empty_weight: f64,
    gross_weight: f64,
    recorded_at: String,
}

impl WeighingRecord {
    /// Create a record, validating the identifier and weights
    pub fn new(
        identifier: &str,
        empty_weight: f64,
        gross_weight: f64,
        recorded_at: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let identifier = checked_identifier(identifier)?;
        check_weights(empty_weight, gross_weight)?;
        Ok(Self {
            identifier,
            empty_weight,
            gross_weight,
            recorded_at: recorded_at.into(),
        })
    }

    /// Replace identifier and weights, keeping the creation timestamp.
    ///
    /// The record is left untouched when validation fails.
    pub fn amend(
        &mut self,
        identifier: &str,
        empty_weight: f64,
        gross_weight: f64,
    ) -> Result<(), RecordError> {
        let identifier = checked_identifier(identifier)?;
        check_weights(empty_weight, gross_weight)?;
        self.identifier = identifier;
        self.empty_weight = empty_weight;
        self.gross_weight = gross_weight;
        Ok(())
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Unladen weight (tara)
    pub fn empty_weight(&self) -> f64 {
        self.empty_weight
    }

    /// Laden weight (bruto)
    pub fn gross_weight(&self) -> f64 {
        self.gross_weight
    }

    /// Net weight (neto) = gross - empty
    pub fn net_weight(&self) -> f64 {
        self.gross_weight - self.empty_weight
    }

    pub fn recorded_at(&self) -> &str {
        &self.recorded_at
    }
}

fn checked_identifier(raw: &str) -> Result<String, RecordError> {
    let identifier = normalize_identifier(raw);
    if identifier.is_empty() {
        return Err(RecordError::IncompleteInput);
    }
    Ok(identifier)
}

fn check_weights(empty: f64, gross: f64) -> Result<(), RecordError> {
    if !empty.is_finite() || !gross.is_finite() {
        return Err(RecordError::IncompleteInput);
    }
    if empty > gross {
        return Err(RecordError::InvalidWeights { empty, gross });
    }
    Ok(())
}

/// On-disk layout of a record.
///
/// The aliases accept lists written by earlier versions with Spanish field names
/// (matricula / tara / bruto / neto / fecha).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedRecord {
    #[serde(alias = "matricula")]
    identifier: String,
    #[serde(alias = "tara")]
    empty_weight: f64,
    #[serde(alias = "bruto")]
    gross_weight: f64,
    // Recomputed on read
    #[serde(alias = "neto", default)]
    net_weight: f64,
    #[serde(alias = "fecha")]
    recorded_at: String,
}

impl TryFrom<PersistedRecord> for WeighingRecord {
    type Error = RecordError;

    fn try_from(p: PersistedRecord) -> Result<Self, Self::Error> {
        WeighingRecord::new(&p.identifier, p.empty_weight, p.gross_weight, p.recorded_at)
    }
}

impl From<WeighingRecord> for PersistedRecord {
    fn from(r: WeighingRecord) -> Self {
        let net_weight = r.net_weight();
        Self {
            identifier: r.identifier,
            empty_weight: r.empty_weight,
            gross_weight: r.gross_weight,
            net_weight,
            recorded_at: r.recorded_at,
        }
    }
}
