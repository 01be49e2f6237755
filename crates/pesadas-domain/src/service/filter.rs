//! Record filters for derived table views

use crate::model::{normalize_identifier, WeighingRecord};

/// Predicate selecting a subset of records for display
#[derive(Debug, Clone, PartialEq)]
pub enum RecordFilter {
    /// Net weight at or above the minimum
    MinNet(f64),
    /// Identifier contains the (normalized) text
    IdentifierContains(String),
}

impl RecordFilter {
    /// Build a search filter; blank text means "no filter"
    pub fn search(raw_text: &str) -> Option<Self> {
        let needle = normalize_identifier(raw_text);
        if needle.is_empty() {
            None
        } else {
            Some(RecordFilter::IdentifierContains(needle))
        }
    }

    pub fn matches(&self, record: &WeighingRecord) -> bool {
        match self {
            RecordFilter::MinNet(minimum) => record.net_weight() >= *minimum,
            RecordFilter::IdentifierContains(needle) => record.identifier().contains(needle.as_str()),
        }
    }
}
