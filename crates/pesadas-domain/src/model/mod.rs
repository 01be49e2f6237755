//! Domain model types

pub mod weighing_record;

pub use weighing_record::{normalize_identifier, WeighingRecord};
