//! Domain services
//!
//! Input parsing, view filters and timestamp sources used by the view layer.

pub mod clock;
pub mod filter;
pub mod input;

pub use clock::{Clock, FixedClock, SystemClock, DEFAULT_TIMESTAMP_FORMAT};
pub use filter::RecordFilter;
pub use input::{parse_record_input, parse_weight, RecordInput};
