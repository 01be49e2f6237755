//! Timestamp sources for new records

use chrono::Local;
use std::fmt::Write;

/// Default human-readable timestamp layout (day/month/year, 24h time)
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Source of the `recorded_at` text stamped on new records
pub trait Clock {
    fn now(&self) -> String;
}

/// Local wall-clock time formatted with a chrono format string
#[derive(Debug, Clone)]
pub struct SystemClock {
    format: String,
}

impl SystemClock {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTAMP_FORMAT)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> String {
        let now = Local::now();
        let mut out = String::new();
        // An invalid user-supplied format string surfaces as fmt::Error
        if write!(out, "{}", now.format(&self.format)).is_err() {
            out.clear();
            let _ = write!(out, "{}", now.format(DEFAULT_TIMESTAMP_FORMAT));
        }
        out
    }
}

/// Always returns the same timestamp
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_default_layout() {
        let stamp = SystemClock::default().now();
        // dd/mm/yyyy, HH:MM:SS
        assert_eq!(stamp.len(), 20);
        assert_eq!(&stamp[2..3], "/");
        assert_eq!(&stamp[10..12], ", ");
    }

    #[test]
    fn test_system_clock_falls_back_on_bad_format() {
        let stamp = SystemClock::new("%Q%").now();
        assert_eq!(stamp.len(), 20);
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock("x".into()).now(), "x");
    }
}
