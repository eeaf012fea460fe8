//! Post-event analytics.
//!
//! Everything here is pure computation over domain snapshots:
//!
//! - [`heuristics`]: keyword categorization, sentiment scoring and
//!   keyword extraction.
//! - [`insights`]: the two textual insight generators.
//! - [`aggregator`]: the report served by the post-analytics endpoint.
//! - [`completion`]: the snapshot and rows captured when an event ends.

pub mod aggregator;
pub mod completion;
pub mod heuristics;
pub mod insights;

pub use aggregator::{PostEventReport, build_post_event_report};
pub use completion::{CompletionSnapshot, build_completion_record};
pub use insights::{Insight, InsightType};

/// Rounds `value` to `decimals` places, halves away from zero.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Renders an integer with comma thousands separators.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(202_500_000), "202,500,000");
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(66.666, 1), 66.7);
        assert_eq!(round_to(450_000.0, 2), 450_000.0);
        assert_eq!(round_to(19.95, 0), 20.0);
    }
}
