//! Chart time labels
//!
//! Sales series carry timestamps such as `"2024-05-01 14:30:00"`; the chart
//! axis shows only `"14:30"`.
//!
//! The accepted format is "date, a space, then a time": the label is the
//! first five characters of the second space-separated token. The token is
//! taken as written, so `"2024-05-01 7:05:00"` labels as `"7:05:"`. Input
//! without a second token of at least five characters (including ISO strings
//! joined by `T`) is returned unchanged.

use serde_json::Value;

/// Label used when a record has no usable date
pub const UNKNOWN_LABEL: &str = "Unknown";

const LABEL_LEN: usize = 5;

/// Derive the short axis label for a date string
pub fn time_label(raw: &str) -> String {
    match raw.split(' ').nth(1) {
        Some(token) if token.chars().count() >= LABEL_LEN => {
            token.chars().take(LABEL_LEN).collect()
        }
        _ => raw.to_string(),
    }
}

/// Label for a JSON field that may be absent or not a string
pub fn time_label_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => time_label(s),
        _ => UNKNOWN_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_datetime_with_seconds() {
        assert_eq!(time_label("2024-05-01 14:30:00"), "14:30");
        assert_eq!(time_label("2024-05-01 14:30:00.250"), "14:30");
    }

    #[test]
    fn test_datetime_without_seconds() {
        assert_eq!(time_label("2024-05-01 07:05"), "07:05");
    }

    #[test]
    fn test_unpadded_hour_is_taken_as_written() {
        assert_eq!(time_label("2024-05-01 7:05:00"), "7:05:");
    }

    #[test]
    fn test_no_space_keeps_input() {
        assert_eq!(time_label("20240501"), "20240501");
        assert_eq!(time_label("2024-05-01T14:30:00Z"), "2024-05-01T14:30:00Z");
    }

    #[test]
    fn test_token_fallback() {
        assert_eq!(time_label("May-01 10:45pm"), "10:45");
        // Second token too short
        assert_eq!(time_label("May 1"), "May 1");
    }

    #[test]
    fn test_missing_or_non_string() {
        assert_eq!(time_label_of(None), "Unknown");
        assert_eq!(time_label_of(Some(&json!(20240501))), "Unknown");
        assert_eq!(time_label_of(Some(&json!(""))), "Unknown");
        assert_eq!(time_label_of(Some(&json!("2024-05-01 14:30:00"))), "14:30");
    }
}
