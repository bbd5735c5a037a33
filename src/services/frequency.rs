//! Service frequency parsing
//!
//! Lab equipment stores its service interval as a free-form string
//! ("weekly", "30 days", "90"). Parsing never fails loudly: anything
//! unrecognized means "unknown frequency" and the record is excluded
//! from due-date calculations.

/// Parse a human-friendly service frequency into a day count.
///
/// Accepts the keywords daily, weekly, monthly, quarterly, yearly and
/// annually, a "<n> days" suffix form, or a bare integer. Returns None
/// for empty or unrecognized input.
pub fn parse_frequency(text: &str) -> Option<u32> {
    let f = text.trim().to_lowercase();
    if f.is_empty() {
        return None;
    }

    let days = match f.as_str() {
        "daily" => 1,
        "weekly" => 7,
        "monthly" => 30,
        "quarterly" => 90,
        "yearly" | "annually" => 365,
        other => {
            if let Some(count) = other.strip_suffix(" days") {
                count.trim().parse().ok()?
            } else {
                other.parse().ok()?
            }
        }
    };

    Some(days)
}

/// Convenience wrapper for the nullable column form
pub fn parse_frequency_opt(text: Option<&str>) -> Option<u32> {
    parse_frequency(text?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(parse_frequency("daily"), Some(1));
        assert_eq!(parse_frequency("weekly"), Some(7));
        assert_eq!(parse_frequency("monthly"), Some(30));
        assert_eq!(parse_frequency("quarterly"), Some(90));
        assert_eq!(parse_frequency("yearly"), Some(365));
        assert_eq!(parse_frequency("annually"), Some(365));
    }

    #[test]
    fn test_keywords_are_case_and_whitespace_insensitive() {
        assert_eq!(parse_frequency("  Weekly "), Some(7));
        assert_eq!(parse_frequency("MONTHLY"), Some(30));
    }

    #[test]
    fn test_numeric_forms() {
        assert_eq!(parse_frequency("30"), Some(30));
        assert_eq!(parse_frequency("30 days"), Some(30));
        assert_eq!(parse_frequency(" 7 days "), Some(7));
        assert_eq!(parse_frequency("0"), Some(0));
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(parse_frequency(""), None);
        assert_eq!(parse_frequency("   "), None);
        assert_eq!(parse_frequency("unknown"), None);
        assert_eq!(parse_frequency("every so often"), None);
        assert_eq!(parse_frequency("-5"), None);
        assert_eq!(parse_frequency("five days"), None);
    }

    #[test]
    fn test_opt_wrapper() {
        assert_eq!(parse_frequency_opt(None), None);
        assert_eq!(parse_frequency_opt(Some("weekly")), Some(7));
        assert_eq!(parse_frequency_opt(Some("bogus")), None);
    }
}
