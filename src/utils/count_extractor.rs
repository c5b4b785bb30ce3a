//! Listing count extraction from page stats text.
//!
//! Stats panels read like `"1,234 listings"` or `"58 results found"`. The
//! first `<number> <word>` pair in the text wins.

use regex::Regex;
use std::sync::LazyLock;

static STATS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:,\d+)*)\s+(\w+)").unwrap());

/// Errors that can occur while extracting a count.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("could not extract number from text: '{0}'")]
    NoMatch(String),

    #[error("error converting '{digits}' to integer: {reason}")]
    InvalidNumber { digits: String, reason: String },
}

/// A count parsed from stats text, with the word that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCount {
    pub count: u64,
    pub unit: String,
}

/// Extracts the listing count from stats text.
///
/// Thousands separators are stripped before conversion.
///
/// # Errors
///
/// Returns [`ExtractError::NoMatch`] if no `<number> <word>` pair is present.
/// Returns [`ExtractError::InvalidNumber`] if the digits do not fit a `u64`.
///
/// # Examples
///
/// ```
/// use listing_monitor::utils::count_extractor::extract_count;
///
/// assert_eq!(extract_count("1,234 items").unwrap().count, 1234);
/// assert_eq!(extract_count("58 results").unwrap().count, 58);
/// assert!(extract_count("no listings").is_err());
/// ```
pub fn extract_count(stats_text: &str) -> Result<ExtractedCount, ExtractError> {
    let captures = STATS_REGEX
        .captures(stats_text)
        .ok_or_else(|| ExtractError::NoMatch(stats_text.to_string()))?;

    let digits = captures[1].replace(',', "");
    let count = digits
        .parse::<u64>()
        .map_err(|e| ExtractError::InvalidNumber {
            digits: digits.clone(),
            reason: e.to_string(),
        })?;

    Ok(ExtractedCount {
        count,
        unit: captures[2].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_number() {
        let extracted = extract_count("58 results").unwrap();
        assert_eq!(extracted.count, 58);
        assert_eq!(extracted.unit, "results");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(extract_count("1,234 items").unwrap().count, 1234);
        assert_eq!(extract_count("1,234,567 listings").unwrap().count, 1_234_567);
    }

    #[test]
    fn test_surrounding_text() {
        let extracted = extract_count("Showing 2,048 listings for you").unwrap();
        assert_eq!(extracted.count, 2048);
        assert_eq!(extracted.unit, "listings");
    }

    #[test]
    fn test_whitespace_between_number_and_word() {
        assert_eq!(extract_count("12\n  items").unwrap().count, 12);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(
            extract_count("no listings"),
            Err(ExtractError::NoMatch("no listings".to_string()))
        );
        assert!(extract_count("").is_err());
        assert!(extract_count("42").is_err());
    }

    #[test]
    fn test_overflow_is_rejected() {
        let result = extract_count("99999999999999999999999 items");
        assert!(matches!(result, Err(ExtractError::InvalidNumber { .. })));
    }
}
