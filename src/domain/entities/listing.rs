//! Listing entities: watched targets, page snapshots and per-pass updates.

use serde::Serialize;

/// A page whose listing count is being watched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTarget {
    pub url: String,
}

impl ListingTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Raw text read from a rendered listing page.
///
/// Produced by a [`crate::infrastructure::browser::PageFetcher`]; the stats
/// text is guaranteed non-empty, everything else may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub stats_text: String,
    pub title: String,
    pub refinements: Vec<String>,
}

/// A successfully parsed listing count for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingObservation {
    pub count: u64,
    pub search_term: String,
    pub refinements: Vec<String>,
}

impl ListingObservation {
    /// Builds the descriptive search term used in notifications.
    ///
    /// `"Title (Label A, Label B)"`, or just the title when no refinement
    /// labels are active.
    pub fn describe(title: &str, refinements: &[String]) -> String {
        let title = title.trim();
        let labels = refinements
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        match (title.is_empty(), labels.is_empty()) {
            (_, true) => title.to_string(),
            (true, false) => format!("({labels})"),
            (false, false) => format!("{title} ({labels})"),
        }
    }
}

/// Result of checking one target during a pass.
///
/// Serialized with camelCase keys; `previousCount` is omitted on a baseline
/// observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingUpdate {
    pub url: String,
    pub search_term: String,
    pub current_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_count: Option<u64>,
    pub changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_with_refinements() {
        let refinements = vec!["Size M".to_string(), " Black ".to_string()];
        assert_eq!(
            ListingObservation::describe("Rick Owens", &refinements),
            "Rick Owens (Size M, Black)"
        );
    }

    #[test]
    fn test_describe_without_refinements() {
        assert_eq!(ListingObservation::describe(" Rick Owens ", &[]), "Rick Owens");
        assert_eq!(
            ListingObservation::describe("Rick Owens", &["  ".to_string()]),
            "Rick Owens"
        );
    }

    #[test]
    fn test_describe_without_title() {
        assert_eq!(
            ListingObservation::describe("", &["Sale".to_string()]),
            "(Sale)"
        );
        assert_eq!(ListingObservation::describe("", &[]), "");
    }

    #[test]
    fn test_update_serialization_omits_missing_previous() {
        let update = ListingUpdate {
            url: "https://example.com/shop/a".to_string(),
            search_term: "Boots".to_string(),
            current_count: 12,
            previous_count: None,
            changed: false,
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["url"], "https://example.com/shop/a");
        assert_eq!(json["searchTerm"], "Boots");
        assert_eq!(json["currentCount"], 12);
        assert_eq!(json["changed"], false);
        assert!(json.get("previousCount").is_none());
    }

    #[test]
    fn test_update_serialization_with_previous() {
        let update = ListingUpdate {
            url: "https://example.com/shop/a".to_string(),
            search_term: String::new(),
            current_count: 14,
            previous_count: Some(12),
            changed: true,
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["previousCount"], 12);
        assert_eq!(json["changed"], true);
    }
}
