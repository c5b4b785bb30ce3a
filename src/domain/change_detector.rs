//! Listing count change detection.

/// Returns whether a freshly fetched count should be reported as a change.
///
/// Only increases over a known previous count count as changes. The first
/// observation of a target establishes the baseline and never fires; a
/// decrease (items sold or delisted) never fires either.
pub fn is_increase(previous: Option<u64>, current: u64) -> bool {
    previous.is_some_and(|prev| current > prev)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_is_not_a_change() {
        assert!(!is_increase(None, 5));
        assert!(!is_increase(None, 0));
    }

    #[test]
    fn test_equal_count_is_not_a_change() {
        assert!(!is_increase(Some(5), 5));
    }

    #[test]
    fn test_increase_is_a_change() {
        assert!(is_increase(Some(5), 9));
        assert!(is_increase(Some(0), 1));
    }

    #[test]
    fn test_decrease_is_not_a_change() {
        assert!(!is_increase(Some(9), 5));
    }
}
