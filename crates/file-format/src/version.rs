//! Dotted numeric document versions such as `"1.3"` or `"1.2.0"`.

use std::cmp::Ordering;

/// Version written by [`crate::save_document`].
pub const FORMAT_VERSION: &str = "1.3";

/// First version whose fragments carry their own base curve.
pub const SELF_CONTAINED_SINCE: &str = "1.3";

/// Oldest version with a known migration.
pub const OLDEST_SUPPORTED: &str = "1.0";

/// Numeric components of a version, or `None` if any component is not a
/// non-negative integer.
pub fn parse(version: &str) -> Option<Vec<u64>> {
    let version = version.trim();
    if version.is_empty() {
        return None;
    }
    version.split('.').map(|part| part.parse().ok()).collect()
}

/// Compare two versions component-wise; missing trailing components count
/// as zero, so `"1.3"` equals `"1.3.0"`.
pub fn compare(a: &str, b: &str) -> Option<Ordering> {
    let (a, b) = (parse(a)?, parse(b)?);
    let len = a.len().max(b.len());
    let at = |v: &[u64], i: usize| v.get(i).copied().unwrap_or(0);
    Some(
        (0..len)
            .map(|i| at(&a, i).cmp(&at(&b, i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal),
    )
}

/// `a` is strictly older than `b`. False when either is malformed.
pub fn is_earlier_than(a: &str, b: &str) -> bool {
    compare(a, b) == Some(Ordering::Less)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_not_lexical() {
        assert!(is_earlier_than("1.2", "1.10"));
        assert!(!is_earlier_than("1.10", "1.2"));
    }

    #[test]
    fn test_trailing_zeros_are_equal() {
        assert_eq!(compare("1.3", "1.3.0"), Some(Ordering::Equal));
        assert!(!is_earlier_than("1.3.0", "1.3"));
        assert!(is_earlier_than("1.2.9", "1.3"));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("1.x"), None);
        assert_eq!(parse("1..2"), None);
        assert!(!is_earlier_than("abc", "1.3"));
        assert!(!is_earlier_than("1.3", "abc"));
    }
}
