//! Trove classifier taxonomy membership.
//!
//! The taxonomy is configuration data, not logic: the `License ::` subtree
//! ships as two versioned data files embedded at build time, parsed once
//! into membership sets on first use.

use std::collections::HashSet;
use std::sync::OnceLock;

const CLASSIFIERS: &str = include_str!("../../data/trove-classifiers.txt");
const DEPRECATED_CLASSIFIERS: &str = include_str!("../../data/trove-classifiers-deprecated.txt");

/// True when `classifier` is a current entry of the taxonomy.
pub fn is_valid(classifier: &str) -> bool {
    valid_set().contains(classifier)
}

/// True when `classifier` is a deprecated entry of the taxonomy.
pub fn is_deprecated(classifier: &str) -> bool {
    deprecated_set().contains(classifier)
}

fn valid_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| parse(CLASSIFIERS))
}

fn deprecated_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| parse(DEPRECATED_CLASSIFIERS))
}

/// One classifier per line; blank lines and `#` comments are ignored.
fn parse(data: &'static str) -> HashSet<&'static str> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_classifier() {
        assert!(is_valid("License :: OSI Approved :: MIT License"));
        assert!(is_valid("License :: Public Domain"));
    }

    #[test]
    fn test_deprecated_classifier() {
        assert!(is_deprecated("License :: OSI Approved :: Intel Open Source License"));
        assert!(!is_valid("License :: OSI Approved :: Intel Open Source License"));
    }

    #[test]
    fn test_unknown_classifier() {
        assert!(!is_valid("License :: OSI Approved :: Imaginary License"));
        assert!(!is_deprecated("License :: OSI Approved :: Imaginary License"));
        assert!(!is_valid("Operating System :: Unix"));
    }

    #[test]
    fn test_sets_are_disjoint() {
        let overlap: Vec<_> = valid_set().intersection(deprecated_set()).collect();
        assert!(overlap.is_empty(), "taxonomy overlap: {overlap:?}");
    }
}
