//! Duplicate label resolution.

use std::collections::HashMap;

/// Make labels unique by appending a running counter to every repeated value.
///
/// All occurrences of a repeated value are numbered, the first included;
/// values seen once are left alone. Order and length are preserved.
///
/// # Examples
///
/// ```
/// use tidy_janitor::resolve_duplicates;
///
/// let labels = vec!["a".to_string(), "b".to_string(), "a".to_string()];
/// assert_eq!(resolve_duplicates(labels), vec!["a1", "b", "a2"]);
/// ```
pub fn resolve_duplicates(labels: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for label in &labels {
        *counts.entry(label.clone()).or_insert(0) += 1;
    }

    let mut next: HashMap<String, usize> = HashMap::new();
    labels
        .into_iter()
        .map(|label| {
            if counts.get(&label).copied().unwrap_or(0) > 1 {
                let counter = next.entry(label.clone()).or_insert(0);
                *counter += 1;
                format!("{label}{counter}")
            } else {
                label
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pair_is_fully_numbered() {
        assert_eq!(
            resolve_duplicates(labels(&["a", "b", "a"])),
            labels(&["a1", "b", "a2"])
        );
    }

    #[test]
    fn test_triple() {
        assert_eq!(
            resolve_duplicates(labels(&["a", "a", "a"])),
            labels(&["a1", "a2", "a3"])
        );
    }

    #[test]
    fn test_singletons_untouched() {
        assert_eq!(
            resolve_duplicates(labels(&["x", "y", "z"])),
            labels(&["x", "y", "z"])
        );
    }

    #[test]
    fn test_counters_are_per_value() {
        assert_eq!(
            resolve_duplicates(labels(&["a", "b", "b", "a", "c", "b"])),
            labels(&["a1", "b1", "b2", "a2", "c", "b3"])
        );
    }

    #[test]
    fn test_empty() {
        assert!(resolve_duplicates(Vec::new()).is_empty());
    }
}
