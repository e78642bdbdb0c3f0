//! Property tests for the cleaning pipeline.

use std::collections::HashSet;

use proptest::prelude::*;

use tidy_janitor::{CaseProfile, CleanOptions, basic_clean, clean_labels, resolve_duplicates};

fn raw_label() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _@£\\-]{0,10}"
}

proptest! {
    #[test]
    fn cleaning_is_idempotent_once_unique(labels in prop::collection::vec(raw_label(), 0..8)) {
        let options = CleanOptions::default().without_case();
        let once = clean_labels(&labels, &options).unwrap();
        let distinct: HashSet<&String> = once.iter().collect();
        prop_assume!(distinct.len() == once.len());

        let twice = clean_labels(&once, &options).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn cleaning_preserves_length(labels in prop::collection::vec(raw_label(), 0..12)) {
        for case in [CaseProfile::Snake, CaseProfile::Camel, CaseProfile::Pascal] {
            let cleaned = clean_labels(&labels, &CleanOptions::default().with_case(case)).unwrap();
            prop_assert_eq!(cleaned.len(), labels.len());
        }
    }

    #[test]
    fn basic_cleaning_is_idempotent(label in raw_label()) {
        let once = basic_clean(&label);
        prop_assert_eq!(basic_clean(&once), once);
    }

    #[test]
    fn snake_is_idempotent(label in "[a-zA-Z0-9_]{0,12}") {
        let once = CaseProfile::Snake.convert(&label);
        prop_assert_eq!(CaseProfile::Snake.convert(&once), once);
    }

    #[test]
    fn duplicate_resolution_keeps_order_of_singletons(
        labels in prop::collection::vec("[abc]", 0..10)
    ) {
        let resolved = resolve_duplicates(labels.clone());
        prop_assert_eq!(resolved.len(), labels.len());
        for (raw, out) in labels.iter().zip(&resolved) {
            prop_assert!(out.starts_with(raw.as_str()));
            let occurrences = labels.iter().filter(|other| *other == raw).count();
            if occurrences == 1 {
                prop_assert_eq!(out, raw);
            }
        }
    }
}
