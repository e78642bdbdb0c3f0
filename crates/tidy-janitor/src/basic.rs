//! Basic label cleaning.
//!
//! Labels arrive here already coerced to text. The chain then:
//!
//! 1. collapses whitespace runs to one space and trims the ends,
//! 2. replaces every run of non-word characters (anything but letters, digits
//!    and underscore) with a single underscore,
//! 3. strips leading and trailing underscores.
//!
//! Whitespace is collapsed first so interior gaps become one underscore.
//! Case is left untouched.

use std::sync::LazyLock;

use regex::Regex;

use crate::rule::{Rule, RuleChain};

static BASIC_CLEANING: LazyLock<RuleChain> = LazyLock::new(|| {
    RuleChain::from(vec![
        Rule::RegexReplace {
            pattern: Regex::new(r"\s+").expect("Invalid whitespace regex"),
            replacement: " ".to_string(),
        },
        Rule::Trim,
        Rule::RegexReplace {
            pattern: Regex::new(r"\W+").expect("Invalid non-word regex"),
            replacement: "_".to_string(),
        },
        Rule::strip_chars("_"),
    ])
});

/// The fixed basic-cleaning chain.
pub fn basic_cleaning_chain() -> &'static RuleChain {
    &BASIC_CLEANING
}

/// Apply basic cleaning to a single label.
///
/// # Examples
///
/// ```
/// use tidy_janitor::basic_clean;
///
/// assert_eq!(basic_clean("  Name   "), "Name");
/// assert_eq!(basic_clean("country-name£---"), "country_name");
/// ```
pub fn basic_clean(label: &str) -> String {
    BASIC_CLEANING.apply_one(label)
}
