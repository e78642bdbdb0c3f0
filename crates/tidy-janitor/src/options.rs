//! Cleaning options.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::case::CaseProfile;
use crate::error::{CleanError, Result};
use crate::rule::RuleChain;

/// Options governing one cleaning call.
///
/// Defaults: snake case, basic cleaning on, duplicate resolution on, no
/// custom substitutions or expressions.
///
/// # Examples
///
/// ```
/// use tidy_janitor::{CaseProfile, CleanOptions};
///
/// let options = CleanOptions::default()
///     .with_case(CaseProfile::Camel)
///     .with_convert_duplicates(false);
/// assert_eq!(options.case, Some(CaseProfile::Camel));
/// assert!(options.basic_cleaning);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    /// Case profile to apply; `None` leaves case untouched.
    pub case: Option<CaseProfile>,

    /// Run the basic cleaning chain.
    pub basic_cleaning: bool,

    /// Number repeated labels so the output is unique.
    pub convert_duplicates: bool,

    /// Substring replacements applied in insertion order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_transformation: Option<IndexMap<String, String>>,

    /// Extra rules run after the substitutions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_expressions: Option<RuleChain>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            case: Some(CaseProfile::Snake),
            basic_cleaning: true,
            convert_duplicates: true,
            custom_transformation: None,
            custom_expressions: None,
        }
    }
}

impl CleanOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the case profile.
    #[must_use]
    pub fn with_case(mut self, case: CaseProfile) -> Self {
        self.case = Some(case);
        self
    }

    /// Disable case conversion.
    #[must_use]
    pub fn without_case(mut self) -> Self {
        self.case = None;
        self
    }

    /// Set the case profile from a token such as `"snake"` or `"p"`.
    pub fn with_case_name(self, token: &str) -> Result<Self> {
        Ok(self.with_case(token.parse()?))
    }

    #[must_use]
    pub fn with_basic_cleaning(mut self, enabled: bool) -> Self {
        self.basic_cleaning = enabled;
        self
    }

    #[must_use]
    pub fn with_convert_duplicates(mut self, enabled: bool) -> Self {
        self.convert_duplicates = enabled;
        self
    }

    /// Set the substitution map; pairs are applied in the given order.
    #[must_use]
    pub fn with_custom_transformation<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_transformation = Some(
            pairs
                .into_iter()
                .map(|(find, replace)| (find.into(), replace.into()))
                .collect(),
        );
        self
    }

    #[must_use]
    pub fn with_custom_expressions(mut self, chain: RuleChain) -> Self {
        self.custom_expressions = Some(chain);
        self
    }

    /// Substitution pairs, empty when none were given.
    pub fn substitutions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.custom_transformation
            .iter()
            .flatten()
            .map(|(find, replace)| (find.as_str(), replace.as_str()))
    }

    /// Check for mutually exclusive settings.
    pub fn validate(&self) -> Result<()> {
        let has_map = self
            .custom_transformation
            .as_ref()
            .is_some_and(|map| !map.is_empty());
        if self.basic_cleaning && has_map {
            return Err(CleanError::ConflictingOptions);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CleanOptions::default();
        assert_eq!(options.case, Some(CaseProfile::Snake));
        assert!(options.basic_cleaning);
        assert!(options.convert_duplicates);
        assert!(options.custom_transformation.is_none());
        assert!(options.custom_expressions.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_conflict_requires_non_empty_map() {
        let empty = CleanOptions::default().with_custom_transformation(Vec::<(String, String)>::new());
        assert!(empty.validate().is_ok());

        let conflicting = CleanOptions::default().with_custom_transformation([("ö", "o")]);
        assert!(matches!(
            conflicting.validate(),
            Err(CleanError::ConflictingOptions)
        ));

        let allowed = conflicting.with_basic_cleaning(false);
        assert!(allowed.validate().is_ok());
    }

    #[test]
    fn test_substitutions_keep_insertion_order() {
        let options = CleanOptions::default()
            .with_basic_cleaning(false)
            .with_custom_transformation([("z", "1"), ("a", "2"), ("m", "3")]);
        let finds: Vec<&str> = options.substitutions().map(|(find, _)| find).collect();
        assert_eq!(finds, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_with_case_name() {
        let options = CleanOptions::new().with_case_name("P").unwrap();
        assert_eq!(options.case, Some(CaseProfile::Pascal));
        assert!(matches!(
            CleanOptions::new().with_case_name("kebab"),
            Err(CleanError::UnknownCase(_))
        ));
    }
}
