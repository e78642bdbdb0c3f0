//! Label transformation rules and rule chains.
//!
//! A [`Rule`] is a pure `label -> label` function drawn from a closed set of
//! variants, or a callable registered by the caller through [`Rule::custom`].
//! A [`RuleChain`] applies its rules strictly in order: the output of rule *i*
//! is the input of rule *i + 1*. Every label is transformed independently.
//!
//! Chains loaded from configuration go through [`RuleSpec`], which compiles
//! regex patterns up front so a malformed pattern fails before any label is
//! touched.
//!
//! # Example
//!
//! ```
//! use tidy_janitor::{Rule, RuleChain};
//!
//! let chain = RuleChain::new()
//!     .then(Rule::replace("!", "$"))
//!     .then(Rule::regex_replace(r"\s+", " ").unwrap())
//!     .then(Rule::Trim)
//!     .then(Rule::Capitalize);
//!
//! let labels = chain.apply(vec!["  hello!   WORLD ".to_string()]);
//! assert_eq!(labels, vec!["Hello$ world"]);
//! ```

use std::fmt;
use std::sync::Arc;

use regex::{Captures, Regex};
use serde::ser::{Error as _, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{CleanError, Result};

/// Caller-supplied transformation registered under a name.
#[derive(Clone)]
pub struct CustomRule {
    name: String,
    func: Arc<dyn Fn(&str) -> String + Send + Sync>,
}

impl CustomRule {
    /// Name the rule was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A single pure transformation over one label.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Replace every match of `pattern` with `replacement` (`${1}` expands groups).
    RegexReplace { pattern: Regex, replacement: String },
    /// Replace every match of `pattern` with its first capture group uppercased.
    UppercaseCaptures { pattern: Regex },
    /// Lowercase the whole label.
    Lowercase,
    /// Uppercase the whole label.
    Uppercase,
    /// Uppercase the first character, leave the rest.
    UppercaseFirst,
    /// Uppercase the first character, lowercase the rest.
    Capitalize,
    /// Uppercase every letter that follows a non-letter, lowercase the others.
    TitleCase,
    /// Trim leading and trailing whitespace.
    Trim,
    /// Strip any of the given characters from both ends.
    StripChars(String),
    /// Plain substring replacement.
    Replace { find: String, replace: String },
    /// Caller-registered callable.
    Custom(CustomRule),
}

impl Rule {
    /// Compile a regex substitution rule.
    pub fn regex_replace(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self::RegexReplace {
            pattern: compile(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// Compile a rule that uppercases the first capture group of each match.
    pub fn uppercase_captures(pattern: &str) -> Result<Self> {
        Ok(Self::UppercaseCaptures {
            pattern: compile(pattern)?,
        })
    }

    /// Plain substring replacement rule.
    pub fn replace(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self::Replace {
            find: find.into(),
            replace: replace.into(),
        }
    }

    /// Strip the given characters from both ends of the label.
    pub fn strip_chars(chars: impl Into<String>) -> Self {
        Self::StripChars(chars.into())
    }

    /// Register a typed callable as a rule.
    pub fn custom<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Custom(CustomRule {
            name: name.into(),
            func: Arc::new(func),
        })
    }

    /// Apply the rule to one label.
    pub fn apply(&self, label: &str) -> String {
        match self {
            Self::RegexReplace {
                pattern,
                replacement,
            } => pattern.replace_all(label, replacement.as_str()).into_owned(),
            Self::UppercaseCaptures { pattern } => pattern
                .replace_all(label, |caps: &Captures<'_>| {
                    caps.get(1)
                        .map_or_else(String::new, |m| m.as_str().to_uppercase())
                })
                .into_owned(),
            Self::Lowercase => label.to_lowercase(),
            Self::Uppercase => label.to_uppercase(),
            Self::UppercaseFirst => {
                let mut chars = label.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
            Self::Capitalize => {
                let mut chars = label.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            }
            Self::TitleCase => title_case(label),
            Self::Trim => label.trim().to_string(),
            Self::StripChars(chars) => label.trim_matches(|c| chars.contains(c)).to_string(),
            Self::Replace { find, replace } => label.replace(find.as_str(), replace),
            Self::Custom(rule) => (rule.func)(label),
        }
    }

    /// Serializable description of the rule, `None` for custom callables.
    pub fn spec(&self) -> Option<RuleSpec> {
        let spec = match self {
            Self::RegexReplace {
                pattern,
                replacement,
            } => RuleSpec::RegexReplace {
                pattern: pattern.as_str().to_string(),
                replacement: replacement.clone(),
            },
            Self::UppercaseCaptures { pattern } => RuleSpec::UppercaseCaptures {
                pattern: pattern.as_str().to_string(),
            },
            Self::Lowercase => RuleSpec::Lowercase,
            Self::Uppercase => RuleSpec::Uppercase,
            Self::UppercaseFirst => RuleSpec::UppercaseFirst,
            Self::Capitalize => RuleSpec::Capitalize,
            Self::TitleCase => RuleSpec::TitleCase,
            Self::Trim => RuleSpec::Trim,
            Self::StripChars(chars) => RuleSpec::StripChars {
                chars: chars.clone(),
            },
            Self::Replace { find, replace } => RuleSpec::Replace {
                find: find.clone(),
                replace: replace.clone(),
            },
            Self::Custom(_) => return None,
        };
        Some(spec)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| CleanError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}

fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut prev_is_letter = false;
    for ch in label.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

/// Configuration form of a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleSpec {
    RegexReplace { pattern: String, replacement: String },
    UppercaseCaptures { pattern: String },
    Lowercase,
    Uppercase,
    UppercaseFirst,
    Capitalize,
    TitleCase,
    Trim,
    StripChars { chars: String },
    Replace { find: String, replace: String },
}

impl TryFrom<RuleSpec> for Rule {
    type Error = CleanError;

    fn try_from(spec: RuleSpec) -> Result<Self> {
        match spec {
            RuleSpec::RegexReplace {
                pattern,
                replacement,
            } => Rule::regex_replace(&pattern, replacement),
            RuleSpec::UppercaseCaptures { pattern } => Rule::uppercase_captures(&pattern),
            RuleSpec::Lowercase => Ok(Rule::Lowercase),
            RuleSpec::Uppercase => Ok(Rule::Uppercase),
            RuleSpec::UppercaseFirst => Ok(Rule::UppercaseFirst),
            RuleSpec::Capitalize => Ok(Rule::Capitalize),
            RuleSpec::TitleCase => Ok(Rule::TitleCase),
            RuleSpec::Trim => Ok(Rule::Trim),
            RuleSpec::StripChars { chars } => Ok(Rule::StripChars(chars)),
            RuleSpec::Replace { find, replace } => Ok(Rule::Replace { find, replace }),
        }
    }
}

/// Ordered sequence of rules applied one after another.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Vec<RuleSpec>")]
pub struct RuleChain {
    rules: Vec<Rule>,
}

impl RuleChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    #[must_use]
    pub fn then(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append every rule of another chain.
    #[must_use]
    pub fn extend(mut self, other: &RuleChain) -> Self {
        self.rules.extend(other.rules.iter().cloned());
        self
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the chain over one label.
    pub fn apply_one(&self, label: &str) -> String {
        let mut current = label.to_string();
        for rule in &self.rules {
            current = rule.apply(&current);
        }
        current
    }

    /// Run the chain over a label collection, rule by rule.
    ///
    /// Output has the same length and order as the input.
    pub fn apply(&self, labels: Vec<String>) -> Vec<String> {
        let mut labels = labels;
        for rule in &self.rules {
            labels = labels.iter().map(|label| rule.apply(label)).collect();
            tracing::trace!(rule = ?rule.spec(), "applied rule");
        }
        labels
    }
}

impl From<Vec<Rule>> for RuleChain {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl TryFrom<Vec<RuleSpec>> for RuleChain {
    type Error = CleanError;

    fn try_from(specs: Vec<RuleSpec>) -> Result<Self> {
        let rules = specs
            .into_iter()
            .map(Rule::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }
}

impl Serialize for RuleChain {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rules.len()))?;
        for rule in &self.rules {
            let spec = rule.spec().ok_or_else(|| {
                S::Error::custom(match rule {
                    Rule::Custom(custom) => {
                        format!("custom rule '{}' cannot be serialized", custom.name())
                    }
                    _ => "rule cannot be serialized".to_string(),
                })
            })?;
            seq.serialize_element(&spec)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_before_capitalize() {
        let chain = RuleChain::new()
            .then(Rule::replace("!", "$"))
            .then(Rule::regex_replace(r"\s+", " ").unwrap())
            .then(Rule::Trim)
            .then(Rule::Capitalize);
        assert_eq!(
            chain.apply(vec!["  hello!   WORLD ".to_string()]),
            vec!["Hello$ world"]
        );

        let capitalized_first = RuleChain::new().then(Rule::Capitalize).then(Rule::Trim);
        assert_eq!(
            capitalized_first.apply(vec!["  hello".to_string()]),
            vec!["hello"]
        );
    }

    #[test]
    fn test_regex_replace_expands_groups() {
        let rule = Rule::regex_replace(r"([a-z])([A-Z])", "${1}_${2}").unwrap();
        assert_eq!(rule.apply("countryName"), "country_Name");
    }

    #[test]
    fn test_uppercase_captures() {
        let rule = Rule::uppercase_captures(r"_([a-zA-Z0-9])").unwrap();
        assert_eq!(rule.apply("country_name_2"), "countryName2");
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        let err = Rule::regex_replace("([a-z]", "").unwrap_err();
        assert!(matches!(err, CleanError::InvalidPattern { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_case_rules() {
        assert_eq!(Rule::UppercaseFirst.apply("countryName"), "CountryName");
        assert_eq!(Rule::UppercaseFirst.apply(""), "");
        assert_eq!(Rule::Capitalize.apply("hello_Goodbye"), "Hello_goodbye");
        assert_eq!(Rule::TitleCase.apply("hello_goodbye"), "Hello_Goodbye");
        assert_eq!(Rule::TitleCase.apply("aBC dEF"), "Abc Def");
    }

    #[test]
    fn test_strip_chars() {
        let rule = Rule::strip_chars("_");
        assert_eq!(rule.apply("__country_name__"), "country_name");
        assert_eq!(rule.apply("___"), "");
    }

    #[test]
    fn test_custom_rule() {
        let rule = Rule::custom("reverse", |label| label.chars().rev().collect());
        assert_eq!(rule.apply("abc"), "cba");
        assert!(rule.spec().is_none());
        assert!(format!("{rule:?}").contains("reverse"));
    }

    #[test]
    fn test_chain_applies_in_order() {
        let upper_then_replace = RuleChain::new()
            .then(Rule::Uppercase)
            .then(Rule::replace("A", "x"));
        let replace_then_upper = RuleChain::new()
            .then(Rule::replace("A", "x"))
            .then(Rule::Uppercase);

        assert_eq!(upper_then_replace.apply_one("abA"), "xBx");
        assert_eq!(replace_then_upper.apply_one("abA"), "ABX");
    }

    #[test]
    fn test_chain_preserves_length_and_order() {
        let chain = RuleChain::new().then(Rule::Lowercase);
        let labels = chain.apply(vec!["B".into(), "A".into(), "B".into()]);
        assert_eq!(labels, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let chain = RuleChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.apply(vec!["Keep Me".into()]), vec!["Keep Me"]);
    }

    #[test]
    fn test_chain_from_specs() {
        let chain = RuleChain::try_from(vec![
            RuleSpec::Trim,
            RuleSpec::Replace {
                find: "-".into(),
                replace: "_".into(),
            },
        ])
        .unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.apply_one("  a-b "), "a_b");
    }
}
