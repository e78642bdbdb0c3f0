//! Case profiles and their rule chains.
//!
//! Each profile maps to a static chain; camel extends snake and pascal
//! extends camel:
//!
//! - **snake**: split humps (`countryName` -> `country_Name`), split a
//!   lowercase/digit followed by an uppercase, lowercase everything, collapse
//!   underscore runs.
//! - **camel**: snake, then drop each underscore and uppercase the character
//!   after it.
//! - **pascal**: camel, then uppercase the first character.
//!
//! Only true camel/pascal input splits into words. Runs of capitals split per
//! letter: `SUbRegion` becomes `s_ub_region`, not `sub_region`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CleanError;
use crate::rule::{Rule, RuleChain};

static SNAKE: LazyLock<RuleChain> = LazyLock::new(|| {
    RuleChain::from(vec![
        Rule::RegexReplace {
            pattern: Regex::new(r"(\w)([A-Z][a-z]+)").expect("Invalid hump regex"),
            replacement: "${1}_${2}".to_string(),
        },
        Rule::RegexReplace {
            pattern: Regex::new(r"([a-z0-9])([A-Z])").expect("Invalid boundary regex"),
            replacement: "${1}_${2}".to_string(),
        },
        Rule::Lowercase,
        Rule::RegexReplace {
            pattern: Regex::new(r"_{2,}").expect("Invalid underscore regex"),
            replacement: "_".to_string(),
        },
    ])
});

static CAMEL: LazyLock<RuleChain> = LazyLock::new(|| {
    SNAKE.clone().then(Rule::UppercaseCaptures {
        pattern: Regex::new(r"_([a-zA-Z0-9])").expect("Invalid camel regex"),
    })
});

static PASCAL: LazyLock<RuleChain> = LazyLock::new(|| CAMEL.clone().then(Rule::UppercaseFirst));

/// Naming convention applied after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CaseProfile {
    /// `case_type`
    Snake,
    /// `caseType`
    Camel,
    /// `CaseType`
    Pascal,
}

impl CaseProfile {
    /// Returns the canonical profile name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseProfile::Snake => "snake",
            CaseProfile::Camel => "camel",
            CaseProfile::Pascal => "pascal",
        }
    }

    /// The static rule chain for this profile.
    pub fn chain(&self) -> &'static RuleChain {
        match self {
            CaseProfile::Snake => &SNAKE,
            CaseProfile::Camel => &CAMEL,
            CaseProfile::Pascal => &PASCAL,
        }
    }

    /// Convert one label.
    pub fn convert(&self, label: &str) -> String {
        self.chain().apply_one(label)
    }
}

impl fmt::Display for CaseProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaseProfile {
    type Err = CleanError;

    /// Parse a profile name or its one-letter abbreviation (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snake" | "s" => Ok(CaseProfile::Snake),
            "camel" | "c" => Ok(CaseProfile::Camel),
            "pascal" | "p" => Ok(CaseProfile::Pascal),
            _ => Err(CleanError::UnknownCase(s.to_string())),
        }
    }
}

impl TryFrom<String> for CaseProfile {
    type Error = CleanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
