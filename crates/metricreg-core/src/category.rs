//! Producer categories.
//!
//! A closed set classifying what a metric producer does. The upper-case
//! string form is what the registry records next to each counter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MetricsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Container,
    Admin,
    Core,
    Query,
    Update,
    Cache,
    Highlighter,
    QueryParser,
    SpellChecker,
    Searcher,
    Replication,
    Tlog,
    Index,
    Directory,
    Http,
    Security,
    Other,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 17] = [
        Category::Container,
        Category::Admin,
        Category::Core,
        Category::Query,
        Category::Update,
        Category::Cache,
        Category::Highlighter,
        Category::QueryParser,
        Category::SpellChecker,
        Category::Searcher,
        Category::Replication,
        Category::Tlog,
        Category::Index,
        Category::Directory,
        Category::Http,
        Category::Security,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Container => "CONTAINER",
            Category::Admin => "ADMIN",
            Category::Core => "CORE",
            Category::Query => "QUERY",
            Category::Update => "UPDATE",
            Category::Cache => "CACHE",
            Category::Highlighter => "HIGHLIGHTER",
            Category::QueryParser => "QUERYPARSER",
            Category::SpellChecker => "SPELLCHECKER",
            Category::Searcher => "SEARCHER",
            Category::Replication => "REPLICATION",
            Category::Tlog => "TLOG",
            Category::Index => "INDEX",
            Category::Directory => "DIRECTORY",
            Category::Http => "HTTP",
            Category::Security => "SECURITY",
            Category::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = MetricsError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MetricsError::BadConfig(format!("unknown category: {s}")))
    }
}

/// Accepts the same spellings as `FromStr`.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("query".parse::<Category>().unwrap(), Category::Query);
        assert_eq!("QueryParser".parse::<Category>().unwrap(), Category::QueryParser);
        assert!("nope".parse::<Category>().is_err());
    }

    #[test]
    fn display_matches_serde() {
        for c in Category::ALL {
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{c}\""));
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
            assert_eq!(serde_json::from_str::<Category>(&json).unwrap(), c);
        }
    }

    #[test]
    fn deserialize_is_case_insensitive() {
        let c: Category = serde_json::from_str("\"spellChecker\"").unwrap();
        assert_eq!(c, Category::SpellChecker);
        assert!(serde_json::from_str::<Category>("\"spell_checker\"").is_err());
    }
}
