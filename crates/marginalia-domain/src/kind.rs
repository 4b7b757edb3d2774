//! Book kind - fiction or non-fiction analysis vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of book an analysis describes
///
/// The kind selects the source vocabulary (`characters` vs `key_figures`,
/// `timeline` vs `argument_development`, ...) and the render order. Once a
/// record carries a kind, that kind is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookKind {
    /// Novels, stories, plays
    #[default]
    #[serde(rename = "fiction")]
    Fiction,

    /// Essays, history, theology, science
    #[serde(rename = "nonfiction")]
    NonFiction,
}

impl BookKind {
    /// Get the kind name as it is written in persisted records
    pub fn as_str(&self) -> &'static str {
        match self {
            BookKind::Fiction => "fiction",
            BookKind::NonFiction => "nonfiction",
        }
    }

    /// Parse a kind from the spellings models tend to produce
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fiction" => Some(BookKind::Fiction),
            "nonfiction" | "non-fiction" | "non_fiction" | "non fiction" => {
                Some(BookKind::NonFiction)
            }
            _ => None,
        }
    }
}

impl fmt::Display for BookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid book kind: {}", s))
    }
}
