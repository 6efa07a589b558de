//! Quote record entity

use serde::{Deserialize, Serialize};

/// A value the upstream bundles publish either as a number or as a string.
///
/// `creator_uid`, `reviewer` and `created_at` change shape between bundle
/// generations. The original representation is kept so a record re-emits
/// exactly what it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i64),
    Text(String),
}

impl NumberOrString {
    /// Numeric view, parsing the text form when it holds an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumberOrString::Number(n) => Some(*n),
            NumberOrString::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl Default for NumberOrString {
    fn default() -> Self {
        NumberOrString::Number(0)
    }
}

impl std::fmt::Display for NumberOrString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberOrString::Number(n) => write!(f, "{}", n),
            NumberOrString::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NumberOrString {
    fn from(n: i64) -> Self {
        NumberOrString::Number(n)
    }
}

impl From<&str> for NumberOrString {
    fn from(s: &str) -> Self {
        NumberOrString::Text(s.to_string())
    }
}

/// A single hitokoto (Entity)
///
/// Immutable once loaded. `length` is expected to equal the character count
/// of `hitokoto`; it is taken from the source data as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Sequence number within its category
    pub id: u64,
    /// Globally unique identifier
    pub uuid: String,
    /// The quote text
    pub hitokoto: String,
    /// Category tag
    #[serde(rename = "type")]
    pub kind: String,
    /// Title of the source work
    pub from: String,
    /// Author within the source work
    pub from_who: Option<String>,
    pub creator: String,
    pub creator_uid: NumberOrString,
    pub reviewer: NumberOrString,
    pub commit_from: String,
    /// Seconds since the Unix epoch
    pub created_at: NumberOrString,
    pub length: u32,
}

impl QuoteRecord {
    /// Create a record whose `length` is derived from the text
    pub fn new(id: u64, uuid: impl Into<String>, hitokoto: impl Into<String>) -> Self {
        let hitokoto = hitokoto.into();
        let length = hitokoto.chars().count() as u32;
        Self {
            id,
            uuid: uuid.into(),
            hitokoto,
            kind: String::new(),
            from: String::new(),
            from_who: None,
            creator: String::new(),
            creator_uid: NumberOrString::default(),
            reviewer: NumberOrString::default(),
            commit_from: String::new(),
            created_at: NumberOrString::default(),
            length,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    pub fn with_from_who(mut self, from_who: impl Into<String>) -> Self {
        self.from_who = Some(from_who.into());
        self
    }

    pub fn with_creator(
        mut self,
        creator: impl Into<String>,
        creator_uid: impl Into<NumberOrString>,
    ) -> Self {
        self.creator = creator.into();
        self.creator_uid = creator_uid.into();
        self
    }

    pub fn with_reviewer(mut self, reviewer: impl Into<NumberOrString>) -> Self {
        self.reviewer = reviewer.into();
        self
    }

    pub fn with_commit_from(mut self, commit_from: impl Into<String>) -> Self {
        self.commit_from = commit_from.into();
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<NumberOrString>) -> Self {
        self.created_at = created_at.into();
        self
    }

    /// Override the stored length (used for malformed upstream fixtures)
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// Whether the stored length agrees with the text
    pub fn is_length_consistent(&self) -> bool {
        self.hitokoto.chars().count() as u32 == self.length
    }
}
