//! Fact rows
//!
//! A fact as the store returns it, the payload used to create one, and the vote columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Store-assigned row identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactId(pub i64);

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row of the facts table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    pub id: FactId,
    pub text: String,
    pub source: String,
    /// Raw category name; rows written by other clients may carry names we don't know
    pub category: String,
    #[serde(default)]
    pub votes_interesting: u32,
    #[serde(default)]
    pub votes_mindblowing: u32,
    #[serde(default)]
    pub votes_false: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_in: Option<i32>,
}

impl Fact {
    /// False votes outweigh interesting and mindblowing votes combined
    pub fn is_disputed(&self) -> bool {
        (self.votes_interesting as u64 + self.votes_mindblowing as u64) < self.votes_false as u64
    }

    /// The known category of this fact, if its name is one of ours
    pub fn category_kind(&self) -> Option<Category> {
        Category::from_name(&self.category)
    }

    /// Current count of one vote column
    pub fn votes(&self, column: VoteColumn) -> u32 {
        column.count(self)
    }
}

/// Payload sent to the store to create a fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFact {
    pub text: String,
    pub source: String,
    pub category: Category,
}

/// One of the three vote counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteColumn {
    Interesting,
    Mindblowing,
    False,
}

impl VoteColumn {
    pub const ALL: [VoteColumn; 3] = [
        VoteColumn::Interesting,
        VoteColumn::Mindblowing,
        VoteColumn::False,
    ];

    /// Column name in the facts table
    pub fn column(&self) -> &'static str {
        match self {
            VoteColumn::Interesting => "votesInteresting",
            VoteColumn::Mindblowing => "votesMindblowing",
            VoteColumn::False => "votesFalse",
        }
    }

    /// Button glyph
    pub fn icon(&self) -> &'static str {
        match self {
            VoteColumn::Interesting => "👍",
            VoteColumn::Mindblowing => "🤯",
            VoteColumn::False => "⛔️",
        }
    }

    pub fn count(&self, fact: &Fact) -> u32 {
        match self {
            VoteColumn::Interesting => fact.votes_interesting,
            VoteColumn::Mindblowing => fact.votes_mindblowing,
            VoteColumn::False => fact.votes_false,
        }
    }

    /// Mutable access to the counter, used by the in-memory store
    pub fn count_mut<'a>(&self, fact: &'a mut Fact) -> &'a mut u32 {
        match self {
            VoteColumn::Interesting => &mut fact.votes_interesting,
            VoteColumn::Mindblowing => &mut fact.votes_mindblowing,
            VoteColumn::False => &mut fact.votes_false,
        }
    }
}

impl fmt::Display for VoteColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[cfg(test)]
pub(crate) fn sample_fact(id: i64, interesting: u32, mindblowing: u32, false_votes: u32) -> Fact {
    Fact {
        id: FactId(id),
        text: format!("Fact number {}", id),
        source: "https://example.com".to_string(),
        category: "science".to_string(),
        votes_interesting: interesting,
        votes_mindblowing: mindblowing,
        votes_false: false_votes,
        created_in: Some(2024),
    }
}
