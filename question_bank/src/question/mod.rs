//! Question records and their identifiers.

mod category;
mod moment;

pub use category::*;
pub use moment::*;

use serde::{Deserialize, Serialize};

/// Stable identifier of a question.
///
/// Ids are short human-chosen strings (`"p1"`, `"dt4"`) and must stay the same
/// across releases, since favorites are persisted by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    /// Create a question ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for QuestionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single question card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,

    /// Text shown on the card.
    pub text: String,

    /// Grouping label, used for display and the optional category filter.
    pub category: Category,

    /// Moments this question is eligible for. Never empty in a valid catalog.
    pub moments: Vec<Moment>,
}

impl Question {
    /// Create a question with no moments yet.
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, category: impl Into<Category>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category: category.into(),
            moments: Vec::new(),
        }
    }

    /// Add a moment to this question. Repeated moments are ignored.
    pub fn with_moment(mut self, moment: Moment) -> Self {
        if !self.moments.contains(&moment) {
            self.moments.push(moment);
        }
        self
    }

    /// Add multiple moments to this question.
    pub fn with_moments(self, moments: impl IntoIterator<Item = Moment>) -> Self {
        moments.into_iter().fold(self, Question::with_moment)
    }

    /// Check if this question applies to a moment.
    pub fn has_moment(&self, moment: Moment) -> bool {
        self.moments.contains(&moment)
    }
}
