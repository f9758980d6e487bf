//! Selection session - the caller-held state of one question view.

use question_bank::{Category, Moment, Question, QuestionCatalog};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{filter_candidates, select_next, RandomSource};

/// Unique identifier for a selection session, used to correlate log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState<'c> {
    /// No candidates for the current filter, or no filter applied yet.
    Empty,

    /// A question is on screen.
    Selected {
        current: &'c Question,
        /// The question shown before `current`, if any.
        previous: Option<&'c Question>,
    },
}

/// One question view: the active filter, its candidates, and what is shown.
///
/// Transitions:
/// - filter change with no candidates -> `Empty`
/// - filter change with candidates -> `Selected`, drawn with no exclusion
/// - "next" while `Selected` -> `Selected`, never repeating the current
///   question unless it is the only candidate
#[derive(Debug, Clone)]
pub struct SelectionSession<'c> {
    id: SessionId,
    catalog: &'c QuestionCatalog,
    moment: Option<Moment>,
    category: Option<Category>,
    candidates: Vec<&'c Question>,
    state: SessionState<'c>,
}

impl<'c> SelectionSession<'c> {
    /// Start a session over `catalog`. No filter is applied yet.
    pub fn new(catalog: &'c QuestionCatalog) -> Self {
        Self {
            id: SessionId::new(),
            catalog,
            moment: None,
            category: None,
            candidates: Vec::new(),
            state: SessionState::Empty,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn moment(&self) -> Option<Moment> {
        self.moment
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    /// Candidates for the active filter, in catalog order.
    pub fn candidates(&self) -> &[&'c Question] {
        &self.candidates
    }

    pub fn state(&self) -> SessionState<'c> {
        self.state
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, SessionState::Empty)
    }

    /// The question on screen.
    pub fn current(&self) -> Option<&'c Question> {
        match self.state {
            SessionState::Selected { current, .. } => Some(current),
            SessionState::Empty => None,
        }
    }

    /// The question shown before the current one.
    pub fn previous(&self) -> Option<&'c Question> {
        match self.state {
            SessionState::Selected { previous, .. } => previous,
            SessionState::Empty => None,
        }
    }

    /// Switch to a new moment/category filter and draw a fresh question.
    ///
    /// The draw does not exclude the old question: it may not even belong to
    /// the new candidate set.
    pub fn apply_filter<R>(
        &mut self,
        moment: Moment,
        category: Option<Category>,
        rng: &mut R,
    ) -> Option<&'c Question>
    where
        R: RandomSource + ?Sized,
    {
        self.candidates = filter_candidates(self.catalog, moment, category.as_ref());
        self.moment = Some(moment);
        self.category = category;

        let old = self.current();
        self.state = match select_next(&self.candidates, None, rng) {
            Some(current) => SessionState::Selected {
                current,
                previous: old,
            },
            None => SessionState::Empty,
        };

        debug!(
            session = %self.id,
            moment = %moment,
            category = ?self.category.as_ref().map(Category::as_str),
            candidates = self.candidates.len(),
            question = ?self.current().map(|q| q.id.as_str()),
            "filter applied"
        );
        self.current()
    }

    /// Draw another question for the active filter, avoiding the current one.
    ///
    /// Does nothing and returns `None` while the session is `Empty`.
    pub fn next<R>(&mut self, rng: &mut R) -> Option<&'c Question>
    where
        R: RandomSource + ?Sized,
    {
        let SessionState::Selected { current, .. } = self.state else {
            return None;
        };

        let chosen = select_next(&self.candidates, Some(&current.id), rng)?;
        self.state = SessionState::Selected {
            current: chosen,
            previous: Some(current),
        };

        debug!(session = %self.id, from = %current.id, to = %chosen.id, "next question");
        Some(chosen)
    }
}
