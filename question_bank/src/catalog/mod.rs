//! Question catalog - the immutable list of questions and a lookup by id.

use serde::Deserialize;
use std::collections::HashMap;

use crate::question::{Category, Moment, Question, QuestionId};

/// Built-in catalog, embedded at compile time.
const BUILTIN_CATALOG: &str = include_str!("../../data/questions.toml");

/// Errors raised while building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate question id `{0}`")]
    DuplicateId(QuestionId),

    #[error("question `{0}` has no moments")]
    EmptyMoments(QuestionId),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    questions: Vec<Question>,
}

/// The static collection of questions.
///
/// Questions keep the order they were declared in; every filter built on top
/// of the catalog relies on that order.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: Vec<Question>,

    /// Index: id -> position in `questions`.
    by_id: HashMap<QuestionId, usize>,
}

impl QuestionCatalog {
    /// Load the catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse a catalog from TOML (`[[questions]]` tables).
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        Self::from_questions(file.questions)
    }

    /// Build a catalog, checking that ids are unique and every question has a moment.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(questions.len());

        for (position, question) in questions.iter().enumerate() {
            if question.moments.is_empty() {
                return Err(CatalogError::EmptyMoments(question.id.clone()));
            }
            if by_id.insert(question.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(question.id.clone()));
            }
        }

        Ok(Self { questions, by_id })
    }

    /// All questions in catalog order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Get question by ID.
    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.by_id.get(id).map(|&position| &self.questions[position])
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Moments that at least one question is tagged with, in selector order.
    pub fn moments_in_use(&self) -> Vec<Moment> {
        Moment::ALL
            .into_iter()
            .filter(|moment| self.questions.iter().any(|q| q.has_moment(*moment)))
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&Category> {
        let mut seen: Vec<&Category> = Vec::new();
        for question in &self.questions {
            if !seen.contains(&&question.category) {
                seen.push(&question.category);
            }
        }
        seen
    }
}
