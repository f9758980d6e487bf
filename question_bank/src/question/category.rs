//! Categories - free-form grouping labels on questions.

use serde::{Deserialize, Serialize};

/// A category label such as `"amigos"` or `"silly"`.
///
/// Categories are open: any label is valid, but the known ones carry a
/// friendlier display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name, falling back to the raw label.
    pub fn display_name(&self) -> &str {
        match self.0.as_str() {
            "amigos" => "Amigos",
            "familiares" => "Familiares",
            "cumpleanos" => "Cumpleaños",
            "pareja" => "Pareja",
            "personales" => "Personales",
            "silly" => "Silly",
            other => other,
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
