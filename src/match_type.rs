use serde::{Deserialize, Serialize};

use super::Span;

/// A match of an entity's pattern in a document.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// The ID of the entity the match belongs to.
    entity_id: String,
    /// The label of the pattern that produced the match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    /// The matched tokens.
    span: Span,
}

impl Match {
    /// Create a new match.
    pub fn new(entity_id: &str, label: Option<&str>, span: Span) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            label: label.map(str::to_string),
            span,
        }
    }

    /// Get the entity ID of the match.
    #[inline]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Get the label of the match.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the index of the first matched token.
    #[inline]
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Get the index after the last matched token.
    #[inline]
    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Get the span of the match.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the number of matched tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.span.len()
    }

    /// Check if the match is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Get the match as (entity ID, label, start, end) tuple.
    pub fn as_tuple(&self) -> (&str, Option<&str>, usize, usize) {
        (self.entity_id(), self.label(), self.start(), self.end())
    }

    /// Return the match with another span. Used by acceptors to adjust boundaries.
    pub fn with_span(self, span: Span) -> Self {
        Self { span, ..self }
    }

    /// Return the match with another label.
    pub fn with_label(self, label: Option<&str>) -> Self {
        Self {
            label: label.map(str::to_string),
            ..self
        }
    }

    /// Return the match with another entity ID.
    pub fn with_entity_id(self, entity_id: &str) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            ..self
        }
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.entity_id)?;
        if let Some(label) = &self.label {
            write!(f, "[{}]", label)?;
        }
        write!(f, " {}", self.span)
    }
}
