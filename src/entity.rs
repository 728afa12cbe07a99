use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    internal::{EntityID, PatternID},
    Acceptor, OnMatch,
};

/// Arbitrary metadata attached to an entity.
pub type EntityAttributes = BTreeMap<String, serde_json::Value>;

/// The in-memory definition of an entity together with its patterns.
/// A list of definitions can be handed to the [crate::MatcherBuilder].
///
/// ```
/// use tokmatch::EntityDefinition;
///
/// let definition: EntityDefinition = serde_json::from_str(r#"{
///     "id": "HelloWorld",
///     "attributes": { "label": "GREETING" },
///     "patterns": [
///         { "tokens": [{"LOWER": "hello"}, {"IS_PUNCT": true}, {"LOWER": "world"}] },
///         { "label": "short", "tokens": [{"LOWER": "hello"}, {"LOWER": "world"}] }
///     ]
/// }"#).unwrap();
/// assert_eq!(definition.patterns.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityDefinition {
    /// The unique ID of the entity.
    pub id: String,
    /// The attributes of the entity.
    #[serde(default)]
    pub attributes: EntityAttributes,
    /// The patterns of the entity in registration order.
    #[serde(default)]
    pub patterns: Vec<PatternDefinition>,
}

impl EntityDefinition {
    /// Creates a new entity definition without attributes and patterns.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    /// Adds an attribute to the entity definition.
    pub fn with_attribute(mut self, key: &str, value: serde_json::Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    /// Adds a pattern in JSON notation to the entity definition.
    pub fn with_pattern(mut self, label: Option<&str>, tokens: Vec<serde_json::Value>) -> Self {
        self.patterns.push(PatternDefinition {
            label: label.map(str::to_string),
            tokens,
        });
        self
    }
}

/// A pattern in JSON notation, optionally labeled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// The label reported with matches of this pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// The token specifiers, e.g. `{"LOWER": "hello", "OP": "?"}`.
    pub tokens: Vec<serde_json::Value>,
}

/// A registered entity.
#[derive(Clone)]
pub(crate) struct Entity {
    pub(crate) id: EntityID,
    pub(crate) name: String,
    pub(crate) attributes: EntityAttributes,
    pub(crate) acceptor: Option<Arc<dyn Acceptor>>,
    pub(crate) on_match: Option<Arc<dyn OnMatch>>,
    /// The patterns of the entity in registration order.
    pub(crate) patterns: Vec<PatternID>,
}

impl Entity {
    pub(crate) fn new(id: EntityID, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            attributes: EntityAttributes::new(),
            acceptor: None,
            on_match: None,
            patterns: Vec::new(),
        }
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("acceptor", &self.acceptor.is_some())
            .field("on_match", &self.on_match.is_some())
            .field("patterns", &self.patterns)
            .finish()
    }
}
