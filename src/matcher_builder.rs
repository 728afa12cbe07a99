use std::sync::Arc;

use crate::{internal::FlagFn, EntityDefinition, Matcher, Result};

/// A builder for creating a matcher from entity definitions.
///
/// Flags are registered before the definitions are compiled, so patterns in the definitions can
/// reference them as `FLAG<n>`.
#[derive(Clone, Default)]
pub struct MatcherBuilder {
    strict: bool,
    flags: Vec<FlagFn>,
    entity_definitions: Vec<EntityDefinition>,
}

impl MatcherBuilder {
    /// Creates a new matcher builder.
    pub fn new() -> Self {
        Self {
            strict: false,
            flags: Vec::new(),
            entity_definitions: Vec::new(),
        }
    }

    /// Sets strict mode. In strict mode patterns added later with [Matcher::add_pattern] must
    /// reference an entity that is already registered.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Registers a flag.
    ///
    /// Flags are numbered in the order they are added, starting at 0: the n-th call yields the
    /// handle `FlagId::new(n)`, referenced as `FLAG<n>` in JSON patterns.
    pub fn add_flag<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.flags.push(Arc::new(predicate));
        self
    }

    /// Adds an entity definition to the matcher builder.
    pub fn add_entity_definition(mut self, entity_definition: EntityDefinition) -> Self {
        self.entity_definitions.push(entity_definition);
        self
    }

    /// Adds multiple entity definitions to the matcher builder.
    pub fn add_entity_definitions(mut self, entity_definitions: &[EntityDefinition]) -> Self {
        self.entity_definitions.extend_from_slice(entity_definitions);
        self
    }

    /// Builds the matcher from the matcher builder.
    ///
    /// Entities are registered in definition order before any pattern is compiled, so strict
    /// mode doesn't depend on the order of the definitions.
    pub fn build(self) -> Result<Matcher> {
        let mut matcher = if self.strict {
            Matcher::new_strict()
        } else {
            Matcher::new()
        };
        for flag in self.flags {
            matcher.add_flag(move |text: &str| flag(text));
        }
        for definition in &self.entity_definitions {
            matcher.add_entity(&definition.id, definition.attributes.clone(), None, None);
        }
        for definition in &self.entity_definitions {
            for pattern in &definition.patterns {
                let tokens = serde_json::Value::Array(pattern.tokens.clone());
                matcher.add_json_pattern(&definition.id, &tokens, pattern.label.as_deref())?;
            }
        }
        Ok(matcher)
    }
}

impl std::fmt::Debug for MatcherBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherBuilder")
            .field("strict", &self.strict)
            .field("flags", &self.flags.len())
            .field("entity_definitions", &self.entity_definitions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Doc, FlagId, MatcherErrorKind, TokenSpec};
    use serde_json::json;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_matcher_builder() {
        init();
        let definitions: Vec<EntityDefinition> = serde_json::from_value(json!([
            {
                "id": "HelloWorld",
                "attributes": { "label": "GREETING" },
                "patterns": [
                    { "tokens": [{"LOWER": "hello"}, {"IS_PUNCT": true}, {"LOWER": "world"}] }
                ]
            },
            {
                "id": "GoogleNow",
                "patterns": [
                    { "label": "product", "tokens": [{"ORTH": "Google"}, {"ORTH": "Now"}] }
                ]
            }
        ]))
        .unwrap();
        let matcher = MatcherBuilder::new()
            .add_entity_definitions(&definitions)
            .build()
            .unwrap();
        assert_eq!(matcher.entity_count(), 2);
        assert_eq!(matcher.len(), 2);
        assert_eq!(
            matcher.entity_attributes("HelloWorld").unwrap()["label"],
            json!("GREETING")
        );
        let doc = Doc::from_words(&["Hello", ",", "world", "!", "Google", "Now"]);
        let matches = matcher.find_matches(&doc).unwrap();
        assert_eq!(
            matches.iter().map(|m| m.as_tuple()).collect::<Vec<_>>(),
            vec![
                ("HelloWorld", None, 0, 3),
                ("GoogleNow", Some("product"), 4, 6)
            ]
        );
    }

    #[test]
    fn test_matcher_builder_flags() {
        init();
        let is_vowel = FlagId::new(0);
        let mut matcher = MatcherBuilder::new()
            .add_flag(|text| text.starts_with(['a', 'e', 'i', 'o', 'u']))
            .add_flag(|text| text.chars().count() < 3)
            .add_entity_definition(
                EntityDefinition::new("Short").with_pattern(None, vec![json!({"FLAG1": true})]),
            )
            .build()
            .unwrap();
        assert_eq!(matcher.flag_count(), 2);
        matcher
            .add_pattern("Vowel", &[TokenSpec::flag(is_vowel, true)], None)
            .unwrap();
        let doc = Doc::from_words(&["an", "apple", "by"]);
        let matches = matcher.raw_matches(&doc);
        assert_eq!(
            matches.iter().map(|m| m.as_tuple()).collect::<Vec<_>>(),
            vec![
                ("Short", None, 0, 1),
                ("Vowel", None, 0, 1),
                ("Vowel", None, 1, 2),
                ("Short", None, 2, 3)
            ]
        );
    }

    #[test]
    fn test_strict_matcher_builder() {
        init();
        let mut matcher = MatcherBuilder::new()
            .strict(true)
            .add_entity_definition(EntityDefinition::new("Known"))
            .build()
            .unwrap();
        assert!(matcher.is_strict());
        matcher
            .add_pattern("Known", &[TokenSpec::lower("a")], None)
            .unwrap();
        let err = matcher
            .add_pattern("Unknown", &[TokenSpec::lower("a")], None)
            .unwrap_err();
        assert!(matches!(err.kind(), MatcherErrorKind::UnknownEntity(_)));
    }

    #[test]
    fn test_invalid_definition() {
        init();
        let err = MatcherBuilder::new()
            .add_entity_definition(
                EntityDefinition::new("E").with_pattern(None, vec![json!({"FLAG0": true})]),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err.kind(), MatcherErrorKind::UnknownAttribute(_)));
    }
}
