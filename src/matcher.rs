use std::sync::Arc;

use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    entity::Entity,
    internal::{
        CompiledNfa, EntityID, FlagRegistry, Nfa, PatternID, ScanCache, TokenTestRegistry,
    },
    Acceptor, Doc, EntityAttributes, FlagId, Match, MatcherError, MatcherErrorKind, OnMatch,
    Result, TokenSpec,
};

/// A pattern compiled for one entity.
#[derive(Debug, Clone)]
struct CompiledPattern {
    #[cfg_attr(not(feature = "dot_writer"), allow(dead_code))]
    id: PatternID,
    entity: EntityID,
    label: Option<String>,
    /// Kept for rendering.
    #[cfg_attr(not(feature = "dot_writer"), allow(dead_code))]
    nfa: Nfa,
    compiled: CompiledNfa,
}

/// A rule-based token matcher.
///
/// The matcher holds a registry of named entities. Each entity owns an ordered list of token
/// patterns, an optional [Acceptor] and an optional [OnMatch] callback. Every pattern is compiled
/// into a small automaton over token tests. Scanning a [Doc] simulates all automata at every
/// token position and reports the longest match of each pattern.
///
/// ```
/// use tokmatch::{Doc, Matcher, TokenSpec};
///
/// let mut matcher = Matcher::new();
/// matcher
///     .add_pattern(
///         "HelloWorld",
///         &[
///             TokenSpec::lower("hello"),
///             TokenSpec::is_punct(true),
///             TokenSpec::lower("world"),
///         ],
///         None,
///     )
///     .unwrap();
/// let mut doc = Doc::from_words(&["Hello", ",", "world", "!"]);
/// let matches = matcher.apply(&mut doc).unwrap();
/// assert_eq!(matches[0].as_tuple(), ("HelloWorld", None, 0, 3));
/// ```
#[derive(Clone, Default)]
pub struct Matcher {
    strict: bool,
    entities: Vec<Entity>,
    entity_index: FxHashMap<String, EntityID>,
    /// The patterns of all entities in registration order.
    patterns: Vec<CompiledPattern>,
    token_tests: TokenTestRegistry,
    flags: FlagRegistry,
}

impl Matcher {
    /// Creates a new, empty matcher.
    /// Entities are created on the first pattern that references them.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty matcher that only accepts patterns for entities registered with
    /// [Matcher::add_entity] before.
    pub fn new_strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Returns true if patterns may only reference registered entities.
    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Registers or updates an entity.
    ///
    /// Registering an existing entity again overwrites its attributes. The acceptor and the
    /// on-match callback are only replaced if given. Patterns already registered are kept.
    pub fn add_entity(
        &mut self,
        entity_id: &str,
        attributes: EntityAttributes,
        acceptor: Option<Arc<dyn Acceptor>>,
        on_match: Option<Arc<dyn OnMatch>>,
    ) {
        let id = self.entity_or_insert(entity_id);
        let entity = &mut self.entities[id];
        entity.attributes = attributes;
        if acceptor.is_some() {
            entity.acceptor = acceptor;
        }
        if on_match.is_some() {
            entity.on_match = on_match;
        }
    }

    /// Appends a pattern to an entity.
    ///
    /// In non-strict mode the entity is created with empty attributes if it doesn't exist yet.
    /// The pattern is rejected if it is empty, if a predicate doesn't fit the kind of its
    /// attribute or if it references an unregistered flag. A rejected pattern leaves the matcher
    /// unchanged.
    pub fn add_pattern(
        &mut self,
        entity_id: &str,
        specs: &[TokenSpec],
        label: Option<&str>,
    ) -> Result<()> {
        if self.strict && !self.has_entity(entity_id) {
            return Err(MatcherError::new(MatcherErrorKind::UnknownEntity(
                entity_id.to_string(),
            )));
        }
        if specs.is_empty() {
            return Err(MatcherError::new(MatcherErrorKind::InvalidPattern(format!(
                "Empty pattern for entity '{}'",
                entity_id
            ))));
        }
        for spec in specs {
            spec.validate(self.flags.len())?;
        }

        // Compile on a copy of the registry so that a failing regex doesn't leave stale tests.
        let mut token_tests = self.token_tests.clone();
        let nfa = Nfa::try_from_specs(specs, &mut token_tests)?;
        self.token_tests = token_tests;

        let entity = self.entity_or_insert(entity_id);
        let id = PatternID::new(self.patterns.len());
        let compiled = CompiledNfa::from(&nfa);
        debug!(
            "Added pattern {} to entity '{}': {}",
            id, entity_id, compiled.pattern
        );
        trace!("{}", compiled);
        self.entities[entity].patterns.push(id);
        self.patterns.push(CompiledPattern {
            id,
            entity,
            label: label.map(str::to_string),
            nfa,
            compiled,
        });
        Ok(())
    }

    /// Appends a pattern given in JSON notation to an entity.
    ///
    /// ```
    /// use serde_json::json;
    /// use tokmatch::{Doc, Matcher};
    ///
    /// let mut matcher = Matcher::new();
    /// matcher
    ///     .add_json_pattern("GoogleNow", &json!([{"ORTH": "Google"}, {"ORTH": "Now"}]), None)
    ///     .unwrap();
    /// let doc = Doc::from_words(&["Google", "Now", "is", "being", "rebranded"]);
    /// let matches = matcher.find_matches(&doc).unwrap();
    /// assert_eq!(matches[0].as_tuple(), ("GoogleNow", None, 0, 2));
    /// ```
    pub fn add_json_pattern(
        &mut self,
        entity_id: &str,
        tokens: &serde_json::Value,
        label: Option<&str>,
    ) -> Result<()> {
        let specs = TokenSpec::pattern_from_json(tokens)?;
        self.add_pattern(entity_id, &specs, label)
    }

    /// Registers a boolean predicate over token text and returns its handle.
    /// The handle can be used in token specifiers via [TokenSpec::flag] or `FLAG<n>` in JSON.
    pub fn add_flag<F>(&mut self, predicate: F) -> FlagId
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let id = self.flags.add_flag(Arc::new(predicate));
        debug!("Added flag {}", id);
        id
    }

    /// Returns the raw automaton output without applying acceptors.
    ///
    /// The matches are ordered by start offset and pattern registration order. Identical matches
    /// produced by different patterns of the same entity are reported once.
    pub fn raw_matches(&self, doc: &Doc) -> Vec<Match> {
        self.scan(doc).into_iter().map(|(_, m)| m).collect()
    }

    /// Returns the matches accepted by the acceptors of their entities.
    /// On-match callbacks are not invoked, so the document is not mutated.
    pub fn find_matches(&self, doc: &Doc) -> Result<Vec<Match>> {
        let mut accepted = Vec::new();
        for (entity_id, candidate) in self.scan(doc) {
            let entity = &self.entities[entity_id];
            let Some(acceptor) = &entity.acceptor else {
                accepted.push(candidate);
                continue;
            };
            match acceptor
                .accept(doc, &candidate)
                .map_err(|e| MatcherErrorKind::Callback(entity.name.clone(), e))?
            {
                Some(m) => {
                    if m.span().is_empty() || !m.span().fits(doc.len()) {
                        return Err(MatcherError::new(MatcherErrorKind::InvalidMatch {
                            entity: entity.name.clone(),
                            start: m.start(),
                            end: m.end(),
                        }));
                    }
                    if m != candidate {
                        trace!("Acceptor replaced {} with {}", candidate, m);
                    }
                    accepted.push(m);
                }
                None => trace!("Acceptor rejected {}", candidate),
            }
        }
        Ok(accepted)
    }

    /// Scans the document, applies acceptors and then dispatches the on-match callbacks.
    ///
    /// Callbacks are invoked per entity in entity registration order, once for each index of the
    /// entity's accepted matches. They may mutate the document. Merges queued with
    /// [Doc::schedule_merge] are applied after the last callback. If a callback fails, the queued
    /// merges are dropped. The returned matches are the ones computed before any callback ran.
    pub fn apply(&self, doc: &mut Doc) -> Result<Vec<Match>> {
        let matches = self.find_matches(doc)?;
        if let Err(err) = self.dispatch(doc, &matches) {
            doc.clear_scheduled_merges();
            return Err(err);
        }
        if doc.scheduled_merges() > 0 {
            let merged = doc.apply_scheduled_merges()?;
            debug!("Applied {} merges, document has {} tokens", merged, doc.len());
        }
        Ok(matches)
    }

    /// Invokes the on-match callbacks of all entities.
    fn dispatch(&self, doc: &mut Doc, matches: &[Match]) -> Result<()> {
        for entity in &self.entities {
            let Some(on_match) = &entity.on_match else {
                continue;
            };
            let entity_matches: Vec<Match> = matches
                .iter()
                .filter(|m| m.entity_id() == entity.name)
                .cloned()
                .collect();
            for index in 0..entity_matches.len() {
                trace!("Calling on-match of '{}' for index {}", entity.name, index);
                on_match
                    .on_match(self, doc, index, &entity_matches)
                    .map_err(|e| MatcherErrorKind::Callback(entity.name.clone(), e))?;
            }
        }
        Ok(())
    }

    /// Applies the matcher to each document in turn and collects the matches per document.
    /// Stops at the first error.
    pub fn pipe<'d, I>(&self, docs: I) -> Result<Vec<Vec<Match>>>
    where
        I: IntoIterator<Item = &'d mut Doc>,
    {
        docs.into_iter().map(|doc| self.apply(doc)).collect()
    }

    /// Returns the number of registered patterns.
    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if no pattern is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the number of registered entities.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the entity is registered.
    #[inline]
    pub fn has_entity(&self, entity_id: &str) -> bool {
        self.entity_index.contains_key(entity_id)
    }

    /// Returns the attributes of an entity.
    pub fn entity_attributes(&self, entity_id: &str) -> Option<&EntityAttributes> {
        self.entity_index
            .get(entity_id)
            .map(|id| &self.entities[*id].attributes)
    }

    /// Returns the number of registered flags.
    #[inline]
    pub fn flag_count(&self) -> usize {
        self.flags.len()
    }

    /// Writes the automata of all patterns of an entity in graphviz dot format.
    #[cfg(feature = "dot_writer")]
    pub fn render_dot<W: std::io::Write>(&self, entity_id: &str, output: &mut W) -> Result<()> {
        let entity = self
            .entity_index
            .get(entity_id)
            .map(|id| &self.entities[*id])
            .ok_or_else(|| MatcherErrorKind::UnknownEntity(entity_id.to_string()))?;
        for pattern_id in &entity.patterns {
            let pattern = &self.patterns[*pattern_id];
            let label = match &pattern.label {
                Some(label) => format!("{} {} ({})", entity.name, pattern.id, label),
                None => format!("{} {}", entity.name, pattern.id),
            };
            crate::internal::dot::nfa_render(&pattern.nfa, &label, &self.token_tests, output);
        }
        Ok(())
    }

    fn entity_or_insert(&mut self, entity_id: &str) -> EntityID {
        if let Some(id) = self.entity_index.get(entity_id) {
            return *id;
        }
        let id = EntityID::new(self.entities.len());
        debug!("Added entity '{}'", entity_id);
        self.entities.push(Entity::new(id, entity_id));
        self.entity_index.insert(entity_id.to_string(), id);
        id
    }

    /// Simulates all patterns at every token position.
    fn scan(&self, doc: &Doc) -> Vec<(EntityID, Match)> {
        let mut cache = ScanCache::new(doc.tokens(), &self.token_tests, &self.flags);
        let mut matches = Vec::new();
        let mut seen = FxHashSet::default();
        for start in 0..doc.len() {
            seen.clear();
            for pattern in &self.patterns {
                let Some(span) = pattern.compiled.find_longest(start, &mut cache) else {
                    continue;
                };
                if !seen.insert((pattern.entity, pattern.label.as_deref(), span)) {
                    continue;
                }
                let entity = &self.entities[pattern.entity];
                matches.push((
                    pattern.entity,
                    Match::new(&entity.name, pattern.label.as_deref(), span),
                ));
            }
        }
        debug!(
            "Scanned {} tokens with {} patterns: {} matches, {} token tests evaluated",
            doc.len(),
            self.patterns.len(),
            matches.len(),
            cache.evaluated()
        );
        matches
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("strict", &self.strict)
            .field("entities", &self.entities)
            .field("patterns", &self.patterns.len())
            .field("token_tests", &self.token_tests.len())
            .field("flags", &self.flags)
            .finish()
    }
}
