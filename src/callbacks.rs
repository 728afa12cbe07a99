//! Module with the extension points of the matcher.
//!
//! An [Acceptor] can reject or adjust a match after the automaton found it. An [OnMatch]
//! callback is invoked for every accepted match of its entity and may mutate the document.
//!
//! Both are traits with a blanket implementation for closures of the right signature. Use
//! [acceptor] and [on_match] to turn a closure into a trait object without having to annotate
//! its argument types.
use std::sync::Arc;

use crate::{CallbackResult, Doc, Match, Matcher};

/// Decides whether a raw match is kept.
pub trait Acceptor: Send + Sync {
    /// Inspect a candidate match.
    ///
    /// Return `Ok(None)` to discard the match, `Ok(Some(m))` to keep `m` instead. The returned
    /// match may have other boundaries, another label or another entity ID.
    fn accept(&self, doc: &Doc, candidate: &Match) -> CallbackResult<Option<Match>>;
}

impl<F> Acceptor for F
where
    F: Fn(&Doc, &Match) -> CallbackResult<Option<Match>> + Send + Sync,
{
    fn accept(&self, doc: &Doc, candidate: &Match) -> CallbackResult<Option<Match>> {
        self(doc, candidate)
    }
}

/// Is called for each accepted match of an entity.
pub trait OnMatch: Send + Sync {
    /// Handle the match `matches[index]`.
    ///
    /// `matches` holds all accepted matches of the entity in document order. It is the same
    /// list for every invocation of one scan, and its offsets refer to the document as it was
    /// scanned. Merges should therefore be queued with [Doc::schedule_merge]. They are applied
    /// once all callbacks of all entities have run.
    fn on_match(
        &self,
        matcher: &Matcher,
        doc: &mut Doc,
        index: usize,
        matches: &[Match],
    ) -> CallbackResult<()>;
}

impl<F> OnMatch for F
where
    F: Fn(&Matcher, &mut Doc, usize, &[Match]) -> CallbackResult<()> + Send + Sync,
{
    fn on_match(
        &self,
        matcher: &Matcher,
        doc: &mut Doc,
        index: usize,
        matches: &[Match],
    ) -> CallbackResult<()> {
        self(matcher, doc, index, matches)
    }
}

/// Wrap a closure into an acceptor trait object.
pub fn acceptor<F>(f: F) -> Arc<dyn Acceptor>
where
    F: Fn(&Doc, &Match) -> CallbackResult<Option<Match>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a closure into an on-match callback trait object.
pub fn on_match<F>(f: F) -> Arc<dyn OnMatch>
where
    F: Fn(&Matcher, &mut Doc, usize, &[Match]) -> CallbackResult<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// An on-match callback that merges every match of its entity into one token.
///
/// Each invocation queues the merge of its match on the document. The queue is applied after
/// the callbacks of all entities ran, from the rightmost match to the leftmost one. Of
/// overlapping matches, also those of different entities, only one region is merged.
#[derive(Debug, Clone, Default)]
pub struct MergeOnMatch {
    attrs: crate::MergeAttrs,
}

impl MergeOnMatch {
    /// Create a merging callback that assigns `attrs` to the merged tokens.
    pub fn new(attrs: crate::MergeAttrs) -> Self {
        Self { attrs }
    }
}

impl OnMatch for MergeOnMatch {
    fn on_match(
        &self,
        _matcher: &Matcher,
        doc: &mut Doc,
        index: usize,
        matches: &[Match],
    ) -> CallbackResult<()> {
        if let Some(m) = matches.get(index) {
            doc.schedule_merge(m.span(), self.attrs.clone());
        }
        Ok(())
    }
}
