use log::debug;
use serde::{Deserialize, Serialize};

use crate::{MatcherError, MatcherErrorKind, Result, Span, Token};

/// Attributes assigned to the token that results from [Doc::merge].
/// Fields left `None` are taken from the first merged token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeAttrs {
    /// The fine-grained tag of the merged token.
    pub tag: Option<String>,
    /// The coarse-grained part-of-speech of the merged token.
    pub pos: Option<String>,
    /// The lemma of the merged token.
    pub lemma: Option<String>,
    /// The entity type of the merged token.
    pub ent_type: Option<String>,
}

impl MergeAttrs {
    /// Create empty merge attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag of the merged token.
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    /// Set the part-of-speech of the merged token.
    pub fn with_pos(mut self, pos: &str) -> Self {
        self.pos = Some(pos.to_string());
        self
    }

    /// Set the lemma of the merged token.
    pub fn with_lemma(mut self, lemma: &str) -> Self {
        self.lemma = Some(lemma.to_string());
        self
    }

    /// Set the entity type of the merged token.
    pub fn with_ent_type(mut self, ent_type: &str) -> Self {
        self.ent_type = Some(ent_type.to_string());
        self
    }
}

/// An ordered sequence of tokens the matcher is applied to.
///
/// The document is the only mutable piece of state during matching: on-match callbacks receive
/// it mutably and may merge the tokens of a match into a single token.
///
/// Merges can be applied at once with [Doc::merge] or queued with [Doc::schedule_merge]. Queued
/// merges keep the offsets of the unmodified document valid until
/// [Doc::apply_scheduled_merges] runs them. [crate::Matcher::apply] does so after all callbacks
/// have been invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doc {
    tokens: Vec<Token>,
    #[serde(skip)]
    scheduled: Vec<(Span, MergeAttrs)>,
}

impl Doc {
    /// Create a document from already constructed tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            scheduled: Vec::new(),
        }
    }

    /// Create a document from words. Every word except the last is followed by a space.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        let len = words.len();
        let tokens = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(w.as_ref(), i + 1 < len))
            .collect();
        Self {
            tokens,
            scheduled: Vec::new(),
        }
    }

    /// Create a document from words and their trailing whitespace information.
    pub fn with_spaces<S: AsRef<str>>(words: &[S], spaces: &[bool]) -> Result<Self> {
        if words.len() != spaces.len() {
            return Err(MatcherError::new(MatcherErrorKind::InvalidDoc(format!(
                "{} words but {} whitespace entries",
                words.len(),
                spaces.len()
            ))));
        }
        let tokens = words
            .iter()
            .zip(spaces)
            .map(|(w, s)| Token::new(w.as_ref(), *s))
            .collect();
        Ok(Self {
            tokens,
            scheduled: Vec::new(),
        })
    }

    /// The number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if the document has no tokens.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The tokens of the document.
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The token at index `i`.
    #[inline]
    pub fn token(&self, i: usize) -> Option<&Token> {
        self.tokens.get(i)
    }

    /// Mutable access to the token at index `i`, e.g. to add annotations.
    #[inline]
    pub fn token_mut(&mut self, i: usize) -> Option<&mut Token> {
        self.tokens.get_mut(i)
    }

    /// The verbatim texts of all tokens.
    pub fn words(&self) -> Vec<&str> {
        self.tokens.iter().map(Token::text).collect()
    }

    /// The text of the document reconstructed from tokens and whitespace.
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::text_with_ws).collect()
    }

    /// The text covered by the given span without trailing whitespace.
    pub fn span_text(&self, span: Span) -> Result<String> {
        self.check_span(span)?;
        let text: String = self.tokens[span.range()]
            .iter()
            .map(Token::text_with_ws)
            .collect();
        Ok(match self.tokens[span.end - 1].whitespace() {
            true => text[..text.len() - 1].to_string(),
            false => text,
        })
    }

    /// Merge the tokens of `span` into a single token.
    ///
    /// The text of the new token is the text of the span including inner whitespace. The new
    /// token inherits the trailing whitespace of the last merged token. All token indices after
    /// `span.start` shift, so offsets of other matches become stale.
    pub fn merge(&mut self, span: Span, attrs: MergeAttrs) -> Result<()> {
        self.check_span(span)?;
        let text = self.span_text(span)?;
        let whitespace = self.tokens[span.end - 1].whitespace();
        debug!("Merging tokens {} into '{}'", span, text);
        let mut merged: Vec<Token> = self.tokens.drain(span.range()).collect();
        let first = merged.swap_remove(0);
        let mut token = Token::new(&text, whitespace);
        token.set_tag(attrs.tag.or_else(|| first.tag().map(str::to_string)));
        token.set_pos(attrs.pos.or_else(|| first.pos().map(str::to_string)));
        token.set_lemma(attrs.lemma.or_else(|| first.lemma().map(str::to_string)));
        token.set_dep(first.dep().map(str::to_string));
        token.set_ent_type(
            attrs
                .ent_type
                .or_else(|| first.ent_type().map(str::to_string)),
        );
        self.tokens.insert(span.start, token);
        Ok(())
    }

    /// Queue a merge of `span` for [Doc::apply_scheduled_merges].
    /// The span refers to the document as it is now, before any queued merge is applied.
    pub fn schedule_merge(&mut self, span: Span, attrs: MergeAttrs) {
        self.scheduled.push((span, attrs));
    }

    /// The number of queued merges.
    #[inline]
    pub fn scheduled_merges(&self) -> usize {
        self.scheduled.len()
    }

    /// Drop all queued merges.
    pub fn clear_scheduled_merges(&mut self) {
        self.scheduled.clear();
    }

    /// Apply all queued merges and return the number of merged regions.
    ///
    /// Merges run from the rightmost span to the leftmost one, so that the offsets of the spans
    /// still to be merged stay valid. Of overlapping spans only the first one in this order is
    /// merged, which is the longest of those with the rightmost start. Empty spans are ignored.
    /// All spans are checked before the first merge. If one doesn't fit, the document is left
    /// unchanged and the queue is dropped.
    pub fn apply_scheduled_merges(&mut self) -> Result<usize> {
        let mut scheduled = std::mem::take(&mut self.scheduled);
        scheduled.retain(|(span, _)| !span.is_empty());
        scheduled.sort_by(|(a, _), (b, _)| b.cmp(a));
        let mut merges: Vec<(Span, MergeAttrs)> = Vec::with_capacity(scheduled.len());
        for (span, attrs) in scheduled {
            self.check_span(span)?;
            if merges.last().is_some_and(|(last, _)| last.overlaps(&span)) {
                continue;
            }
            merges.push((span, attrs));
        }
        let count = merges.len();
        for (span, attrs) in merges {
            self.merge(span, attrs)?;
        }
        Ok(count)
    }

    fn check_span(&self, span: Span) -> Result<()> {
        if span.is_empty() || !span.fits(self.len()) {
            return Err(MatcherError::new(MatcherErrorKind::InvalidSpan {
                start: span.start,
                end: span.end,
                len: self.len(),
            }));
        }
        Ok(())
    }
}

impl<S: AsRef<str>> From<&[S]> for Doc {
    fn from(words: &[S]) -> Self {
        Doc::from_words(words)
    }
}
