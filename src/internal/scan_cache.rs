//! Module with the per-scan cache of token test results.
//!
//! Token tests are shared between patterns, and patterns are advanced from every start position.
//! The same test is therefore asked for the same token many times during one scan. The cache
//! makes sure every (test, token) pair is evaluated only once. It lives for the duration of a
//! single scan and is dropped afterwards, because callbacks may change the document.

use log::trace;
use rustc_hash::FxHashMap;

use crate::Token;

use super::{FlagRegistry, TestID, TokenTestRegistry};

/// The cache maps (test, token index) pairs to the result of the test.
pub(crate) struct ScanCache<'a> {
    tokens: &'a [Token],
    token_tests: &'a TokenTestRegistry,
    flags: &'a FlagRegistry,
    results: FxHashMap<(TestID, usize), bool>,
}

impl<'a> ScanCache<'a> {
    /// Creates a new scan cache for the given tokens.
    pub(crate) fn new(
        tokens: &'a [Token],
        token_tests: &'a TokenTestRegistry,
        flags: &'a FlagRegistry,
    ) -> Self {
        Self {
            tokens,
            token_tests,
            flags,
            results: FxHashMap::default(),
        }
    }

    /// Returns the number of tokens that are scanned.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns the result of the given test for the token at index `i`.
    pub(crate) fn test(&mut self, id: TestID, i: usize) -> bool {
        let (tokens, token_tests, flags) = (self.tokens, self.token_tests, self.flags);
        *self.results.entry((id, i)).or_insert_with(|| {
            let result = token_tests.matches(id, &tokens[i], flags);
            trace!("Test {} on token {} '{}': {}", id, i, tokens[i].text(), result);
            result
        })
    }

    /// Returns the number of evaluated tests.
    pub(crate) fn evaluated(&self) -> usize {
        self.results.len()
    }
}
