#![forbid(missing_docs)]
//! # `tokmatch`
//! The `tokmatch` crate is a rule-based matcher for sequences of annotated tokens.
//! It finds phrases in a document by patterns over token attributes, e.g. the lowercase form of a
//! token, its punctuation flag or dynamically registered flags, instead of over raw characters.
//!
//! Patterns are grouped by entities. Each entity has a unique ID, arbitrary attributes, any
//! number of patterns, an optional acceptor that can reject or adjust matches and an optional
//! on-match callback that may modify the document, e.g. by merging a matched phrase into a single
//! token.
//!
//! Every token specifier of a pattern can carry a quantifier: `!` (no such token), `?` (optional),
//! `*` (any number) and `+` (at least one). Patterns are compiled into small finite automata which
//! are advanced in parallel, so matching needs no backtracking. Of all matches of a pattern that
//! start at the same token the longest one is reported.
//!
//! # Example
//! ```rust
//! use tokmatch::{Doc, EntityAttributes, Matcher, MergeAttrs, MergeOnMatch, TokenSpec};
//! use std::sync::Arc;
//!
//! let mut matcher = Matcher::new();
//! matcher
//!     .add_pattern(
//!         "HelloWorld",
//!         &[
//!             TokenSpec::lower("hello"),
//!             TokenSpec::is_punct(true),
//!             TokenSpec::lower("world"),
//!         ],
//!         None,
//!     )
//!     .expect("Invalid pattern");
//! matcher.add_entity(
//!     "GoogleNow",
//!     EntityAttributes::new(),
//!     None,
//!     Some(Arc::new(MergeOnMatch::new(MergeAttrs::new().with_ent_type("PRODUCT")))),
//! );
//! matcher
//!     .add_pattern("GoogleNow", &[TokenSpec::orth("Google"), TokenSpec::orth("Now")], None)
//!     .expect("Invalid pattern");
//!
//! let mut doc = Doc::from_words(&["Google", "Now", "says", "hello", ",", "world", "!"]);
//! let matches = matcher.apply(&mut doc).expect("Callback failed");
//! for m in &matches {
//!     println!("Match: {}", m);
//! }
//! assert_eq!(matches[0].as_tuple(), ("GoogleNow", None, 0, 2));
//! assert_eq!(matches[1].as_tuple(), ("HelloWorld", None, 3, 6));
//! assert_eq!(doc.words(), vec!["Google Now", "says", "hello", ",", "world", "!"]);
//! ```
//! The output of the example is:
//! ```text
//! Match: GoogleNow 0..2
//! Match: HelloWorld 3..6
//! ```
//!
//! Note that the matches returned by [Matcher::apply] refer to the document as it was before the
//! on-match callbacks ran.
//!
//! # Crate features
//! The crate has the following features:
//! - `default`: This is the default feature set. It includes the `dot_writer` feature.
//!
//! - `dot_writer`: Enables [Matcher::render_dot] which writes the automata of an entity in
//!   graphviz dot format. This is useful for debugging patterns.

/// Module with the acceptor and on-match callback traits.
mod callbacks;
pub use callbacks::{acceptor, on_match, Acceptor, MergeOnMatch, OnMatch};

/// Module with the document type.
mod doc;
pub use doc::{Doc, MergeAttrs};

/// Module with entity definitions.
mod entity;
pub use entity::{EntityAttributes, EntityDefinition, PatternDefinition};

/// The module with the error types.
mod errors;
pub use errors::{CallbackError, CallbackResult, MatcherError, MatcherErrorKind, Result};

/// Module with the flag handle type.
mod flag;
pub use flag::FlagId;

/// Module with internal implementation details.
mod internal;

/// The module with the match type.
mod match_type;
pub use match_type::Match;

/// The module with the matcher.
mod matcher;
pub use matcher::Matcher;

/// The module with the matcher builder.
mod matcher_builder;
pub use matcher_builder::MatcherBuilder;

/// Module with the span type.
mod span;
pub use span::Span;

/// Module with the token type.
mod token;
pub use token::Token;

/// Module with the token specifier types.
mod token_spec;
pub use token_spec::{Attr, AttrKind, CmpOp, Predicate, Quantifier, TokenSpec, Value};
