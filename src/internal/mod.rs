/// Module that provides functions and types related to compiled NFAs.
pub(crate) mod compiled_nfa;
pub(crate) use compiled_nfa::CompiledNfa;

/// Module with conversion to graphviz dot format
#[cfg(feature = "dot_writer")]
pub(crate) mod dot;

/// Module that provides the type FlagRegistry.
mod flag_registry;
pub(crate) use flag_registry::{FlagFn, FlagRegistry};

/// Module for several ID types.
mod ids;
pub(crate) use ids::{EntityID, PatternID, StateID, TestID};

/// Module that provides functions and types related to matching states.
pub(crate) mod matching_state;

/// The nfa module contains the NFA implementation.
pub(crate) mod nfa;
pub(crate) use nfa::Nfa;

/// Module that provides the per-scan cache of token test results.
mod scan_cache;
pub(crate) use scan_cache::ScanCache;

/// Module that provides the compiled form of token specifiers.
mod token_test;
pub(crate) use token_test::TokenTest;

/// Module that provides the type TokenTestRegistry.
mod token_test_registry;
pub(crate) use token_test_registry::TokenTestRegistry;
