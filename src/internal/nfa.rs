//! This module contains the NFA (Non-deterministic Finite Automaton) implementation.
//! Every transition of the NFA consumes exactly one token. Quantifiers are expressed with
//! epsilon transitions around the single transition of a specifier.
//! The NFA is later converted to a compiled NFA for matching token sequences.

use log::trace;

use crate::{Quantifier, Result, TokenSpec};

use super::{ids::StateIDBase, StateID, TestID, TokenTestRegistry};

#[derive(Debug, Clone, Default)]
pub(crate) struct Nfa {
    /// Readable form of the pattern, used in logs and graphs
    pub(crate) pattern: String,
    pub(crate) states: Vec<NfaState>,
    pub(crate) start_state: StateID,
    pub(crate) end_state: StateID,
}

impl Nfa {
    pub(crate) fn new() -> Self {
        Self {
            pattern: String::new(),
            states: vec![NfaState::default()],
            start_state: StateID::default(),
            end_state: StateID::default(),
        }
    }

    /// Creates an NFA for a pattern from its token specifiers.
    /// Every specifier registers its conditions as token test in the given registry.
    pub(crate) fn try_from_specs(
        specs: &[TokenSpec],
        registry: &mut TokenTestRegistry,
    ) -> Result<Self> {
        let mut nfa = Nfa::new();
        for spec in specs {
            let test = registry.add_token_test(spec)?;
            let mut fragment = Nfa::single(test, spec.quantifier() == Quantifier::Zero);
            fragment.quantify(spec.quantifier());
            nfa.concat(fragment);
        }
        nfa.pattern = specs
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        trace!(
            "NFA for pattern {} has {} states",
            nfa.pattern,
            nfa.states.len()
        );
        Ok(nfa)
    }

    /// Creates an NFA that consumes exactly one token.
    /// If `negated` is true, the token must not satisfy the test.
    pub(crate) fn single(test: TestID, negated: bool) -> Self {
        let mut nfa = Nfa::new();
        let end_state = nfa.new_state();
        nfa.add_transition(nfa.start_state, test, negated, end_state);
        nfa.end_state = end_state;
        nfa
    }

    /// True as long as nothing has been added to the initial state.
    pub(crate) fn is_empty(&self) -> bool {
        self.states.len() == 1 && self.states[0].is_empty()
    }

    pub(crate) fn start_state(&self) -> StateID {
        self.start_state
    }

    pub(crate) fn end_state(&self) -> StateID {
        self.end_state
    }

    pub(crate) fn states(&self) -> &[NfaState] {
        &self.states
    }

    pub(crate) fn pattern(&self) -> &str {
        &self.pattern
    }

    pub(crate) fn add_transition(
        &mut self,
        from: StateID,
        test: TestID,
        negated: bool,
        target_state: StateID,
    ) {
        self.states[from].transitions.push(NfaTransition {
            test,
            negated,
            target_state,
        });
    }

    pub(crate) fn add_epsilon_transition(&mut self, from: StateID, target_state: StateID) {
        self.states[from]
            .epsilon_transitions
            .push(EpsilonTransition { target_state });
    }

    pub(crate) fn new_state(&mut self) -> StateID {
        let id = StateID::new(self.states.len() as StateIDBase);
        self.states.push(NfaState::new(id));
        id
    }

    /// Renumbers all states by adding `offset`. Returns the new start and end state.
    pub(crate) fn shift_ids(&mut self, offset: usize) -> (StateID, StateID) {
        self.states.iter_mut().for_each(|s| s.offset(offset));
        self.start_state = shifted(self.start_state, offset);
        self.end_state = shifted(self.end_state, offset);
        (self.start_state, self.end_state)
    }

    /// Appends `other` so that it runs after this automaton.
    pub(crate) fn concat(&mut self, mut other: Nfa) {
        if self.is_empty() {
            *self = other;
            return;
        }
        let (other_start, other_end) = other.shift_ids(self.states.len());
        self.states.append(&mut other.states);
        debug_assert!(self
            .states
            .iter()
            .enumerate()
            .all(|(i, s)| s.id().as_usize() == i));
        self.add_epsilon_transition(self.end_state, other_start);
        self.end_state = other_end;
    }

    /// Wraps the automaton into the epsilon structure of the quantifier.
    /// `One` and `Zero` consume exactly one token and need no extra states.
    pub(crate) fn quantify(&mut self, quantifier: Quantifier) {
        let (start, end) = (self.start_state, self.end_state);
        match quantifier {
            Quantifier::One | Quantifier::Zero => {}
            Quantifier::ZeroOrOne => {
                let new_start = self.new_state();
                self.add_epsilon_transition(new_start, start);
                self.add_epsilon_transition(new_start, end);
                self.start_state = new_start;
            }
            Quantifier::OneOrMore | Quantifier::ZeroOrMore => {
                let new_start = self.new_state();
                self.add_epsilon_transition(new_start, start);
                if quantifier == Quantifier::ZeroOrMore {
                    self.add_epsilon_transition(new_start, end);
                }
                let new_end = self.new_state();
                self.add_epsilon_transition(end, new_end);
                // Repeat
                self.add_epsilon_transition(end, start);
                self.start_state = new_start;
                self.end_state = new_end;
            }
        }
    }
}

#[inline]
fn shifted(id: StateID, offset: usize) -> StateID {
    StateID::new(id.id() + offset as StateIDBase)
}

#[derive(Debug, Clone, Default)]
pub(crate) struct NfaState {
    id: StateID,
    epsilon_transitions: Vec<EpsilonTransition>,
    transitions: Vec<NfaTransition>,
}

impl NfaState {
    pub(crate) fn new(id: StateID) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.transitions.is_empty() && self.epsilon_transitions.is_empty()
    }

    pub(crate) fn id(&self) -> StateID {
        self.id
    }

    pub(crate) fn transitions(&self) -> &[NfaTransition] {
        &self.transitions
    }

    pub(crate) fn epsilon_transitions(&self) -> &[EpsilonTransition] {
        &self.epsilon_transitions
    }

    fn offset(&mut self, offset: usize) {
        self.id = shifted(self.id, offset);
        for t in self.transitions.iter_mut() {
            t.target_state = shifted(t.target_state, offset);
        }
        for e in self.epsilon_transitions.iter_mut() {
            e.target_state = shifted(e.target_state, offset);
        }
    }
}

/// A transition in the NFA that consumes one token.
#[derive(Debug, Clone)]
pub(crate) struct NfaTransition {
    test: TestID,
    /// The consumed token must not satisfy the test
    negated: bool,
    target_state: StateID,
}

impl NfaTransition {
    pub(crate) fn target_state(&self) -> StateID {
        self.target_state
    }

    pub(crate) fn test(&self) -> TestID {
        self.test
    }

    pub(crate) fn negated(&self) -> bool {
        self.negated
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct EpsilonTransition {
    target_state: StateID,
}

impl EpsilonTransition {
    pub(crate) fn target_state(&self) -> StateID {
        self.target_state
    }
}
