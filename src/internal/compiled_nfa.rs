use log::trace;

use crate::{internal::nfa::Nfa, Span};

use super::{ScanCache, StateID, TestID};

/// A compiled NFA.
/// It is used to represent the NFA in a way that is optimized for matching.
/// Every state either consumes one token, branches into at most two states without consuming
/// a token, or is the final state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompiledNfa {
    pub(crate) pattern: String,
    pub(crate) states: Vec<StateData>,
    pub(crate) start_state: StateID,
    pub(crate) end_state: StateID,
}

impl CompiledNfa {
    /// Simulates the NFA on the tokens of the cache starting at token index `start`.
    /// Returns the longest non-empty match, if any.
    ///
    /// All states the automaton can be in are advanced in parallel, so no backtracking is
    /// needed. The simulation stops when the set of active states runs empty.
    pub(crate) fn find_longest(&self, start: usize, cache: &mut ScanCache) -> Option<Span> {
        let mut matching_state = super::matching_state::MatchingState::new();
        let mut current = self.epsilon_closure(vec![self.start_state]);
        for i in start..cache.len() {
            let mut next = Vec::with_capacity(current.len());
            for state in &current {
                if let StateData::Consume {
                    test,
                    negated,
                    next: target,
                } = self.states[*state]
                {
                    if cache.test(test, i) != negated {
                        next.push(target);
                    }
                }
            }
            if next.is_empty() {
                trace!("No transition on token {}", i);
                matching_state.no_transition();
                debug_assert!(matching_state.is_no_match() || matching_state.is_longest_match());
                break;
            }
            current = self.epsilon_closure(next);
            if current.contains(&self.end_state) {
                matching_state.transition_to_accepting(i);
            } else {
                matching_state.transition_to_non_accepting(i);
            }
        }
        let span = matching_state.last_match();
        if let Some(span) = span {
            trace!("Pattern {} matched {}", self.pattern, span);
        }
        span
    }

    /// Calculate the epsilon closure of a set of states and return the unique states.
    pub(crate) fn epsilon_closure(&self, states: Vec<StateID>) -> Vec<StateID> {
        let mut closure = states;
        let mut i = 0;
        while i < closure.len() {
            if let StateData::Branch(n1, n2) = self.states[closure[i]] {
                for target in [n1, n2] {
                    if !closure.contains(&target) {
                        closure.push(target);
                    }
                }
            }
            i += 1;
        }
        closure.sort_unstable();
        closure.dedup();
        closure
    }
}

impl From<&Nfa> for CompiledNfa {
    fn from(nfa: &Nfa) -> Self {
        let mut states = vec![StateData::Final; nfa.states().len()];
        for state in nfa.states() {
            debug_assert!(state.transitions().len() <= 1);
            debug_assert!(state.epsilon_transitions().len() <= 2);
            if let Some(transition) = state.transitions().first() {
                states[state.id()] = StateData::Consume {
                    test: transition.test(),
                    negated: transition.negated(),
                    next: transition.target_state(),
                };
            } else if let Some(first) = state.epsilon_transitions().first() {
                let next1 = first.target_state();
                let next2 = state
                    .epsilon_transitions()
                    .get(1)
                    .map_or(next1, |e| e.target_state());
                states[state.id()] = StateData::Branch(next1, next2);
            }
        }
        Self {
            pattern: nfa.pattern().to_string(),
            states,
            start_state: nfa.start_state(),
            end_state: nfa.end_state(),
        }
    }
}

impl std::fmt::Display for CompiledNfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Pattern: {}", self.pattern)?;
        writeln!(f, "Start state: {}", self.start_state)?;
        writeln!(f, "End state: {}", self.end_state)?;
        for (i, state) in self.states.iter().enumerate() {
            writeln!(f, "State {}: {}", i, state)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StateData {
    /// Consumes one token that satisfies the test, or violates it if `negated` is set.
    Consume {
        test: TestID,
        negated: bool,
        next: StateID,
    },
    /// Continues in both states without consuming a token. Both may be equal.
    Branch(StateID, StateID),
    /// Has no outgoing transitions.
    Final,
}

impl std::fmt::Display for StateData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateData::Consume {
                test,
                negated,
                next,
            } => write!(
                f,
                "Test: {}{}, Next: {}",
                if *negated { "!" } else { "" },
                test,
                next
            ),
            StateData::Branch(n1, n2) => write!(f, "Next1: {}, Next2: {}", n1, n2),
            StateData::Final => write!(f, "Final"),
        }
    }
}
