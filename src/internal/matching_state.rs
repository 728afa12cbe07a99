use crate::Span;

/// Records the longest match of a pattern automaton while it is advanced token by token from
/// one start position.
///
/// The recorder moves through the phases `Idle -> Started -> Accepting -> Done`. A match is
/// available once `Accepting` was reached. `Done` is final.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct MatchingState {
    phase: Phase,
    start: Option<usize>,
    end: Option<usize>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing consumed
    #[default]
    Idle,
    /// Tokens consumed, no accepting state set reached yet
    Started,
    /// A match is recorded, a longer one may follow
    Accepting,
    /// The recorded match is the longest one
    Done,
}

impl MatchingState {
    #[inline]
    pub(crate) fn new() -> Self {
        MatchingState::default()
    }

    /// The automaton has no transition for the current token.
    pub(crate) fn no_transition(&mut self) {
        match self.phase {
            Phase::Started => *self = MatchingState::default(),
            Phase::Accepting => self.phase = Phase::Done,
            Phase::Idle | Phase::Done => {}
        }
    }

    /// The token at index `i` led to a state set without the end state.
    pub(crate) fn transition_to_non_accepting(&mut self, i: usize) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Started;
            self.start = Some(i);
        }
    }

    /// The token at index `i` led to a state set containing the end state.
    pub(crate) fn transition_to_accepting(&mut self, i: usize) {
        match self.phase {
            Phase::Done => return,
            Phase::Idle => self.start = Some(i),
            Phase::Started | Phase::Accepting => {}
        }
        self.phase = Phase::Accepting;
        self.end = Some(i + 1);
    }

    #[inline]
    pub(crate) fn is_no_match(&self) -> bool {
        self.phase == Phase::Idle
    }

    #[inline]
    pub(crate) fn is_longest_match(&self) -> bool {
        self.phase == Phase::Done
    }

    /// The longest match recorded so far, if any.
    pub(crate) fn last_match(&self) -> Option<Span> {
        Some(Span::new(self.start?, self.end?))
    }
}
