use thiserror::Error;

/// The result type for the `tokmatch` crate.
pub type Result<T> = std::result::Result<T, MatcherError>;

/// The error type user supplied acceptors and on-match callbacks can return.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The result type of user supplied acceptors and on-match callbacks.
pub type CallbackResult<T> = std::result::Result<T, CallbackError>;

/// The error type for the `tokmatch` crate.
#[derive(Error, Debug)]
pub struct MatcherError {
    /// The source of the error.
    pub source: Box<MatcherErrorKind>,
}

impl MatcherError {
    /// Create a new `MatcherError`.
    pub fn new(kind: MatcherErrorKind) -> Self {
        MatcherError {
            source: Box::new(kind),
        }
    }

    /// Get the kind of the error.
    #[inline]
    pub fn kind(&self) -> &MatcherErrorKind {
        &self.source
    }
}

impl std::fmt::Display for MatcherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum MatcherErrorKind {
    /// A token specifier or its quantifier is malformed.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// A pattern was added for an entity that was not registered while the matcher runs in
    /// strict mode.
    #[error("Unknown entity '{0}'")]
    UnknownEntity(String),

    /// A token specifier references an attribute or flag that does not exist.
    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// A regex predicate could not be compiled.
    #[error("'{1}' {0}")]
    InvalidRegex(regex::Error, String),

    /// A span is empty or exceeds the bounds of the document.
    #[error("Invalid span {start}..{end} for document of length {len}")]
    InvalidSpan {
        /// The start of the offending span.
        start: usize,
        /// The end of the offending span.
        end: usize,
        /// The number of tokens in the document.
        len: usize,
    },

    /// A document could not be constructed from the given parts.
    #[error("Invalid document: {0}")]
    InvalidDoc(String),

    /// An acceptor returned a match whose offsets are not valid for the scanned document.
    #[error("Acceptor of entity '{entity}' returned invalid match {start}..{end}")]
    InvalidMatch {
        /// The entity whose acceptor produced the match.
        entity: String,
        /// The start offset returned by the acceptor.
        start: usize,
        /// The end offset returned by the acceptor.
        end: usize,
    },

    /// An acceptor or on-match callback failed.
    #[error("Callback of entity '{0}' failed: {1}")]
    Callback(String, CallbackError),
}

impl From<MatcherErrorKind> for MatcherError {
    fn from(kind: MatcherErrorKind) -> Self {
        MatcherError::new(kind)
    }
}
