//! Core error types.
//!
//! One enum covers every recoverable failure the platform can signal, so
//! front ends can match on kinds instead of strings. None of these abort
//! anything: the operation that failed leaves its collection untouched.

use thiserror::Error;

/// Errors returned by the identity store, catalog, session, and ledger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Registration attempted with a username that exists in either role set.
    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    /// No credential matched the supplied username/secret pair.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The handle does not name a quiz in the catalog.
    #[error("quiz not found")]
    QuizNotFound,

    /// The question index is out of range for the targeted quiz.
    #[error("question {0} not found")]
    QuestionNotFound(usize),

    /// A session operation was called out of sequence.
    #[error("quiz session already completed")]
    InvalidState,

    /// The session result was requested before the last question was answered.
    #[error("quiz session not yet completed")]
    NotCompleted,

    /// A question failed insertion-time validation.
    #[error("invalid question: {0}")]
    InvalidQuestion(String),
}

impl Error {
    /// Returns `true` for failures that should end the current request
    /// rather than be retried by a transport layer.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Error::InvalidCredentials | Error::QuizNotFound | Error::QuestionNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
