//! The owned-state facade tying the services together.
//!
//! One [`QuizPlatform`] is constructed at process start and passed by
//! reference into every operation; there are no process-wide singletons.
//! Front ends hold the platform, start sessions from it, and hand completed
//! sessions back for recording.

use chrono::Utc;
use uuid::Uuid;

use crate::catalog::QuizCatalog;
use crate::error::Result;
use crate::identity::{CredentialVerifier, IdentityStore};
use crate::ledger::AttemptLedger;
use crate::model::{QuizAttempt, QuizId};
use crate::session::QuizSession;

/// Everything a front end needs: identity, catalog, and ledger.
pub struct QuizPlatform {
    pub identity: IdentityStore,
    pub catalog: QuizCatalog,
    pub ledger: AttemptLedger,
}

impl QuizPlatform {
    pub fn new(verifier: Box<dyn CredentialVerifier>) -> Self {
        Self {
            identity: IdentityStore::new(verifier),
            catalog: QuizCatalog::new(),
            ledger: AttemptLedger::new(),
        }
    }

    /// Start a session over a snapshot of the given quiz. The snapshot is
    /// deep: later catalog edits never reach an in-flight session.
    pub fn start_session(&self, id: QuizId) -> Result<QuizSession> {
        Ok(QuizSession::new(self.catalog.get_quiz(id)?))
    }

    /// Record a completed session in the owning user's history and return
    /// the stamped attempt. Fails with [`crate::error::Error::NotCompleted`]
    /// while questions remain.
    pub fn record_result(&self, username: &str, session: &QuizSession) -> Result<QuizAttempt> {
        let result = session.result()?;
        let attempt = QuizAttempt {
            id: Uuid::new_v4(),
            username: username.to_string(),
            quiz_title: session.quiz_title().to_string(),
            score: result.score,
            total_questions: result.total,
            timestamp: Utc::now(),
        };
        self.ledger.record(attempt.clone());
        Ok(attempt)
    }
}

impl Default for QuizPlatform {
    fn default() -> Self {
        Self::new(Box::new(crate::identity::Sha256Verifier))
    }
}
