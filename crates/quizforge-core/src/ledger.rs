//! Append-only per-user attempt history.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use anyhow::Context;

use crate::model::QuizAttempt;

/// Records completed attempts, keyed by username.
///
/// Entries are immutable once recorded and kept in insertion order, which
/// is also the display order. Attempts hold the quiz title by value, so
/// deleting a quiz from the catalog never touches history.
#[derive(Default)]
pub struct AttemptLedger {
    inner: RwLock<HashMap<String, Vec<QuizAttempt>>>,
}

impl AttemptLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed attempt to its user's history.
    pub fn record(&self, attempt: QuizAttempt) {
        let mut inner = self.inner.write().unwrap();
        inner
            .entry(attempt.username.clone())
            .or_default()
            .push(attempt);
    }

    /// A user's attempts in the order they were recorded. A user who never
    /// played gets an empty history, not an error.
    pub fn history(&self, username: &str) -> Vec<QuizAttempt> {
        let inner = self.inner.read().unwrap();
        inner.get(username).cloned().unwrap_or_default()
    }

    /// Export every user's history as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> anyhow::Result<()> {
        let inner = self.inner.read().unwrap();
        let json = serde_json::to_string_pretty(&*inner)
            .context("failed to serialize attempt history")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write history to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn attempt(username: &str, quiz_title: &str, score: u32, total: u32) -> QuizAttempt {
        QuizAttempt {
            id: Uuid::new_v4(),
            username: username.into(),
            quiz_title: quiz_title.into(),
            score,
            total_questions: total,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn history_preserves_insertion_order() {
        let ledger = AttemptLedger::new();
        let a = attempt("alice", "Geography", 3, 5);
        let b = attempt("alice", "History", 5, 5);
        ledger.record(a.clone());
        ledger.record(b.clone());

        assert_eq!(ledger.history("alice"), vec![a, b]);
    }

    #[test]
    fn unknown_user_has_empty_history() {
        let ledger = AttemptLedger::new();
        assert!(ledger.history("bob").is_empty());
    }

    #[test]
    fn histories_are_per_user() {
        let ledger = AttemptLedger::new();
        ledger.record(attempt("alice", "Geography", 1, 3));
        ledger.record(attempt("bob", "Geography", 2, 3));

        assert_eq!(ledger.history("alice").len(), 1);
        assert_eq!(ledger.history("bob").len(), 1);
        assert_eq!(ledger.history("alice")[0].username, "alice");
    }

    #[test]
    fn history_returns_a_snapshot() {
        let ledger = AttemptLedger::new();
        ledger.record(attempt("alice", "Geography", 1, 3));

        let mut snapshot = ledger.history("alice");
        snapshot.clear();
        assert_eq!(ledger.history("alice").len(), 1);
    }

    #[test]
    fn save_json_writes_the_canonical_schema() {
        let ledger = AttemptLedger::new();
        ledger.record(attempt("alice", "Geography", 2, 3));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        ledger.save_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: HashMap<String, Vec<QuizAttempt>> =
            serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["alice"].len(), 1);
        assert_eq!(parsed["alice"][0].quiz_title, "Geography");
        assert_eq!(parsed["alice"][0].score, 2);
    }

    #[test]
    fn concurrent_recording_keeps_every_attempt() {
        use std::sync::Arc;

        let ledger = Arc::new(AttemptLedger::new());
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        ledger.record(attempt(&format!("user{worker}"), &format!("quiz{i}"), i, 25));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for worker in 0..4 {
            assert_eq!(ledger.history(&format!("user{worker}")).len(), 25);
        }
    }
}
