//! The quiz catalog: owns every authored quiz.
//!
//! All mutation goes through the named operations here; queries hand out
//! deep snapshots, never live references, so nothing can edit a quiz behind
//! the catalog's back. One lock is the mutual-exclusion domain for the
//! whole collection.

use std::collections::BTreeSet;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{Question, Quiz, QuizId, QuizSummary};

/// One catalog entry. Entries stay in creation order.
struct Entry {
    id: QuizId,
    quiz: Quiz,
}

/// Owns the quiz collection behind a single lock.
#[derive(Default)]
pub struct QuizCatalog {
    inner: RwLock<Vec<Entry>>,
}

impl QuizCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new empty quiz and return its handle.
    pub fn create_quiz(&self, title: impl Into<String>) -> QuizId {
        let id = Uuid::new_v4();
        let mut inner = self.inner.write().unwrap();
        inner.push(Entry {
            id,
            quiz: Quiz::new(title),
        });
        id
    }

    /// Append a question to the end of a quiz's question list.
    ///
    /// A question with an empty title is an abandoned authoring draft and
    /// is dropped without error. Structural problems (too few options,
    /// out-of-range correct indices) are rejected with
    /// [`Error::InvalidQuestion`]; nothing is appended on failure.
    pub fn add_question(&self, id: QuizId, question: Question) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        let entry = find_mut(&mut inner, id)?;
        if question.title.is_empty() {
            tracing::debug!(quiz = %id, "dropping question draft with empty title");
            return Ok(());
        }
        question.validate()?;
        entry.quiz.questions.push(question);
        Ok(())
    }

    /// Quiz summaries in creation order.
    pub fn list_quizzes(&self) -> Vec<QuizSummary> {
        let inner = self.inner.read().unwrap();
        inner
            .iter()
            .map(|entry| QuizSummary {
                id: entry.id,
                title: entry.quiz.title.clone(),
                question_count: entry.quiz.questions.len(),
            })
            .collect()
    }

    /// Deep snapshot of a quiz. Later catalog edits never show through.
    pub fn get_quiz(&self, id: QuizId) -> Result<Quiz> {
        let inner = self.inner.read().unwrap();
        inner
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.quiz.clone())
            .ok_or(Error::QuizNotFound)
    }

    /// Replace the three fields of the targeted question in place. The
    /// question keeps its position. The replacement is validated like an
    /// insertion; an empty title is rejected here rather than dropped,
    /// since blanking an existing question would erase it.
    pub fn update_question(
        &self,
        id: QuizId,
        index: usize,
        title: impl Into<String>,
        options: Vec<String>,
        correct_answers: BTreeSet<usize>,
    ) -> Result<()> {
        let question = Question::new(title, options, correct_answers);
        let mut inner = self.inner.write().unwrap();
        let entry = find_mut(&mut inner, id)?;
        let slot = entry
            .quiz
            .questions
            .get_mut(index)
            .ok_or(Error::QuestionNotFound(index))?;
        if question.title.is_empty() {
            return Err(Error::InvalidQuestion("title must not be empty".into()));
        }
        question.validate()?;
        *slot = question;
        Ok(())
    }

    /// Remove a quiz and the questions it owns. Recorded attempts keep
    /// their denormalized title and are not touched.
    pub fn delete_quiz(&self, id: QuizId) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        let position = inner
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(Error::QuizNotFound)?;
        inner.remove(position);
        Ok(())
    }
}

fn find_mut(entries: &mut [Entry], id: QuizId) -> Result<&mut Entry> {
    entries
        .iter_mut()
        .find(|entry| entry.id == id)
        .ok_or(Error::QuizNotFound)
}
