//! The quiz-taking state machine.
//!
//! A [`QuizSession`] owns a snapshot of one quiz and steps a single user
//! through it: present the current question, score each submission, advance,
//! and produce a final result. The snapshot is taken when the session starts,
//! so concurrent edits to the live catalog entry never change the questions
//! mid-flight. Sessions are exclusively owned by their creator and are never
//! shared between callers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Question, Quiz};
use crate::scoring;

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for an answer to the question at this index.
    AwaitingQuestion(usize),
    /// Every question answered, or the quiz was empty to begin with.
    Completed,
}

/// Feedback returned for every submission, correct or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFeedback {
    /// Whether the selection matched the correct set exactly.
    pub correct: bool,
    /// The correct set, so the front end can reveal it.
    pub correct_answers: BTreeSet<usize>,
}

/// Final outcome of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub score: u32,
    pub total: u32,
    pub percent: f64,
}

/// Drives one user through one quiz attempt.
#[derive(Debug)]
pub struct QuizSession {
    quiz: Quiz,
    state: State,
    score: u32,
}

impl QuizSession {
    /// Start a session over a quiz snapshot.
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            state: State::AwaitingQuestion(0),
            score: 0,
        }
    }

    /// Title of the quiz being taken.
    pub fn quiz_title(&self) -> &str {
        &self.quiz.title
    }

    /// Number of questions in the snapshot.
    pub fn question_count(&self) -> usize {
        self.quiz.questions.len()
    }

    /// `(answered, total)` counts for "Question N of M" displays.
    pub fn progress(&self) -> (usize, usize) {
        let answered = match self.state {
            State::AwaitingQuestion(index) => index,
            State::Completed => self.quiz.questions.len(),
        };
        (answered, self.quiz.questions.len())
    }

    /// Whether the session has reached its final state. A quiz with no
    /// questions is complete from the start.
    pub fn is_completed(&self) -> bool {
        match self.state {
            State::Completed => true,
            State::AwaitingQuestion(index) => index >= self.quiz.questions.len(),
        }
    }

    /// The question awaiting an answer, or `None` once the session has
    /// completed. An empty quiz transitions to completed on the first call
    /// instead of indexing out of bounds.
    pub fn current_question(&mut self) -> Option<&Question> {
        if self.is_completed() {
            self.state = State::Completed;
            return None;
        }
        match self.state {
            State::AwaitingQuestion(index) => self.quiz.questions.get(index),
            State::Completed => None,
        }
    }

    /// Score a submission for the current question and advance.
    ///
    /// Returns feedback whether or not the selection was right. Fails with
    /// [`Error::InvalidState`] once the session has completed.
    pub fn submit_answer(&mut self, selected: &BTreeSet<usize>) -> Result<QuestionFeedback> {
        let index = match self.state {
            State::AwaitingQuestion(index) if index < self.quiz.questions.len() => index,
            _ => {
                self.state = State::Completed;
                return Err(Error::InvalidState);
            }
        };

        let question = &self.quiz.questions[index];
        let correct = scoring::is_correct(selected, &question.correct_answers);
        if correct {
            self.score += 1;
        }
        let feedback = QuestionFeedback {
            correct,
            correct_answers: question.correct_answers.clone(),
        };

        self.state = if index + 1 < self.quiz.questions.len() {
            State::AwaitingQuestion(index + 1)
        } else {
            State::Completed
        };

        Ok(feedback)
    }

    /// Final score and percentage, available only once completed.
    pub fn result(&self) -> Result<SessionResult> {
        if !self.is_completed() {
            return Err(Error::NotCompleted);
        }
        let total = self.quiz.questions.len() as u32;
        Ok(SessionResult {
            score: self.score,
            total,
            percent: scoring::percentage(self.score, total),
        })
    }
}
