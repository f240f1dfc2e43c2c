//! Core data model types for quizforge.
//!
//! These are the fundamental types the platform uses to represent roles,
//! quizzes, questions, and recorded attempts. All of them serialize with
//! serde; their field names are the canonical schema for any persistence
//! layer built on top.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Handle to a quiz owned by the catalog.
pub type QuizId = Uuid;

/// The role a credential was registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A single question: a prompt, its options, and the exact set of option
/// indices a solver has to pick. More than one index may be correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt shown to the solver.
    pub title: String,
    /// Possible answers, displayed in order.
    pub options: Vec<String>,
    /// Indices into `options` that must all be selected, and nothing else.
    #[serde(default)]
    pub correct_answers: BTreeSet<usize>,
}

impl Question {
    pub fn new(
        title: impl Into<String>,
        options: Vec<String>,
        correct_answers: BTreeSet<usize>,
    ) -> Self {
        Self {
            title: title.into(),
            options,
            correct_answers,
        }
    }

    /// Structural validation applied at insertion time: at least two
    /// options, and every correct index in range. An empty correct set is
    /// legal (a solver then scores by selecting nothing).
    pub fn validate(&self) -> Result<(), Error> {
        if self.options.len() < 2 {
            return Err(Error::InvalidQuestion(format!(
                "a question needs at least two options, got {}",
                self.options.len()
            )));
        }
        if let Some(&index) = self.correct_answers.iter().find(|&&i| i >= self.options.len()) {
            return Err(Error::InvalidQuestion(format!(
                "correct index {index} is out of range for {} options",
                self.options.len()
            )));
        }
        Ok(())
    }
}

/// A named ordered collection of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            questions: Vec::new(),
        }
    }
}

/// One row of a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: QuizId,
    pub title: String,
    pub question_count: usize,
}

/// An immutable record of one completed quiz attempt.
///
/// The quiz title is a denormalized copy, not a live reference: deleting
/// the quiz from the catalog leaves recorded attempts intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    /// Unique attempt identifier.
    pub id: Uuid,
    /// Who took the quiz.
    pub username: String,
    /// Title of the quiz at the time it was taken.
    pub quiz_title: String,
    /// Number of questions answered exactly right.
    pub score: u32,
    /// Number of questions in the quiz when it was taken.
    pub total_questions: u32,
    /// When the attempt completed.
    pub timestamp: DateTime<Utc>,
}

impl QuizAttempt {
    /// Score as a percentage; 0% for a zero-question quiz.
    pub fn percent(&self) -> f64 {
        crate::scoring::percentage(self.score, self.total_questions)
    }
}

impl fmt::Display for QuizAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quiz: {}, Score: {}/{}, Date: {}",
            self.quiz_title,
            self.score,
            self.total_questions,
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
