//! TOML quiz file parser.
//!
//! Loads quiz definitions from TOML files and directories, validates them,
//! and installs them into a catalog through the normal authoring
//! operations.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::QuizCatalog;
use crate::model::{Question, QuizId};

/// Intermediate TOML structure for quiz definition files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    title: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    title: String,
    options: Vec<String>,
    #[serde(default)]
    correct: Vec<usize>,
}

/// A parsed quiz definition, not yet installed in a catalog.
#[derive(Debug, Clone)]
pub struct QuizFile {
    pub title: String,
    pub questions: Vec<Question>,
}

/// Parse a single TOML file into a `QuizFile`.
pub fn parse_quiz_file(path: &Path) -> Result<QuizFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `QuizFile` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<QuizFile> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            title: q.title,
            options: q.options,
            correct_answers: q.correct.into_iter().collect::<BTreeSet<_>>(),
        })
        .collect();

    Ok(QuizFile {
        title: parsed.quiz.title,
        questions,
    })
}

/// Recursively load all `.toml` quiz files from a directory. Files that
/// fail to parse are logged and skipped.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizFile>> {
    let mut files = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            files.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz_file(&path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(files)
}

/// A warning from quiz file validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question title (if applicable).
    pub question: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz file for common authoring mistakes.
pub fn validate_quiz_file(file: &QuizFile) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if file.title.trim().is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "quiz title is empty".into(),
        });
    }

    // Check for duplicate question titles
    let mut seen_titles = std::collections::HashSet::new();
    for q in &file.questions {
        if !q.title.is_empty() && !seen_titles.insert(&q.title) {
            warnings.push(ValidationWarning {
                question: Some(q.title.clone()),
                message: format!("duplicate question title: {}", q.title),
            });
        }
    }

    for q in &file.questions {
        if q.title.is_empty() {
            warnings.push(ValidationWarning {
                question: None,
                message: "question title is empty and will be dropped on install".into(),
            });
        }
        if q.options.len() < 2 {
            warnings.push(ValidationWarning {
                question: Some(q.title.clone()),
                message: format!("needs at least two options, has {}", q.options.len()),
            });
        }
        if let Some(&index) = q.correct_answers.iter().find(|&&i| i >= q.options.len()) {
            warnings.push(ValidationWarning {
                question: Some(q.title.clone()),
                message: format!(
                    "correct index {index} is out of range for {} options",
                    q.options.len()
                ),
            });
        }
        if q.correct_answers.is_empty() {
            warnings.push(ValidationWarning {
                question: Some(q.title.clone()),
                message: "no correct answers; only an empty selection will score".into(),
            });
        }
    }

    warnings
}

/// Install a parsed quiz into a catalog.
///
/// Every question is validated up front, so a bad file creates nothing at
/// all; empty-title drafts are still dropped silently by the catalog.
pub fn install(file: &QuizFile, catalog: &QuizCatalog) -> crate::error::Result<QuizId> {
    for q in file.questions.iter().filter(|q| !q.title.is_empty()) {
        q.validate()?;
    }

    let id = catalog.create_quiz(file.title.clone());
    for q in &file.questions {
        catalog.add_question(id, q.clone())?;
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[quiz]
title = "European Capitals"

[[questions]]
title = "What is the capital of France?"
options = ["Paris", "Lyon", "Marseille", "Nice"]
correct = [0]

[[questions]]
title = "Which of these are in Scandinavia?"
options = ["Norway", "Finland", "Denmark", "Estonia"]
correct = [0, 2]
"#;

    #[test]
    fn parse_valid_toml() {
        let file = parse_quiz_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(file.title, "European Capitals");
        assert_eq!(file.questions.len(), 2);
        assert_eq!(file.questions[0].correct_answers, BTreeSet::from([0]));
        assert_eq!(file.questions[1].correct_answers, BTreeSet::from([0, 2]));
        assert_eq!(file.questions[1].options[2], "Denmark");
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[quiz]
title = "Minimal"

[[questions]]
title = "Yes or no?"
options = ["Yes", "No"]
"#;
        let file = parse_quiz_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(file.questions.len(), 1);
        assert!(file.questions[0].correct_answers.is_empty());
    }

    #[test]
    fn duplicate_correct_indices_collapse() {
        let toml = r#"
[quiz]
title = "Dupes"

[[questions]]
title = "Pick"
options = ["a", "b"]
correct = [1, 1, 1]
"#;
        let file = parse_quiz_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(file.questions[0].correct_answers, BTreeSet::from([1]));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_quiz_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_flags_common_mistakes() {
        let toml = r#"
[quiz]
title = "Messy"

[[questions]]
title = "One option"
options = ["only"]
correct = [0]

[[questions]]
title = "Out of range"
options = ["a", "b"]
correct = [5]

[[questions]]
title = "No answer"
options = ["a", "b"]

[[questions]]
title = "Out of range"
options = ["a", "b"]
correct = [0]
"#;
        let file = parse_quiz_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_quiz_file(&file);
        assert!(warnings.iter().any(|w| w.message.contains("two options")));
        assert!(warnings.iter().any(|w| w.message.contains("out of range")));
        assert!(warnings.iter().any(|w| w.message.contains("no correct answers")));
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn validate_clean_file_has_no_warnings() {
        let file = parse_quiz_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert!(validate_quiz_file(&file).is_empty());
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("capitals.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml [").unwrap();
        std::fs::write(dir.path().join("ignored.txt"), "not a quiz").unwrap();

        let files = load_quiz_directory(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].title, "European Capitals");
    }

    #[test]
    fn install_places_questions_in_the_catalog() {
        let file = parse_quiz_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        let catalog = QuizCatalog::new();
        let id = install(&file, &catalog).unwrap();

        let quiz = catalog.get_quiz(id).unwrap();
        assert_eq!(quiz.title, "European Capitals");
        assert_eq!(quiz.questions.len(), 2);
    }

    #[test]
    fn install_of_an_invalid_file_creates_nothing() {
        let toml = r#"
[quiz]
title = "Broken"

[[questions]]
title = "Bad"
options = ["a", "b"]
correct = [9]
"#;
        let file = parse_quiz_str(toml, &PathBuf::from("test.toml")).unwrap();
        let catalog = QuizCatalog::new();
        assert!(install(&file, &catalog).is_err());
        assert!(catalog.list_quizzes().is_empty());
    }
}
