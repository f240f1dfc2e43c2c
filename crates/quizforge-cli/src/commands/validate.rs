//! The `quizforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::parser;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let files = if quiz_path.is_dir() {
        parser::load_quiz_directory(&quiz_path)?
    } else {
        vec![parser::parse_quiz_file(&quiz_path)?]
    };

    let mut total_warnings = 0;

    for file in &files {
        println!("Quiz: {} ({} questions)", file.title, file.questions.len());

        let warnings = parser::validate_quiz_file(file);
        for w in &warnings {
            let prefix = w
                .question
                .as_ref()
                .map(|title| format!("  [{title}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quiz files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
