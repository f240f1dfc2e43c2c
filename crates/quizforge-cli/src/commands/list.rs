//! The `quizforge list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use quizforge_core::parser;

pub fn execute(quiz_dir: PathBuf) -> Result<()> {
    let files = parser::load_quiz_directory(&quiz_dir)?;

    if files.is_empty() {
        println!("No quizzes found in {}", quiz_dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Title", "Questions"]);
    for file in &files {
        table.add_row(vec![file.title.clone(), file.questions.len().to_string()]);
    }

    println!("{table}");
    Ok(())
}
