//! The `quizforge play` command — the interactive front end.
//!
//! Everything in this file is presentation: menus, prompts, and tables.
//! The core is only ever driven through the platform's named operations,
//! and role gating (which menu a login lands in) happens here.

use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use quizforge_core::identity::{PlainVerifier, Sha256Verifier};
use quizforge_core::model::{Question, QuizId, Role};
use quizforge_core::parser;
use quizforge_core::platform::QuizPlatform;

use crate::config::{load_config_from, QuizforgeConfig};

pub fn execute(quiz_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let platform = build_platform(&config)?;

    let quiz_dir = quiz_dir.unwrap_or_else(|| config.quiz_dir.clone());
    if quiz_dir.is_dir() {
        load_quizzes(&quiz_dir, &platform)?;
    } else {
        tracing::info!("quiz directory {} not found, starting empty", quiz_dir.display());
    }

    let stdin = io::stdin();
    let mut console = Console {
        lines: stdin.lock().lines(),
    };

    println!("Welcome to quizforge!");
    loop {
        println!();
        println!("1) Login");
        println!("2) Register");
        println!("3) Quit");
        let Some(choice) = console.prompt("choice") else {
            break;
        };
        match choice.as_str() {
            "1" => login(&platform, &mut console)?,
            "2" => register(&platform, &mut console),
            "3" | "q" | "quit" => break,
            other => println!("Unknown choice: {other}"),
        }
    }

    if let Some(path) = &config.history_export {
        platform.ledger.save_json(path)?;
        println!("History written to {}", path.display());
    }
    println!("Goodbye!");
    Ok(())
}

fn build_platform(config: &QuizforgeConfig) -> Result<QuizPlatform> {
    let platform = if config.plaintext_secrets {
        QuizPlatform::new(Box::new(PlainVerifier))
    } else {
        QuizPlatform::new(Box::new(Sha256Verifier))
    };
    platform
        .identity
        .seed_admin(&config.admin_username, &config.admin_password)?;
    Ok(platform)
}

fn load_quizzes(dir: &std::path::Path, platform: &QuizPlatform) -> Result<()> {
    for file in parser::load_quiz_directory(dir)? {
        match parser::install(&file, &platform.catalog) {
            Ok(_) => println!("Loaded quiz: {}", file.title),
            Err(e) => tracing::warn!("skipping quiz '{}': {e}", file.title),
        }
    }
    Ok(())
}

/// Line-oriented prompt/read pair over any buffered reader.
struct Console<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> Console<R> {
    /// Prompt and read one trimmed line; `None` on end of input.
    fn prompt(&mut self, text: &str) -> Option<String> {
        print!("{text}> ");
        let _ = io::stdout().flush();
        match self.lines.next() {
            Some(Ok(line)) => Some(line.trim().to_string()),
            _ => None,
        }
    }
}

fn login<R: BufRead>(platform: &QuizPlatform, console: &mut Console<R>) -> Result<()> {
    let Some(username) = console.prompt("username") else {
        return Ok(());
    };
    let Some(password) = console.prompt("password") else {
        return Ok(());
    };
    match platform.identity.authenticate(&username, &password) {
        Ok(Role::Admin) => admin_menu(platform, console),
        Ok(Role::User) => user_menu(platform, console, &username),
        Err(e) => {
            println!("Login failed: {e}.");
            Ok(())
        }
    }
}

fn register<R: BufRead>(platform: &QuizPlatform, console: &mut Console<R>) {
    let Some(username) = console.prompt("username") else {
        return;
    };
    if username.is_empty() {
        println!("Username must not be empty.");
        return;
    }
    let Some(password) = console.prompt("password") else {
        return;
    };
    match platform.identity.register(&username, &password) {
        Ok(()) => println!("Registration successful. You can now log in."),
        Err(e) => println!("Registration failed: {e}."),
    }
}

// ---------------------------------------------------------------------------
// Admin panel
// ---------------------------------------------------------------------------

fn admin_menu<R: BufRead>(platform: &QuizPlatform, console: &mut Console<R>) -> Result<()> {
    loop {
        println!();
        println!("Admin Panel");
        println!("1) Create quiz");
        println!("2) Edit question");
        println!("3) Delete quiz");
        println!("4) List quizzes");
        println!("5) Logout");
        let Some(choice) = console.prompt("choice") else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => create_quiz(platform, console),
            "2" => edit_question(platform, console),
            "3" => delete_quiz(platform, console),
            "4" => print_quiz_listing(platform),
            "5" => return Ok(()),
            other => println!("Unknown choice: {other}"),
        }
    }
}

fn create_quiz<R: BufRead>(platform: &QuizPlatform, console: &mut Console<R>) {
    let Some(title) = console.prompt("quiz title") else {
        return;
    };
    if title.is_empty() {
        println!("Quiz title must not be empty.");
        return;
    }
    let id = platform.catalog.create_quiz(title.clone());
    println!("Quiz created: {title}");

    // Keep collecting questions until the author submits a blank title,
    // mirroring repeated add_question calls.
    loop {
        let Some(question_title) = console.prompt("question title (blank to finish)") else {
            return;
        };
        if question_title.is_empty() {
            break;
        }
        let Some(question) = read_question(console, question_title) else {
            return;
        };
        match platform.catalog.add_question(id, question) {
            Ok(()) => println!("Question added."),
            Err(e) => println!("Could not add question: {e}."),
        }
    }
    println!("Quiz posted.");
}

fn read_question<R: BufRead>(console: &mut Console<R>, title: String) -> Option<Question> {
    let mut options = Vec::new();
    loop {
        let option = console.prompt(&format!("option {} (blank to finish)", options.len() + 1))?;
        if option.is_empty() {
            break;
        }
        options.push(option);
    }
    let correct_line = console.prompt("correct options (comma-separated numbers)")?;
    let correct = match parse_selection(&correct_line, options.len()) {
        Ok(set) => set,
        Err(msg) => {
            println!("{msg}");
            return None;
        }
    };
    Some(Question::new(title, options, correct))
}

fn edit_question<R: BufRead>(platform: &QuizPlatform, console: &mut Console<R>) {
    let Some(id) = pick_quiz(platform, console) else {
        return;
    };
    let quiz = match platform.catalog.get_quiz(id) {
        Ok(quiz) => quiz,
        Err(e) => {
            println!("{e}.");
            return;
        }
    };
    if quiz.questions.is_empty() {
        println!("This quiz has no questions.");
        return;
    }
    for (i, question) in quiz.questions.iter().enumerate() {
        println!("{}) {}", i + 1, question.title);
    }
    let Some(line) = console.prompt("question number") else {
        return;
    };
    let Some(index) = parse_pick(&line, quiz.questions.len()) else {
        println!("Invalid question number: {line}");
        return;
    };

    let Some(title) = console.prompt("new question title") else {
        return;
    };
    let Some(replacement) = read_question(console, title) else {
        return;
    };
    match platform.catalog.update_question(
        id,
        index,
        replacement.title,
        replacement.options,
        replacement.correct_answers,
    ) {
        Ok(()) => println!("Question updated."),
        Err(e) => println!("Could not update question: {e}."),
    }
}

fn delete_quiz<R: BufRead>(platform: &QuizPlatform, console: &mut Console<R>) {
    let Some(id) = pick_quiz(platform, console) else {
        return;
    };
    match platform.catalog.delete_quiz(id) {
        Ok(()) => println!("Quiz deleted."),
        Err(e) => println!("{e}."),
    }
}

fn print_quiz_listing(platform: &QuizPlatform) {
    let listing = platform.catalog.list_quizzes();
    if listing.is_empty() {
        println!("No quizzes available.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["#", "Title", "Questions"]);
    for (i, summary) in listing.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            summary.title.clone(),
            summary.question_count.to_string(),
        ]);
    }
    println!("\n{table}");
}

// ---------------------------------------------------------------------------
// User panel
// ---------------------------------------------------------------------------

fn user_menu<R: BufRead>(
    platform: &QuizPlatform,
    console: &mut Console<R>,
    username: &str,
) -> Result<()> {
    loop {
        println!();
        println!("User Panel ({username})");
        println!("1) Take quiz");
        println!("2) View history");
        println!("3) Logout");
        let Some(choice) = console.prompt("choice") else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => take_quiz(platform, console, username)?,
            "2" => print_history(platform, username),
            "3" => return Ok(()),
            other => println!("Unknown choice: {other}"),
        }
    }
}

fn take_quiz<R: BufRead>(
    platform: &QuizPlatform,
    console: &mut Console<R>,
    username: &str,
) -> Result<()> {
    let Some(id) = pick_quiz(platform, console) else {
        return Ok(());
    };
    let mut session = match platform.start_session(id) {
        Ok(session) => session,
        Err(e) => {
            println!("{e}.");
            return Ok(());
        }
    };

    println!("\nTaking quiz: {}", session.quiz_title());
    loop {
        let (title, options) = match session.current_question() {
            Some(question) => (question.title.clone(), question.options.clone()),
            None => break,
        };
        let (answered, total) = session.progress();
        println!("\nQuestion {} of {}: {}", answered + 1, total, title);
        for (i, option) in options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }

        let Some(line) = console.prompt("your answer (comma-separated numbers, blank for none)")
        else {
            // Abandoned mid-quiz: drop the session without recording.
            return Ok(());
        };
        let selected = match parse_selection(&line, options.len()) {
            Ok(set) => set,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        let feedback = match session.submit_answer(&selected) {
            Ok(feedback) => feedback,
            Err(e) => {
                println!("{e}.");
                break;
            }
        };
        if feedback.correct {
            println!("Correct!");
        } else {
            println!(
                "Incorrect. The correct answer(s) were: {}",
                format_answers(&feedback.correct_answers)
            );
        }
    }

    let result = session.result()?;
    println!("\nQuiz completed!");
    println!("Your score: {} out of {}", result.score, result.total);
    println!("Percentage: {:.2}%", result.percent);
    platform.record_result(username, &session)?;
    Ok(())
}

fn print_history(platform: &QuizPlatform, username: &str) {
    let history = platform.ledger.history(username);
    if history.is_empty() {
        println!("You haven't taken any quizzes yet.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Quiz", "Score", "Percentage", "Date"]);
    for attempt in &history {
        table.add_row(vec![
            attempt.quiz_title.clone(),
            format!("{}/{}", attempt.score, attempt.total_questions),
            format!("{:.2}%", attempt.percent()),
            attempt.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }
    println!("\nQuiz history for {username}:\n{table}");
}

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

fn pick_quiz<R: BufRead>(platform: &QuizPlatform, console: &mut Console<R>) -> Option<QuizId> {
    let listing = platform.catalog.list_quizzes();
    if listing.is_empty() {
        println!("No quizzes available.");
        return None;
    }
    for (i, summary) in listing.iter().enumerate() {
        println!(
            "{}) {} ({} questions)",
            i + 1,
            summary.title,
            summary.question_count
        );
    }
    let line = console.prompt("quiz number")?;
    match parse_pick(&line, listing.len()) {
        Some(index) => Some(listing[index].id),
        None => {
            println!("Invalid quiz number: {line}");
            None
        }
    }
}

/// Parse a 1-based menu pick into a 0-based index.
fn parse_pick(input: &str, count: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    if n >= 1 && n <= count {
        Some(n - 1)
    } else {
        None
    }
}

/// Parse a comma-separated list of 1-based option numbers into a 0-based
/// selection set. A blank line is an empty selection.
fn parse_selection(input: &str, option_count: usize) -> Result<BTreeSet<usize>, String> {
    let mut selected = BTreeSet::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let n: usize = part
            .parse()
            .map_err(|_| format!("Not a number: {part}"))?;
        if n < 1 || n > option_count {
            return Err(format!("Option {n} is out of range (1-{option_count})"));
        }
        selected.insert(n - 1);
    }
    Ok(selected)
}

fn format_answers(correct: &BTreeSet<usize>) -> String {
    correct
        .iter()
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_selection_accepts_blank_and_lists() {
        assert_eq!(parse_selection("", 4).unwrap(), BTreeSet::new());
        assert_eq!(
            parse_selection("1, 3", 4).unwrap(),
            BTreeSet::from([0, 2])
        );
        assert_eq!(parse_selection("2,2", 4).unwrap(), BTreeSet::from([1]));
    }

    #[test]
    fn parse_selection_rejects_garbage_and_out_of_range() {
        assert!(parse_selection("zero", 4).is_err());
        assert!(parse_selection("0", 4).is_err());
        assert!(parse_selection("5", 4).is_err());
    }

    #[test]
    fn parse_pick_is_one_based() {
        assert_eq!(parse_pick("1", 3), Some(0));
        assert_eq!(parse_pick("3", 3), Some(2));
        assert_eq!(parse_pick("4", 3), None);
        assert_eq!(parse_pick("x", 3), None);
    }

    #[test]
    fn format_answers_is_one_based() {
        assert_eq!(format_answers(&BTreeSet::from([0, 2])), "1, 3");
        assert_eq!(format_answers(&BTreeSet::new()), "");
    }
}
