//! The `quizforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizforge.toml
    if std::path::Path::new("quizforge.toml").exists() {
        println!("quizforge.toml already exists, skipping.");
    } else {
        std::fs::write("quizforge.toml", SAMPLE_CONFIG)?;
        println!("Created quizforge.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizforge.toml (set an admin password!)");
    println!("  2. Run: quizforge validate --quiz quizzes/example.toml");
    println!("  3. Run: quizforge play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

quiz_dir = "./quizzes"
admin_username = "admin"
admin_password = "${QUIZFORGE_ADMIN_PASSWORD}"

# Store secrets as plain text instead of SHA-256 digests (legacy behavior).
plaintext_secrets = false

# Uncomment to write attempt history as JSON when the play session ends.
# history_export = "./quizforge-history.json"
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
title = "European Capitals"

[[questions]]
title = "What is the capital of France?"
options = ["Paris", "Lyon", "Marseille", "Nice"]
correct = [0]

[[questions]]
title = "Which of these cities are national capitals?"
options = ["Oslo", "Rotterdam", "Madrid", "Munich"]
correct = [0, 2]

[[questions]]
title = "What is the capital of Switzerland?"
options = ["Zurich", "Geneva", "Bern", "Basel"]
correct = [2]
"#;
