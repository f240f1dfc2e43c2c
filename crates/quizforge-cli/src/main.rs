//! quizforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizforge", version, about = "Interactive quiz platform")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive quiz session
    Play {
        /// Directory of quiz TOML files loaded into the catalog at startup
        #[arg(long)]
        quiz_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz TOML files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// List quizzes found in a directory
    List {
        /// Directory of quiz TOML files
        #[arg(long, default_value = "./quizzes")]
        quiz_dir: PathBuf,
    },

    /// Create starter config and example quiz
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { quiz_dir, config } => commands::play::execute(quiz_dir, config),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::List { quiz_dir } => commands::list::execute(quiz_dir),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
