//! CLI configuration.
//!
//! Loaded from `quizforge.toml` in the working directory or
//! `~/.config/quizforge/config.toml`, with `${VAR}` references resolved
//! from the environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizforge configuration.
///
/// Note: Custom Debug impl masks the admin password to prevent accidental
/// exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Directory of quiz TOML files loaded at startup.
    #[serde(default = "default_quiz_dir")]
    pub quiz_dir: PathBuf,
    /// Username of the admin account seeded at startup.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Secret of the seeded admin account.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    /// Store secrets as plain text instead of digests (legacy behavior).
    #[serde(default)]
    pub plaintext_secrets: bool,
    /// Where `play` writes the session's attempt history on exit, if set.
    #[serde(default)]
    pub history_export: Option<PathBuf>,
}

impl std::fmt::Debug for QuizforgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizforgeConfig")
            .field("quiz_dir", &self.quiz_dir)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"***")
            .field("plaintext_secrets", &self.plaintext_secrets)
            .field("history_export", &self.history_export)
            .finish()
    }
}

fn default_quiz_dir() -> PathBuf {
    PathBuf::from("./quizzes")
}
fn default_admin_username() -> String {
    "admin".to_string()
}
fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            quiz_dir: default_quiz_dir(),
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            plaintext_secrets: false,
            history_export: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment variable overrides: `QUIZFORGE_ADMIN_PASSWORD`,
/// `QUIZFORGE_QUIZ_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizforgeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizforgeConfig::default(),
    };

    // Apply env var overrides
    if let Ok(password) = std::env::var("QUIZFORGE_ADMIN_PASSWORD") {
        config.admin_password = password;
    }
    if let Ok(dir) = std::env::var("QUIZFORGE_QUIZ_DIR") {
        config.quiz_dir = PathBuf::from(dir);
    }

    config.admin_password = resolve_env_vars(&config.admin_password);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}
