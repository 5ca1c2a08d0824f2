use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use crate::ai::GENERATE_TIMEOUT;

/// Global settings. Every option can also come from the environment.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// SQLite database file [default: ~/.fitrec/workouts.db]
    #[arg(long, env = "FITREC_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Ollama server URL
    #[arg(long, env = "FITREC_OLLAMA_HOST", default_value = "http://localhost:11434", global = true)]
    pub ollama_host: String,

    /// Model used by `generate`
    #[arg(long, env = "FITREC_OLLAMA_MODEL", default_value = "llama3.2", global = true)]
    pub ollama_model: String,

    /// Extra coaching instructions added to every generation prompt
    #[arg(long, env = "FITREC_OLLAMA_PROMPT", default_value = "", global = true)]
    pub ollama_prompt: String,

    /// Give up on the model after this many seconds
    #[arg(long, env = "FITREC_TIMEOUT_SECS", default_value_t = GENERATE_TIMEOUT.as_secs(), global = true)]
    pub timeout_secs: u64,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Config {
    /// `--db` if given, otherwise `~/.fitrec/workouts.db` (or `./.fitrec` without a home directory)
    pub fn db_path(&self) -> PathBuf {
        self.db.clone().unwrap_or_else(default_db_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".fitrec")
        .join("workouts.db")
}
