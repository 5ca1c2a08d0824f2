use clap::Parser;
use std::fs;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod ai;
mod commands;
mod config;
mod error;
mod input;
mod parse;
mod prompt;
mod response;
mod storage;
mod workout;

use ai::OllamaClient;
use commands::Context;
use config::Config;
use error::{FitError, Result};
use input::TerminalInput;
use storage::Storage;

#[derive(Parser)]
#[command(name = "fitrec")]
#[command(about = "Workout log with AI-generated training plans")]
#[command(after_help = "Run 'fitrec exercise help' for the list of commands.")]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Command words, e.g. `exercise last` or `exercise edit date 01-01-25 02-01-25`
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.config.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Arguments are checked before the store is touched
    let command = commands::route(&cli.args)?;

    let db_path = cli.config.db_path();
    let storage = open_store(&db_path, command.name() == "init")?;

    let ai = OllamaClient::new(
        &cli.config.ollama_host,
        &cli.config.ollama_model,
        &cli.config.ollama_prompt,
    );
    let mut input = TerminalInput;

    let result = command.execute(&mut Context {
        storage: &storage,
        ai: &ai,
        input: &mut input,
        timeout: cli.config.timeout(),
    });

    let closed = storage.close();
    result.and(closed)
}

/// Open the database at `db_path`. Only `init` may create it; everything else needs it to exist.
fn open_store(db_path: &Path, create: bool) -> Result<Storage> {
    if !create && !db_path.exists() {
        return Err(FitError::NotInitialized);
    }
    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let storage = Storage::open(db_path)?;
    debug!(path = %db_path.display(), "opened store");
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn command_name(words: &str) -> &'static str {
        let args: Vec<String> = words.split_whitespace().map(str::to_string).collect();
        commands::route(&args).unwrap().name()
    }

    #[test]
    fn test_missing_store_requires_init() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join(".fitrec").join("workouts.db");

        let result = open_store(&db_path, command_name("exercise last") == "init");

        assert!(matches!(result, Err(FitError::NotInitialized)));
        assert!(!db_path.exists());
        assert!(!dir.path().join(".fitrec").exists());
    }

    #[test]
    fn test_init_creates_store_and_directory() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join(".fitrec").join("workouts.db");

        let storage = open_store(&db_path, command_name("exercise init") == "init").unwrap();
        storage.close().unwrap();
        assert!(db_path.exists());

        let reopened = open_store(&db_path, command_name("exercise all") == "init").unwrap();
        assert_eq!(reopened.migrations_applied(), 0);
    }

    #[test]
    fn test_not_initialized_message() {
        assert_eq!(
            FitError::NotInitialized.to_string(),
            "Database not found. Please run 'fitrec exercise init' first to initialize the database."
        );
    }
}
