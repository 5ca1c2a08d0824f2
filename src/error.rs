use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitError {
    #[error("Database not found. Please run 'fitrec exercise init' first to initialize the database.")]
    NotInitialized,

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Validation(String),

    #[error("{}", unknown_command_message(.namespace.as_deref(), .token))]
    UnknownCommand {
        namespace: Option<String>,
        token: String,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no workout data found. Please save some workouts first")]
    NoData,

    #[error("request to the model timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration {version} failed: {source}")]
    Migration {
        version: usize,
        #[source]
        source: rusqlite::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<FitError>,
    },
}

/// Failures turning model output into a workout.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no valid JSON found in response")]
    NoJson,

    #[error("failed to parse JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("invalid date format: {0}")]
    InvalidDate(#[source] chrono::ParseError),
}

fn unknown_command_message(namespace: Option<&str>, token: &str) -> String {
    match namespace {
        Some(ns) => format!("unknown {} subcommand: {}", ns, token),
        None => format!("unknown command: {}", token),
    }
}

impl FitError {
    /// The innermost error, with any operation context peeled off.
    pub fn root(&self) -> &FitError {
        match self {
            FitError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

pub trait ResultExt<T> {
    fn context(self, context: &str) -> Result<T>;
}

impl<T, E: Into<FitError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: &str) -> Result<T> {
        self.map_err(|e| FitError::Context {
            context: context.to_string(),
            source: Box::new(e.into()),
        })
    }
}

pub type Result<T> = std::result::Result<T, FitError>;
