use std::time::Duration;

use crate::ai::AiClient;
use crate::error::Result;
use crate::input::InputCollector;
use crate::storage::Storage;

pub mod delete;
pub mod edit;
pub mod entry;
pub mod generate;
pub mod help;
pub mod init;
pub mod render;
pub mod router;
pub mod save;
pub mod show;

pub use router::route;

/// Collaborators a command runs against
pub struct Context<'a> {
    pub storage: &'a Storage,
    pub ai: &'a dyn AiClient,
    pub input: &'a mut dyn InputCollector,
    /// Budget for a single model call
    pub timeout: Duration,
}

/// One user action. The router calls `validate` before anything else, so `execute`
/// may assume its arguments are well-formed.
pub trait Command {
    fn name(&self) -> &'static str;

    /// Check (and for dispatching commands, resolve) the arguments. Must not touch the store.
    fn validate(&mut self) -> Result<()>;

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()>;

    /// Usage text shown by `help`; empty for commands only reachable through another one.
    fn help_manual(&self) -> &'static str;
}
