use super::{Command, Context};
use crate::error::Result;

/// Creates the database. The store is opened (and migrated) before any command runs,
/// so all that is left here is to report on it.
pub struct InitCommand;

impl Command for InitCommand {
    fn name(&self) -> &'static str {
        "init"
    }

    fn validate(&mut self) -> Result<()> {
        Ok(())
    }

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        let version = ctx.storage.schema_version()?;
        let location = ctx
            .storage
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ":memory:".to_string());

        if ctx.storage.migrations_applied() == 0 {
            println!("Database already initialized at {} (schema version {})", location, version);
        } else {
            println!("Initialized database at {} (schema version {})", location, version);
        }
        Ok(())
    }

    fn help_manual(&self) -> &'static str {
        "fitrec exercise init\n    Initialize the database and apply schema migrations"
    }
}
