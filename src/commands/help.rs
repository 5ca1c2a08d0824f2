use super::router::all_commands;
use super::{Command, Context};
use crate::error::Result;

pub struct HelpCommand;

impl HelpCommand {
    /// Every registered command's manual, in registry order
    pub fn manual() -> String {
        let mut out = String::from("fitrec - workout log with AI-generated plans\n\nCommands:\n");
        for command in all_commands() {
            let text = command.help_manual();
            if text.is_empty() {
                continue;
            }
            out.push_str("  ");
            out.push_str(&text.replace('\n', "\n  "));
            out.push('\n');
        }
        out
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn validate(&mut self) -> Result<()> {
        Ok(())
    }

    fn execute(&self, _ctx: &mut Context<'_>) -> Result<()> {
        print!("{}", HelpCommand::manual());
        Ok(())
    }

    fn help_manual(&self) -> &'static str {
        "fitrec exercise help\n    Show this help"
    }
}
