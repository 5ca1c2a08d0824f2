use tracing::debug;

use super::delete::DeleteCommand;
use super::edit::EditCommand;
use super::generate::GenerateCommand;
use super::help::HelpCommand;
use super::init::InitCommand;
use super::save::SaveExerciseCommand;
use super::show::{ShowAllWorkoutsCommand, ShowLastWorkoutCommand};
use super::Command;
use crate::error::{FitError, Result};

/// Builds a command from the arguments that follow `<namespace> <action>`
pub type CommandFactory = fn(&[String]) -> Box<dyn Command>;

/// namespace -> action -> factory
pub const REGISTRY: &[(&str, &[(&str, CommandFactory)])] = &[(
    "exercise",
    &[
        ("init", init),
        ("save", save),
        ("last", last),
        ("all", all),
        ("edit", edit),
        ("delete", delete),
        ("generate", generate),
        ("help", help),
    ],
)];

fn init(_: &[String]) -> Box<dyn Command> {
    Box::new(InitCommand)
}

fn save(_: &[String]) -> Box<dyn Command> {
    Box::new(SaveExerciseCommand)
}

fn last(_: &[String]) -> Box<dyn Command> {
    Box::new(ShowLastWorkoutCommand)
}

fn all(_: &[String]) -> Box<dyn Command> {
    Box::new(ShowAllWorkoutsCommand)
}

fn edit(args: &[String]) -> Box<dyn Command> {
    Box::new(EditCommand::new(args))
}

fn delete(args: &[String]) -> Box<dyn Command> {
    Box::new(DeleteCommand::new(args))
}

fn generate(args: &[String]) -> Box<dyn Command> {
    Box::new(GenerateCommand::new(args))
}

fn help(_: &[String]) -> Box<dyn Command> {
    Box::new(HelpCommand)
}

/// Resolve `<namespace> <action> [args...]` to a validated command
pub fn route(args: &[String]) -> Result<Box<dyn Command>> {
    let [namespace, action, rest @ ..] = args else {
        return Err(FitError::Usage("usage: fitrec <command> <subcommand>".to_string()));
    };

    let actions = REGISTRY
        .iter()
        .find(|(ns, _)| *ns == namespace.as_str())
        .map(|(_, actions)| *actions)
        .ok_or_else(|| FitError::UnknownCommand {
            namespace: None,
            token: namespace.clone(),
        })?;

    let factory = actions
        .iter()
        .find(|(name, _)| *name == action.as_str())
        .map(|(_, factory)| *factory)
        .ok_or_else(|| FitError::UnknownCommand {
            namespace: Some(namespace.clone()),
            token: action.clone(),
        })?;

    let mut command = factory(rest);
    command.validate()?;
    debug!(command = command.name(), "routed");
    Ok(command)
}

/// One unvalidated instance of every registered command, in registry order
pub fn all_commands() -> Vec<Box<dyn Command>> {
    REGISTRY
        .iter()
        .flat_map(|(_, actions)| actions.iter().map(|(_, factory)| factory(&[])))
        .collect()
}
