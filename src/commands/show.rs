use super::render::render_workout;
use super::{Command, Context};
use crate::error::{Result, ResultExt};

const RULE: &str = "------------------------------------------------------------";

pub struct ShowLastWorkoutCommand;

impl Command for ShowLastWorkoutCommand {
    fn name(&self) -> &'static str {
        "show last workout"
    }

    fn validate(&mut self) -> Result<()> {
        Ok(())
    }

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        match ctx.storage.get_last_workout().context("error fetching last workout")? {
            Some(workout) => print!("{}", render_workout(&workout)),
            None => println!("No workouts found"),
        }
        Ok(())
    }

    fn help_manual(&self) -> &'static str {
        "fitrec exercise last\n    Show the most recent workout"
    }
}

pub struct ShowAllWorkoutsCommand;

impl Command for ShowAllWorkoutsCommand {
    fn name(&self) -> &'static str {
        "show all workouts"
    }

    fn validate(&mut self) -> Result<()> {
        Ok(())
    }

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        let workouts = ctx.storage.get_all_workouts().context("error fetching workouts")?;
        if workouts.is_empty() {
            println!("No workouts found");
            return Ok(());
        }

        for (i, workout) in workouts.iter().enumerate() {
            if i > 0 {
                println!("{}", RULE);
            }
            print!("{}", render_workout(workout));
        }
        Ok(())
    }

    fn help_manual(&self) -> &'static str {
        "fitrec exercise all\n    Show every workout, newest first"
    }
}
