use chrono::NaiveDate;

use super::{Command, Context};
use crate::error::{FitError, Result, ResultExt};
use crate::parse::parse_eu_date;

const DELETE_USAGE: &str = "usage: fitrec exercise delete <last|date <date>>";
const DATE_USAGE: &str = "usage: fitrec exercise delete date <DD-MM-YY>";

/// `delete last` or `delete date <DD-MM-YY>`
pub struct DeleteCommand {
    args: Vec<String>,
    inner: Option<Box<dyn Command>>,
}

impl DeleteCommand {
    pub fn new(args: &[String]) -> Self {
        DeleteCommand {
            args: args.to_vec(),
            inner: None,
        }
    }
}

impl Command for DeleteCommand {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn validate(&mut self) -> Result<()> {
        let mut inner: Box<dyn Command> = match self.args.first().map(String::as_str) {
            None => return Err(FitError::Usage(DELETE_USAGE.to_string())),
            Some("last") => Box::new(DeleteLastCommand),
            Some("date") => match &self.args[1..] {
                [date] => Box::new(DeleteByDateCommand::new(date)),
                _ => return Err(FitError::Usage(DATE_USAGE.to_string())),
            },
            Some(other) => {
                return Err(FitError::Usage(format!(
                    "unknown delete target: {}. Use 'last' or 'date <DD-MM-YY>'",
                    other
                )))
            }
        };

        inner.validate()?;
        self.inner = Some(inner);
        Ok(())
    }

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        self.inner
            .as_ref()
            .ok_or_else(|| FitError::Usage(DELETE_USAGE.to_string()))?
            .execute(ctx)
    }

    fn help_manual(&self) -> &'static str {
        "fitrec exercise delete last\n    Delete the most recent workout\n\
         fitrec exercise delete date <DD-MM-YY>\n    Delete the workout on that date"
    }
}

pub struct DeleteLastCommand;

impl Command for DeleteLastCommand {
    fn name(&self) -> &'static str {
        "delete last"
    }

    fn validate(&mut self) -> Result<()> {
        Ok(())
    }

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        match ctx.storage.delete_last_workout().context("error deleting workout")? {
            Some(workout) => println!(
                "Workout for {} was deleted",
                workout.workout_date.format("%Y-%m-%d")
            ),
            None => println!("No workouts to delete"),
        }
        Ok(())
    }

    fn help_manual(&self) -> &'static str {
        ""
    }
}

pub struct DeleteByDateCommand {
    raw_date: String,
    date: Option<NaiveDate>,
}

impl DeleteByDateCommand {
    pub fn new(raw_date: &str) -> Self {
        DeleteByDateCommand {
            raw_date: raw_date.to_string(),
            date: None,
        }
    }
}

impl Command for DeleteByDateCommand {
    fn name(&self) -> &'static str {
        "delete by date"
    }

    fn validate(&mut self) -> Result<()> {
        let date = parse_eu_date(&self.raw_date).map_err(|e| {
            FitError::Validation(format!(
                "invalid date format. Use DD-MM-YY (e.g., 31-12-25): {}",
                e
            ))
        })?;
        self.date = Some(date);
        Ok(())
    }

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        let date = self
            .date
            .ok_or_else(|| FitError::Usage(DATE_USAGE.to_string()))?;

        if ctx.storage.delete_workout_by_date(date).context("error deleting workout")? {
            println!("Workout for {} was deleted", date.format("%Y-%m-%d"));
        } else {
            println!("No workout found for {}", date.format("%Y-%m-%d"));
        }
        Ok(())
    }

    fn help_manual(&self) -> &'static str {
        ""
    }
}
