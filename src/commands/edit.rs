use chrono::NaiveDate;
use tracing::debug;

use super::entry::collect_workout;
use super::render::render_workout;
use super::{Command, Context};
use crate::error::{FitError, Result, ResultExt};
use crate::parse::parse_eu_date;
use crate::workout::WorkoutStatus;

const EDIT_USAGE: &str =
    "usage: fitrec exercise edit <DD-MM-YY|date <old_date> <new_date>|last status <planned|completed>>";
const STATUS_USAGE: &str = "usage: fitrec exercise edit last status <planned|completed>";
const DATE_USAGE: &str = "usage: fitrec exercise edit date <DD-MM-YY> <DD-MM-YY>";

/// `edit ...`: picks the concrete edit during validation
pub struct EditCommand {
    args: Vec<String>,
    inner: Option<Box<dyn Command>>,
}

impl EditCommand {
    pub fn new(args: &[String]) -> Self {
        EditCommand {
            args: args.to_vec(),
            inner: None,
        }
    }

    fn resolve(&self) -> Result<Box<dyn Command>> {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["last", rest @ ..] => match rest {
                ["status", status] => Ok(Box::new(EditWorkoutStatusCommand::new(status))),
                _ => Err(FitError::Usage(STATUS_USAGE.to_string())),
            },
            ["date", rest @ ..] => match rest {
                [old, new] => Ok(Box::new(EditWorkoutDateCommand::new(old, new))),
                _ => Err(FitError::Usage(DATE_USAGE.to_string())),
            },
            [date] => Ok(Box::new(EditWorkoutContentCommand::new(date))),
            _ => Err(FitError::Usage(EDIT_USAGE.to_string())),
        }
    }
}

impl Command for EditCommand {
    fn name(&self) -> &'static str {
        "edit"
    }

    fn validate(&mut self) -> Result<()> {
        let mut inner = self.resolve()?;
        inner.validate()?;
        debug!(edit = inner.name(), "resolved edit");
        self.inner = Some(inner);
        Ok(())
    }

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        self.inner
            .as_ref()
            .ok_or_else(|| FitError::Usage(EDIT_USAGE.to_string()))?
            .execute(ctx)
    }

    fn help_manual(&self) -> &'static str {
        "fitrec exercise edit <DD-MM-YY>\n    Re-enter the exercises of the workout on that date\n\
         fitrec exercise edit date <DD-MM-YY> <DD-MM-YY>\n    Move a workout to another day\n\
         fitrec exercise edit last status <planned|completed>\n    Change the status of the most recent workout"
    }
}

fn date_arg(raw: &str, which: &str) -> Result<NaiveDate> {
    parse_eu_date(raw).map_err(|e| {
        FitError::Validation(format!(
            "invalid {}date format. Use DD-MM-YY (e.g., 31-12-25): {}",
            which, e
        ))
    })
}

fn not_validated() -> FitError {
    FitError::Usage(EDIT_USAGE.to_string())
}

/// Replace the type and exercises of the workout on a given day
pub struct EditWorkoutContentCommand {
    raw_date: String,
    date: Option<NaiveDate>,
}

impl EditWorkoutContentCommand {
    pub fn new(raw_date: &str) -> Self {
        EditWorkoutContentCommand {
            raw_date: raw_date.to_string(),
            date: None,
        }
    }
}

impl Command for EditWorkoutContentCommand {
    fn name(&self) -> &'static str {
        "edit workout"
    }

    fn validate(&mut self) -> Result<()> {
        self.date = Some(date_arg(&self.raw_date, "")?);
        Ok(())
    }

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        let date = self.date.ok_or_else(not_validated)?;

        let Some(existing) = ctx.storage.get_workout_by_date(date).context("error fetching workout")? else {
            println!("No workout found for {}", date.format("%Y-%m-%d"));
            return Ok(());
        };

        println!("Current workout:\n");
        print!("{}", render_workout(&existing));
        println!("\nEnter the new workout:");

        let Some(entry) = collect_workout(ctx)? else {
            println!("Edit cancelled");
            return Ok(());
        };

        ctx.storage
            .update_workout(existing.workout.id, &entry.workout_type, &entry.exercises)
            .context("error updating workout")?;
        println!("Workout for {} updated", date.format("%Y-%m-%d"));
        Ok(())
    }

    fn help_manual(&self) -> &'static str {
        ""
    }
}

/// Move a workout from one day to another
pub struct EditWorkoutDateCommand {
    raw_old: String,
    raw_new: String,
    dates: Option<(NaiveDate, NaiveDate)>,
}

impl EditWorkoutDateCommand {
    pub fn new(raw_old: &str, raw_new: &str) -> Self {
        EditWorkoutDateCommand {
            raw_old: raw_old.to_string(),
            raw_new: raw_new.to_string(),
            dates: None,
        }
    }
}

impl Command for EditWorkoutDateCommand {
    fn name(&self) -> &'static str {
        "edit workout date"
    }

    fn validate(&mut self) -> Result<()> {
        let old = date_arg(&self.raw_old, "old ")?;
        let new = date_arg(&self.raw_new, "new ")?;
        self.dates = Some((old, new));
        Ok(())
    }

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        let (old, new) = self.dates.ok_or_else(not_validated)?;

        ctx.storage
            .update_workout_date(old, new)
            .context("error updating workout date")?;
        println!(
            "Workout moved from {} to {}",
            old.format("%Y-%m-%d"),
            new.format("%Y-%m-%d")
        );
        Ok(())
    }

    fn help_manual(&self) -> &'static str {
        ""
    }
}

/// Mark the most recent workout planned or completed
pub struct EditWorkoutStatusCommand {
    raw_status: String,
    status: Option<WorkoutStatus>,
}

impl EditWorkoutStatusCommand {
    pub fn new(raw_status: &str) -> Self {
        EditWorkoutStatusCommand {
            raw_status: raw_status.to_lowercase(),
            status: None,
        }
    }
}

impl Command for EditWorkoutStatusCommand {
    fn name(&self) -> &'static str {
        "edit workout status"
    }

    fn validate(&mut self) -> Result<()> {
        self.status = Some(self.raw_status.parse()?);
        Ok(())
    }

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        let status = self.status.ok_or_else(not_validated)?;

        ctx.storage
            .update_last_workout_status(status)
            .context("error updating workout status")?;
        println!("Last workout marked as '{}'", status);
        Ok(())
    }

    fn help_manual(&self) -> &'static str {
        ""
    }
}
