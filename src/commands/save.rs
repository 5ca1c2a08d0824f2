use tracing::info;

use super::entry::collect_workout;
use super::{Command, Context};
use crate::error::{FitError, Result, ResultExt};
use crate::workout::{local_now, WorkoutStatus};

/// Interactively log today's workout
pub struct SaveExerciseCommand;

impl Command for SaveExerciseCommand {
    fn name(&self) -> &'static str {
        "save exercise"
    }

    fn validate(&mut self) -> Result<()> {
        Ok(())
    }

    fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        let today = local_now().date();
        if ctx.storage.get_workout_by_date(today)?.is_some() {
            return Err(FitError::Conflict(format!(
                "a workout already exists for {}. Only one workout per day is allowed",
                today.format("%Y-%m-%d")
            )));
        }

        let Some(entry) = collect_workout(ctx)? else {
            println!("Workout cancelled");
            return Ok(());
        };

        let workout_id = ctx
            .storage
            .save_workout(&entry.workout_type, WorkoutStatus::Completed, None, &entry.exercises)
            .context("error saving workout")?;

        info!(workout_id, exercises = entry.exercises.len(), "workout saved");
        println!("\nGreat workout!");
        Ok(())
    }

    fn help_manual(&self) -> &'static str {
        "fitrec exercise save\n    Record today's workout interactively"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, FakeAi};
    use crate::input::ScriptedInput;
    use crate::storage::Storage;
    use crate::workout::Exercise;

    #[test]
    fn test_save_persists_completed_workout() {
        let storage = Storage::open_in_memory().unwrap();
        let mut input = ScriptedInput::new(&[
            Some("strength"),
            Some("Bench Press"),
            Some("80"),
            Some("8"),
            Some("3"),
            Some("yes"),
        ]);

        run(&mut SaveExerciseCommand, &storage, &FakeAi::replying(""), &mut input).unwrap();

        let saved = storage.get_last_workout().unwrap().unwrap();
        assert_eq!(saved.workout.workout_type, "strength");
        assert_eq!(saved.workout.status, Some(WorkoutStatus::Completed));
        assert_eq!(saved.workout.workout_date.date(), local_now().date());
        assert_eq!(saved.exercises.len(), 1);
        assert_eq!(saved.exercises[0].name, "Bench Press");
        assert_eq!(saved.exercises[0].weight, 80);
    }

    #[test]
    fn test_save_cancelled_writes_nothing() {
        let storage = Storage::open_in_memory().unwrap();
        let mut input = ScriptedInput::new(&[Some("cardio"), None]);

        run(&mut SaveExerciseCommand, &storage, &FakeAi::replying(""), &mut input).unwrap();

        assert!(storage.get_all_workouts().unwrap().is_empty());
    }

    #[test]
    fn test_save_refuses_second_workout_today() {
        let storage = Storage::open_in_memory().unwrap();
        let id = storage.create_workout("cardio", WorkoutStatus::Completed, None).unwrap();
        storage
            .save_exercises_for_workout(id, &[Exercise::strength("Burpees", 0, 20, 3)])
            .unwrap();

        let mut input = ScriptedInput::default();
        let err = run(&mut SaveExerciseCommand, &storage, &FakeAi::replying(""), &mut input).unwrap_err();

        assert!(matches!(err, FitError::Conflict(_)));
        assert!(input.prompts.is_empty());
        assert_eq!(storage.get_all_workouts().unwrap().len(), 1);
    }
}
