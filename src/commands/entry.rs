//! Interactive workout entry shared by `save` and `edit <date>`.

use super::render::{describe_exercise, render_exercises};
use super::Context;
use crate::error::{Result, ResultExt};
use crate::input::{options, InputCollector, InputMode};
use crate::parse::{parse_duration, parse_int, parse_weight};
use crate::workout::{Exercise, ExerciseClassifier};

/// What the user typed in, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub workout_type: String,
    pub exercises: Vec<Exercise>,
}

/// Walk the user through a workout. `Ok(None)` means they cancelled somewhere along the way.
pub fn collect_workout(ctx: &mut Context<'_>) -> Result<Option<WorkoutEntry>> {
    let Some(workout_type) =
        ctx.input
            .get_input("Workout type:", &options(&["strength", "cardio"]), InputMode::Choice)
    else {
        return Ok(None);
    };
    let workout_type = workout_type.trim().to_lowercase();

    let names = ctx
        .storage
        .get_distinct_exercise_names()
        .context("error fetching exercise names")?;

    let classifier = ExerciseClassifier::default();
    let mut exercises = Vec::new();

    println!("\nEnter exercise details (Ctrl+C to exit, Esc to cancel):");

    loop {
        let Some(exercise) = collect_exercise(ctx.input, &names, &classifier) else {
            return Ok(None);
        };
        println!("\nRecorded: {}", describe_exercise(&exercise));
        exercises.push(exercise);

        loop {
            let Some(answer) = ctx.input.get_input(
                "Finished?",
                &options(&["no", "yes", "review"]),
                InputMode::Choice,
            ) else {
                return Ok(None);
            };

            match answer.trim().to_lowercase().as_str() {
                "yes" | "y" => return Ok(Some(WorkoutEntry { workout_type, exercises })),
                "no" | "n" => {
                    println!("\n------------ Next Exercise ------------");
                    break;
                }
                "review" | "r" => {
                    println!("\n========== Current Workout ({} exercises) ==========\n", exercises.len());
                    print!("{}", render_exercises(&exercises));
                    println!("\n===================================================");
                }
                _ => println!("Please answer 'yes', 'no', or 'review'"),
            }
        }
    }
}

/// Ask for one exercise. Distance and duration are asked on top of weight/reps/sets when the name calls for them.
fn collect_exercise(
    input: &mut dyn InputCollector,
    known_names: &[String],
    classifier: &ExerciseClassifier,
) -> Option<Exercise> {
    let name = loop {
        let name = input.get_input("Exercise name:", known_names, InputMode::Autocomplete)?;
        let name = name.trim();
        if name.is_empty() {
            println!("Exercise name cannot be empty. Please try again.");
            continue;
        }
        break name.to_string();
    };

    let mut exercise = Exercise::new(&name);

    let weight = input.get_input("Weight:", &[], InputMode::Text)?;
    let reps = input.get_input("Repetitions:", &[], InputMode::Text)?;
    let sets = input.get_input("Number of sets:", &[], InputMode::Text)?;
    exercise.weight = parse_weight(&weight);
    exercise.repetitions = parse_int(&reps);
    exercise.sets = parse_int(&sets);

    if classifier.requires_distance(&name) {
        let distance = input.get_input("Distance (meters):", &[], InputMode::Text)?;
        exercise.distance = parse_int(&distance);
    }

    if classifier.requires_duration(&name) {
        exercise.duration = loop {
            let raw = input.get_input("Duration (minutes):", &[], InputMode::Text)?;
            match parse_duration(&raw) {
                Some(minutes) => break minutes,
                None => println!("Invalid duration, enter minutes (e.g. 1.5)"),
            }
        };
    }

    Some(exercise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GENERATE_TIMEOUT;
    use crate::commands::testing::FakeAi;
    use crate::input::ScriptedInput;
    use crate::storage::Storage;

    fn collect(answers: &[Option<&str>]) -> (Option<WorkoutEntry>, ScriptedInput) {
        let storage = Storage::open_in_memory().unwrap();
        let ai = FakeAi::replying("");
        let mut input = ScriptedInput::new(answers);
        let entry = collect_workout(&mut Context {
            storage: &storage,
            ai: &ai,
            input: &mut input,
            timeout: GENERATE_TIMEOUT,
        })
        .unwrap();
        (entry, input)
    }

    #[test]
    fn test_collect_mixed_exercises() {
        let (entry, input) = collect(&[
            Some("Strength"),
            Some("Squat"),
            Some("100kg"),
            Some("5"),
            Some("5"),
            Some("no"),
            Some("Side plank"),
            Some("bodyweight"),
            Some("-"),
            Some("3"),
            Some("soon"),
            Some("1.5"),
            Some("review"),
            Some("no"),
            Some("Morning run"),
            Some(""),
            Some(""),
            Some("1"),
            Some("5000"),
            Some("yes"),
        ]);

        let entry = entry.unwrap();
        assert_eq!(entry.workout_type, "strength");
        assert_eq!(entry.exercises.len(), 3);
        assert_eq!(entry.exercises[0], Exercise::strength("Squat", 100, 5, 5));

        let plank = &entry.exercises[1];
        assert_eq!((plank.weight, plank.repetitions, plank.sets), (0, 0, 3));
        assert_eq!(plank.duration, 1.5);

        let run = &entry.exercises[2];
        assert_eq!(run.distance, 5000);
        assert_eq!((run.weight, run.repetitions, run.sets), (0, 0, 1));
        assert_eq!(input.remaining(), 0);
        assert_eq!(input.prompts.iter().filter(|p| *p == "Distance (meters):").count(), 1);
    }

    #[test]
    fn test_empty_name_is_asked_again() {
        let (entry, input) = collect(&[
            Some("cardio"),
            Some("   "),
            Some("Burpees"),
            Some(""),
            Some("15"),
            Some("4"),
            Some("y"),
        ]);

        let entry = entry.unwrap();
        assert_eq!(entry.exercises, vec![Exercise::strength("Burpees", 0, 15, 4)]);
        assert_eq!(input.prompts.iter().filter(|p| *p == "Exercise name:").count(), 2);
    }

    #[test]
    fn test_distance_keyword_keeps_strength_fields() {
        let (entry, input) = collect(&[
            Some("strength"),
            Some("Crunches"),
            Some(""),
            Some("20"),
            Some("3"),
            Some("-"),
            Some("yes"),
        ]);

        let crunches = &entry.unwrap().exercises[0];
        assert_eq!((crunches.weight, crunches.repetitions, crunches.sets), (0, 20, 3));
        assert_eq!(crunches.distance, 0);
        assert_eq!(
            input.prompts,
            vec![
                "Workout type:",
                "Exercise name:",
                "Weight:",
                "Repetitions:",
                "Number of sets:",
                "Distance (meters):",
                "Finished?",
            ]
        );
    }

    #[test]
    fn test_cancel_at_type() {
        let (entry, _) = collect(&[None]);
        assert!(entry.is_none());
    }

    #[test]
    fn test_cancel_mid_exercise() {
        let (entry, input) = collect(&[Some("strength"), Some("Squat"), Some("100"), None]);
        assert!(entry.is_none());
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_cancel_at_finished_prompt() {
        let (entry, _) = collect(&[Some("strength"), Some("Row"), Some("60"), Some("8"), Some("3"), None]);
        assert!(entry.is_none());
    }
}
