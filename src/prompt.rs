use std::fmt::Write;

use crate::workout::{Exercise, WorkoutWithExercises};

const PREAMBLE: &str =
    "You are a fitness coach analyzing workout data. Generate only next(1) workout based on provided data.";

const OUTPUT_FORMAT: &str = r#"
The output of the next workout provide in json format. {
    "type": "strength",
    "date": "2006-01-02",
    "exercises": [
        {
            "name": "Exercise Name:str",
            "weight": "Weight:int",
            "reps": "Reps:int",
            "sets": "Sets:int",
            "duration": "Duration:int",
            "distance": "Distance in meters:int"
        }
    ]
}
"#;

/// Build the generation prompt: instructions, operator suffix, optional count, then history.
pub fn build_prompt(workouts: &[WorkoutWithExercises], exercise_count: Option<u8>, custom_prompt: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(PREAMBLE);
    if !custom_prompt.is_empty() {
        prompt.push(' ');
        prompt.push_str(custom_prompt);
    }
    prompt.push('\n');

    if let Some(count) = exercise_count {
        let _ = writeln!(prompt, "Generate exactly {} exercises for this workout.", count);
    }

    prompt.push_str(OUTPUT_FORMAT);
    prompt.push_str(&format_history(workouts));
    prompt
}

/// Compact history, one `Name|Weight|Reps×Sets|Duration` line per exercise, plus `|Distance` when recorded.
pub fn format_history(workouts: &[WorkoutWithExercises]) -> String {
    let mut out = String::from("Workout History\n");
    out.push_str("Format: Exercise Name|Weight|Reps×Sets|Duration[|Distance]\n");
    out.push_str("All durations in minutes. Empty fields indicated by '-'.\n\n");

    for entry in workouts {
        let _ = writeln!(
            out,
            "## {} ({})",
            entry.workout.workout_date.format("%Y-%m-%d"),
            entry.workout.workout_type
        );
        for exercise in &entry.exercises {
            out.push_str(&history_line(exercise));
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

fn history_line(ex: &Exercise) -> String {
    let weight = positive(ex.weight).map_or("-".to_string(), |w| format!("{} kg", w));

    let volume = if ex.repetitions > 0 || ex.sets > 0 {
        format!(
            "{}×{}",
            positive(ex.repetitions).map_or("-".to_string(), |r| r.to_string()),
            positive(ex.sets).map_or("-".to_string(), |s| s.to_string()),
        )
    } else {
        "-".to_string()
    };

    let duration = if ex.duration > 0.0 {
        format!("{:.1}min", ex.duration)
    } else {
        "-".to_string()
    };

    let mut line = format!("{}|{}|{}|{}", ex.name, weight, volume, duration);
    if ex.distance > 0 {
        let _ = write!(line, "|{}m", ex.distance);
    }
    line
}

fn positive(n: i64) -> Option<i64> {
    (n > 0).then_some(n)
}
