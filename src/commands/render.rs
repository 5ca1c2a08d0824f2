use crate::workout::{Exercise, WorkoutWithExercises};

const HEADERS: [&str; 6] = ["Exercise", "Weight", "Reps", "Sets", "Duration", "Distance"];

/// Header lines plus the exercise table
pub fn render_workout(entry: &WorkoutWithExercises) -> String {
    let workout = &entry.workout;
    let status = workout.status.map_or("-", |s| s.as_str());

    format!(
        "Workout Type: {}\nDate: {}\nStatus: {}\n\n{}",
        workout.workout_type,
        workout.workout_date.format("%Y-%m-%d %H:%M:%S"),
        status,
        render_exercises(&entry.exercises)
    )
}

/// Aligned table of exercises, `-` for anything not recorded
pub fn render_exercises(exercises: &[Exercise]) -> String {
    if exercises.is_empty() {
        return "No exercises to display\n".to_string();
    }

    let mut rows: Vec<Vec<String>> = vec![
        HEADERS.iter().map(|h| h.to_string()).collect(),
        HEADERS.iter().map(|h| "-".repeat(h.len())).collect(),
    ];
    rows.extend(exercises.iter().map(exercise_row));

    let widths: Vec<usize> = (0..HEADERS.len())
        .map(|col| rows.iter().map(|r| r[col].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// One-line summary printed after an exercise is entered
pub fn describe_exercise(ex: &Exercise) -> String {
    if ex.distance > 0 && ex.weight == 0 && ex.repetitions == 0 && ex.sets == 0 {
        return format!("{} - {} meters", ex.name, ex.distance);
    }

    let mut line = format!(
        "{} - {} kg weight, {} reps, {} sets",
        ex.name, ex.weight, ex.repetitions, ex.sets
    );
    if ex.duration > 0.0 {
        line.push_str(&format!(", {:.2} minutes", ex.duration));
    }
    if ex.distance > 0 {
        line.push_str(&format!(", {} meters", ex.distance));
    }
    line
}

fn exercise_row(ex: &Exercise) -> Vec<String> {
    vec![
        ex.name.clone(),
        or_dash(ex.weight, |w| format!("{} kg", w)),
        or_dash(ex.repetitions, |r| r.to_string()),
        or_dash(ex.sets, |s| s.to_string()),
        if ex.duration > 0.0 {
            format!("{:.2} min", ex.duration)
        } else {
            "-".to_string()
        },
        or_dash(ex.distance, |d| format!("{} m", d)),
    ]
}

fn or_dash(value: i64, show: impl Fn(i64) -> String) -> String {
    if value > 0 {
        show(value)
    } else {
        "-".to_string()
    }
}
