use chrono::{DateTime, Local, NaiveDateTime, Timelike, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FitError;

/// Workout status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    Planned,
    Completed,
}

impl WorkoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutStatus::Planned => "planned",
            WorkoutStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutStatus {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(WorkoutStatus::Planned),
            "completed" => Ok(WorkoutStatus::Completed),
            other => Err(FitError::Validation(format!(
                "status must be 'planned' or 'completed', got: {}",
                other
            ))),
        }
    }
}

impl ToSql for WorkoutStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for WorkoutStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: FitError| FromSqlError::Other(Box::new(e)))
    }
}

/// A single training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub workout_type: String,
    pub workout_date: NaiveDateTime,
    /// Unset only for workouts that came from the model and were not persisted yet.
    pub status: Option<WorkoutStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workout {
    /// Unsaved workout; `id` stays 0 until the store assigns one.
    pub fn new(workout_type: &str, workout_date: NaiveDateTime, status: Option<WorkoutStatus>) -> Self {
        let now = Utc::now();
        Workout {
            id: 0,
            workout_type: workout_type.to_string(),
            workout_date,
            status,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    /// kg, 0 for bodyweight
    pub weight: i64,
    pub repetitions: i64,
    pub sets: i64,
    /// minutes
    pub duration: f64,
    /// meters
    pub distance: i64,
    pub workout_id: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Exercise {
    pub fn new(name: &str) -> Self {
        Exercise {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn strength(name: &str, weight: i64, repetitions: i64, sets: i64) -> Self {
        Exercise {
            weight,
            repetitions,
            sets,
            ..Exercise::new(name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutWithExercises {
    pub workout: Workout,
    pub exercises: Vec<Exercise>,
}

/// Exercise-name substrings that need a duration.
pub const DURATION_REQUIRED_KEYWORDS: &[&str] = &["plank"];

/// Exercise-name substrings that are tracked by distance instead of weight/reps/sets.
pub const DISTANCE_REQUIRED_KEYWORDS: &[&str] = &["run", "walk", "cycling", "cycle"];

/// Decides which measurements an exercise needs from its name.
#[derive(Debug, Clone, Copy)]
pub struct ExerciseClassifier {
    duration_keywords: &'static [&'static str],
    distance_keywords: &'static [&'static str],
}

impl ExerciseClassifier {
    pub const fn new(
        duration_keywords: &'static [&'static str],
        distance_keywords: &'static [&'static str],
    ) -> Self {
        ExerciseClassifier { duration_keywords, distance_keywords }
    }

    pub fn requires_duration(&self, name: &str) -> bool {
        matches_any(name, self.duration_keywords)
    }

    pub fn requires_distance(&self, name: &str) -> bool {
        matches_any(name, self.distance_keywords)
    }
}

impl Default for ExerciseClassifier {
    fn default() -> Self {
        ExerciseClassifier::new(DURATION_REQUIRED_KEYWORDS, DISTANCE_REQUIRED_KEYWORDS)
    }
}

fn matches_any(name: &str, keywords: &[&str]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Current local time at second precision, the resolution workout dates are stored with.
pub fn local_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [WorkoutStatus::Planned, WorkoutStatus::Completed] {
            let recovered: WorkoutStatus = status.as_str().parse().unwrap();
            assert_eq!(recovered, status);
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        let err = "done".parse::<WorkoutStatus>().unwrap_err();
        assert_eq!(err.to_string(), "status must be 'planned' or 'completed', got: done");
    }

    #[test]
    fn test_classifier_is_case_insensitive() {
        let classifier = ExerciseClassifier::default();

        assert!(classifier.requires_duration("Side Plank"));
        assert!(classifier.requires_distance("Morning RUN"));
        assert!(classifier.requires_distance("Cycling"));
        assert!(!classifier.requires_distance("Bench Press"));
        assert!(!classifier.requires_duration("Deadlifts"));
    }

    #[test]
    fn test_classifier_uses_injected_keywords() {
        const ROW: &[&str] = &["row"];
        let classifier = ExerciseClassifier::new(&[], ROW);

        assert!(classifier.requires_distance("Rowing machine"));
        assert!(!classifier.requires_distance("Running"));
        assert!(!classifier.requires_duration("Plank"));
    }

    #[test]
    fn test_new_exercise_has_zeroed_measurements() {
        let ex = Exercise::new("Push-ups");
        assert_eq!(ex.name, "Push-ups");
        assert_eq!(ex.weight, 0);
        assert_eq!(ex.duration, 0.0);
        assert_eq!(ex.id, 0);
    }
}
