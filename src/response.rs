//! Turns free-form model output into a [`WorkoutWithExercises`].
//!
//! Models are sloppy about types: a weight may arrive as `85`, `"85"`, `"-"`, `""` or `null`.
//! Every numeric field is read as a [`LooseValue`] and coerced explicitly.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::error::ParseError;
use crate::parse::parse_weight;
use crate::workout::{Exercise, Workout, WorkoutWithExercises};

/// A JSON field that may be a number, a string, or anything else.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl LooseValue {
    fn number(&self) -> Option<f64> {
        match self {
            LooseValue::Number(n) => Some(*n),
            LooseValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() || s == "-" {
                    return None;
                }
                s.parse::<i64>()
                    .map(|i| i as f64)
                    .or_else(|_| s.parse::<f64>())
                    .ok()
            }
            LooseValue::Other(_) => None,
        }
    }
}

/// Whole-number target (weight, reps, sets, distance). Absent, placeholder and junk all give 0.
pub fn coerce_int(value: Option<&LooseValue>) -> i64 {
    value
        .and_then(LooseValue::number)
        .filter(|n| n.is_finite())
        .map(|n| n as i64)
        .unwrap_or(0)
}

/// Weight in kg. Text goes through the same rules as typed input, so "60kg" and "bodyweight" work.
pub fn coerce_weight(value: Option<&LooseValue>) -> i64 {
    match value {
        Some(LooseValue::Text(s)) => parse_weight(s),
        other => coerce_int(other),
    }
}

/// Fractional target (duration in minutes).
pub fn coerce_float(value: Option<&LooseValue>) -> f64 {
    value
        .and_then(LooseValue::number)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Deserialize)]
struct RawWorkout {
    #[serde(default)]
    date: String,
    #[serde(default, rename = "type")]
    workout_type: String,
    #[serde(default)]
    exercises: Vec<RawExercise>,
}

#[derive(Debug, Deserialize)]
struct RawExercise {
    #[serde(default)]
    name: String,
    #[serde(default)]
    weight: Option<LooseValue>,
    #[serde(default)]
    reps: Option<LooseValue>,
    #[serde(default)]
    sets: Option<LooseValue>,
    #[serde(default)]
    duration: Option<LooseValue>,
    #[serde(default)]
    distance: Option<LooseValue>,
}

impl From<RawExercise> for Exercise {
    fn from(raw: RawExercise) -> Self {
        Exercise {
            weight: coerce_weight(raw.weight.as_ref()),
            repetitions: coerce_int(raw.reps.as_ref()),
            sets: coerce_int(raw.sets.as_ref()),
            duration: coerce_float(raw.duration.as_ref()),
            distance: coerce_int(raw.distance.as_ref()),
            ..Exercise::new(&raw.name)
        }
    }
}

/// Slice from the first `{` to the last `}`, inclusive.
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Parse a model response. The returned workout has no status; the caller decides it.
pub fn parse_workout_response(text: &str) -> Result<WorkoutWithExercises, ParseError> {
    let json = extract_json(text).ok_or(ParseError::NoJson)?;
    let raw: RawWorkout = serde_json::from_str(json).map_err(ParseError::Json)?;

    let date = NaiveDate::parse_from_str(raw.date.trim(), "%Y-%m-%d").map_err(ParseError::InvalidDate)?;

    Ok(WorkoutWithExercises {
        workout: Workout::new(&raw.workout_type, date.and_time(NaiveTime::MIN), None),
        exercises: raw.exercises.into_iter().map(Exercise::from).collect(),
    })
}
