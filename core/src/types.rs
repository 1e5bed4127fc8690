//! Domain DTOs for the workout API.
//!
//! # Design
//! Only `Workout` has a local representation; exercise and set responses are
//! handed back as raw JSON. Fields the backend adds on top of `id` and
//! `title` (creation date, exercise ids) are ignored on decode.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-assigned workout identifier.
///
/// Opaque to the client: the backend uses integers, but any JSON value
/// decodes, and the id is only ever displayed or compared. A missing id is
/// `Other(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkoutId {
    Int(i64),
    Text(String),
    Other(Value),
}

impl Default for WorkoutId {
    fn default() -> Self {
        WorkoutId::Other(Value::Null)
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutId::Int(id) => write!(f, "{id}"),
            WorkoutId::Text(id) => f.write_str(id),
            WorkoutId::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for WorkoutId {
    fn from(id: i64) -> Self {
        WorkoutId::Int(id)
    }
}

impl From<&str> for WorkoutId {
    fn from(id: &str) -> Self {
        WorkoutId::Text(id.to_string())
    }
}

/// A workout as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workout {
    #[serde(default)]
    pub id: WorkoutId,
    pub title: String,
}

/// Request payload for `POST /workout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkout {
    pub title: String,
}

/// Request payload for creating an exercise under a workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExercise {
    pub exercise_name: String,
}

/// Request payload for recording a set. Both fields travel in one body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSet {
    pub reps: i64,
    pub weight: i64,
}
