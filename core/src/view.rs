//! State behind the single workout screen.
//!
//! # Design
//! The view owns the workout list and the text-input value. It never
//! performs I/O: `mount` and `create` hand back the request to execute, and
//! the matching `apply_*` method folds the response in. Failures are logged
//! and swallowed here, so the host only ever renders.

use crate::client::WorkoutClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Workout, WorkoutId};

/// One rendered list entry, keyed by the workout id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub key: &'a WorkoutId,
    pub title: &'a str,
}

#[derive(Debug, Default)]
pub struct WorkoutView {
    workouts: Vec<Workout>,
    input: String,
    mounted: bool,
}

impl WorkoutView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the initial list request. Only the first call yields one.
    pub fn mount(&mut self, client: &WorkoutClient) -> Option<HttpRequest> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(client.build_list_workouts())
    }

    pub fn apply_list(&mut self, client: &WorkoutClient, response: HttpResponse) {
        match client.parse_list_workouts(response) {
            Ok(workouts) => {
                tracing::debug!(count = workouts.len(), "loaded workouts");
                self.workouts = workouts;
            }
            Err(err) => self.list_failed(err),
        }
    }

    /// Record a list call that never produced a response.
    pub fn list_failed(&self, err: ApiError) {
        tracing::error!(error = %err, "Error fetching workouts");
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Build the create request for the current input. State is untouched
    /// until the response arrives.
    pub fn create(&self, client: &WorkoutClient) -> Result<HttpRequest, ApiError> {
        client.build_create_workout(&self.input)
    }

    pub fn apply_create(&mut self, client: &WorkoutClient, response: HttpResponse) {
        match client.parse_create_workout(response) {
            Ok(workout) => {
                tracing::debug!(id = %workout.id, "created workout");
                self.workouts.push(workout);
                self.input.clear();
            }
            Err(err) => self.create_failed(err),
        }
    }

    /// Record a create call that never produced a response.
    pub fn create_failed(&self, err: ApiError) {
        tracing::error!(error = %err, "Error creating workout");
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.workouts.iter().map(|w| Row {
            key: &w.id,
            title: &w.title,
        })
    }
}
