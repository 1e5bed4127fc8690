//! Stateless HTTP request builder and response parser for the workout API.
//!
//! # Design
//! `WorkoutClient` holds only the origin and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the round trip in between.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewExercise, NewSet, NewWorkout, Workout};

/// Origin of the workout backend.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5000";

/// Synchronous, stateless client for the workout API.
#[derive(Debug, Clone)]
pub struct WorkoutClient {
    origin: String,
}

impl Default for WorkoutClient {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl WorkoutClient {
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn build_list_workouts(&self) -> HttpRequest {
        self.get("/workout/all")
    }

    /// `GET /workout/exercises/{workout_id}/`. The trailing slash is part of
    /// the endpoint.
    pub fn build_fetch_exercises(&self, workout_id: impl Display) -> HttpRequest {
        self.get(&format!("/workout/exercises/{workout_id}/"))
    }

    pub fn build_fetch_set(
        &self,
        workout_id: impl Display,
        exercise_id: impl Display,
        set_id: impl Display,
    ) -> HttpRequest {
        self.get(&format!(
            "/workout/exercises/sets/{workout_id}/{exercise_id}/{set_id}"
        ))
    }

    pub fn build_create_workout(&self, title: &str) -> Result<HttpRequest, ApiError> {
        let input = NewWorkout {
            title: title.to_string(),
        };
        self.post("/workout", &input)
    }

    pub fn build_create_exercise(
        &self,
        workout_id: impl Display,
        exercise_id: impl Display,
        input: &NewExercise,
    ) -> Result<HttpRequest, ApiError> {
        self.post(&format!("/workout/exercises/{workout_id}/{exercise_id}"), input)
    }

    /// Reps and weight are sent together in a single body.
    pub fn build_create_sets(
        &self,
        workout_id: impl Display,
        exercise_id: impl Display,
        input: &NewSet,
    ) -> Result<HttpRequest, ApiError> {
        self.post(
            &format!("/workout/exercises/sets/{workout_id}/{exercise_id}"),
            input,
        )
    }

    pub fn parse_list_workouts(&self, response: HttpResponse) -> Result<Vec<Workout>, ApiError> {
        decode(response)
    }

    pub fn parse_create_workout(&self, response: HttpResponse) -> Result<Workout, ApiError> {
        decode(response)
    }

    pub fn parse_fetch_exercises(
        &self,
        response: HttpResponse,
    ) -> Result<serde_json::Value, ApiError> {
        decode(response)
    }

    pub fn parse_fetch_set(&self, response: HttpResponse) -> Result<serde_json::Value, ApiError> {
        decode(response)
    }

    pub fn parse_create_exercise(
        &self,
        response: HttpResponse,
    ) -> Result<serde_json::Value, ApiError> {
        decode(response)
    }

    pub fn parse_create_sets(&self, response: HttpResponse) -> Result<serde_json::Value, ApiError> {
        decode(response)
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{path}", self.origin),
            headers: Vec::new(),
            body: None,
        }
    }

    fn post<T: Serialize>(&self, path: &str, input: &T) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{path}", self.origin),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Fail on any non-2xx status, otherwise decode the body as JSON.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(ApiError::RequestFailed {
            status: response.status,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
