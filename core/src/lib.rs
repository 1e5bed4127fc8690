//! Client core for the workout tracker.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the state of the
//! single workout screen on top of that.
//!
//! # Design
//! - `WorkoutClient` is stateless; it holds only the origin.
//! - Every operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - `WorkoutView` drives the client and swallows failures after logging
//!   them; nothing it does can fail the caller.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use client::{WorkoutClient, DEFAULT_ORIGIN};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{NewExercise, NewSet, NewWorkout, Workout, WorkoutId};
pub use view::{Row, WorkoutView};
