//! Terminal front end for the workout tracker.
//!
//! # Overview
//! The host half of the host-does-IO split: `Transport` performs the HTTP
//! round trips that `workout_core` describes, and `Session` feeds user
//! events and responses into a `WorkoutView` and redraws it.

pub mod session;
pub mod transport;

pub use session::{Command, Session};
pub use transport::Transport;
