//! Error types for the workout API client.
//!
//! # Design
//! The view treats every variant the same way ("the request failed"), but
//! keeping them apart tells the log reader whether the server refused the
//! call, the network dropped it, or the payload was malformed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("Request failed with status {status}")]
    RequestFailed { status: u16 },

    /// The round trip itself failed. Raised by the host, never by the core.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not the JSON the operation expects.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The HTTP status carried by the error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status } => Some(*status),
            _ => None,
        }
    }
}
