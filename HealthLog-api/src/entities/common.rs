use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by the JSON endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            success: false,
            error: message.to_string(),
        }
    }

    /// Body for an id that matches no stored measurement
    pub fn measurement_not_found() -> Self {
        Self::new("Measurement not found")
    }

    /// Body for a failure the client can do nothing about
    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}
