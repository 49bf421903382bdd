use thiserror::Error;

pub const UNSUCCESSFUL_RESPONSE: &str = "request was not successful";
pub const MISSING_RESPONSE_DATA: &str = "response did not include data";

/// Endpoint was reachable but reported `success: false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiFailure {
    pub message: String,
}

impl ApiFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
