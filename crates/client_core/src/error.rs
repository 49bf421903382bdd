use shared::error::ApiFailure;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The endpoint could not be reached or answered with something unreadable.
    #[error("connectivity failure: {0}")]
    Connectivity(String),
    /// The endpoint answered with `success: false`.
    #[error("{0}")]
    Application(String),
    #[error("no exhibition selected")]
    NoExhibitionSelected,
}

impl RegistrationError {
    pub fn is_connectivity(&self) -> bool {
        matches!(self, RegistrationError::Connectivity(_))
    }

    /// Message shown to the user in the notification dialog.
    pub fn notification_text(&self) -> String {
        match self {
            RegistrationError::Connectivity(detail) => format!("Fail to connect server! ({detail})"),
            RegistrationError::Application(message) => message.clone(),
            RegistrationError::NoExhibitionSelected => {
                "Please select an exhibition before submitting.".to_string()
            }
        }
    }
}

impl From<ApiFailure> for RegistrationError {
    fn from(value: ApiFailure) -> Self {
        RegistrationError::Application(value.message)
    }
}

impl From<reqwest::Error> for RegistrationError {
    fn from(value: reqwest::Error) -> Self {
        RegistrationError::Connectivity(value.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("api base url must not be empty")]
    EmptyBaseUrl,
    #[error("invalid api base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to parse settings file '{path}': {source}")]
    SettingsFile {
        path: String,
        source: toml::de::Error,
    },
}
