use serde::{Deserialize, Serialize};

use crate::{
    domain::{Exhibition, RegistrationForm},
    error::{ApiFailure, MISSING_RESPONSE_DATA, UNSUCCESSFUL_RESPONSE},
};

pub const EXHIBITIONS_PATH: &str = "/users/exhibition";
pub const REGISTRATION_PATH: &str = "/users/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub time: String,
    pub located: String,
    #[serde(rename = "cardLink")]
    pub card_link: String,
}

impl From<&Exhibition> for Venue {
    fn from(exhibition: &Exhibition) -> Self {
        Self {
            time: exhibition.time.clone(),
            located: exhibition.location.clone(),
            card_link: exhibition.card_link.clone(),
        }
    }
}

/// Body of `POST /users/`: every form field at the top level plus the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(flatten)]
    pub form: RegistrationForm,
    pub venue: Venue,
}

impl RegistrationRequest {
    pub fn new(form: RegistrationForm, exhibition: &Exhibition) -> Self {
        Self {
            form,
            venue: Venue::from(exhibition),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn into_result(self) -> Result<T, ApiFailure> {
        if !self.success {
            let message = self
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| UNSUCCESSFUL_RESPONSE.to_string());
            return Err(ApiFailure::new(message));
        }
        self.data
            .ok_or_else(|| ApiFailure::new(MISSING_RESPONSE_DATA))
    }
}
