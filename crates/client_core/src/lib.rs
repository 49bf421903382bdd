use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::Exhibition,
    protocol::{ApiEnvelope, RegistrationRequest, EXHIBITIONS_PATH, REGISTRATION_PATH},
};
use tracing::{info, warn};

pub mod config;
pub mod error;

pub use config::{load_settings, Settings};
pub use error::{ConfigError, RegistrationError};

/// Remote registration API: the exhibition list, the registration endpoint,
/// and plain GETs for card images.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    async fn list_exhibitions(&self) -> Result<Vec<Exhibition>, RegistrationError>;
    async fn submit_registration(
        &self,
        request: &RegistrationRequest,
    ) -> Result<String, RegistrationError>;
    async fn fetch_card_image(&self, url: &str) -> Result<Vec<u8>, RegistrationError>;
}

pub struct RegistrationClient {
    http: Client,
    base_url: String,
}

impl RegistrationClient {
    /// `base_url` is expected in normalized form (see [`config::normalize_api_base_url`]).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl RegistrationApi for RegistrationClient {
    async fn list_exhibitions(&self) -> Result<Vec<Exhibition>, RegistrationError> {
        let url = self.endpoint(EXHIBITIONS_PATH);
        let response = self.http.get(&url).send().await.map_err(|err| {
            warn!(%url, "failed to reach exhibition endpoint: {err}");
            RegistrationError::from(err)
        })?;

        let exhibitions: Vec<Exhibition> = read_envelope(response, "exhibition list").await?;
        info!(count = exhibitions.len(), "loaded exhibitions");
        Ok(exhibitions)
    }

    async fn submit_registration(
        &self,
        request: &RegistrationRequest,
    ) -> Result<String, RegistrationError> {
        let url = self.endpoint(REGISTRATION_PATH);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!(%url, "failed to reach registration endpoint: {err}");
                RegistrationError::from(err)
            })?;

        let card_url: String = read_envelope(response, "registration").await?;
        info!(%card_url, "registration accepted");
        Ok(card_url)
    }

    async fn fetch_card_image(&self, url: &str) -> Result<Vec<u8>, RegistrationError> {
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<T, RegistrationError> {
    let status = response.status();
    let body = response.bytes().await?;

    match serde_json::from_slice::<ApiEnvelope<T>>(&body) {
        Ok(envelope) => envelope.into_result().map_err(|failure| {
            warn!(endpoint, %status, message = %failure.message, "api reported failure");
            RegistrationError::from(failure)
        }),
        Err(err) if !status.is_success() => {
            warn!(endpoint, %status, "api returned error status: {err}");
            Err(RegistrationError::Connectivity(format!(
                "{endpoint} endpoint returned {status}"
            )))
        }
        Err(err) => {
            warn!(endpoint, "invalid response payload: {err}");
            Err(RegistrationError::Connectivity(format!(
                "invalid {endpoint} response payload: {err}"
            )))
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
