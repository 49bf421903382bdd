//! Backend-to-UI events and the notification model shown by the dialog.

use client_core::RegistrationError;
use shared::domain::Exhibition;

use crate::media::PreviewImage;

pub const LOAD_FAILURE_TITLE: &str = "ERROR!";
pub const LOAD_FAILURE_DESCRIPTION: &str = "Fail to connect server!";
pub const SUBMIT_SUCCESS_TITLE: &str = "Success!";
pub const SUBMIT_SUCCESS_DESCRIPTION: &str = "Data submitted successfully!";
pub const SUBMIT_FAILURE_TITLE: &str = "Warning!";

pub enum UiEvent {
    ExhibitionsLoaded(Vec<Exhibition>),
    ExhibitionsFailed(RegistrationError),
    SubmitSucceeded {
        card_url: String,
    },
    SubmitFailed(RegistrationError),
    CardImageLoaded {
        url: String,
        image: PreviewImage,
        original_bytes: Vec<u8>,
    },
    /// `original_bytes` is kept when the fetch succeeded but the format can't be previewed.
    CardImageFailed {
        url: String,
        reason: String,
        original_bytes: Option<Vec<u8>>,
    },
    CardDownloadReady {
        url: String,
        bytes: Vec<u8>,
    },
    CardDownloadFailed {
        url: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationSeverity {
    #[allow(dead_code)]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationSeverity {
    pub fn label(self) -> &'static str {
        match self {
            NotificationSeverity::Info => "Info",
            NotificationSeverity::Success => "Success",
            NotificationSeverity::Warning => "Warning",
            NotificationSeverity::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: NotificationSeverity,
}

impl Notification {
    pub fn new(
        severity: NotificationSeverity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// The exhibition list could not be loaded, whatever the cause.
    pub fn load_failed() -> Self {
        Self::new(
            NotificationSeverity::Error,
            LOAD_FAILURE_TITLE,
            LOAD_FAILURE_DESCRIPTION,
        )
    }

    pub fn submit_succeeded() -> Self {
        Self::new(
            NotificationSeverity::Success,
            SUBMIT_SUCCESS_TITLE,
            SUBMIT_SUCCESS_DESCRIPTION,
        )
    }

    pub fn submit_failed(err: &RegistrationError) -> Self {
        Self::new(
            NotificationSeverity::Warning,
            SUBMIT_FAILURE_TITLE,
            format!("Error submitting data: {}", err.notification_text()),
        )
    }
}
