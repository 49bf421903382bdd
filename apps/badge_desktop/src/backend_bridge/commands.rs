//! Backend commands queued from UI to backend worker.

use shared::protocol::RegistrationRequest;

pub enum BackendCommand {
    LoadExhibitions,
    Submit { request: RegistrationRequest },
    FetchCardImage { url: String },
    /// Fetches the card bytes for saving when no preview bytes are cached.
    DownloadCard { url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadExhibitions => "load_exhibitions",
            BackendCommand::Submit { .. } => "submit",
            BackendCommand::FetchCardImage { .. } => "fetch_card_image",
            BackendCommand::DownloadCard { .. } => "download_card",
        }
    }
}
