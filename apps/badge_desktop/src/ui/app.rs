use std::{fs, time::Duration};

use client_core::{RegistrationError, Settings};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{RegistrationState, SubmitRejected};
use crate::media::PreviewImage;

pub const APP_TITLE: &str = "Exhibition Registration";

pub(crate) enum CardPreview {
    Empty,
    Loading {
        url: String,
    },
    Ready {
        url: String,
        image: PreviewImage,
        original_bytes: Vec<u8>,
        texture: Option<TextureHandle>,
    },
    Failed {
        url: String,
        reason: String,
        original_bytes: Option<Vec<u8>>,
    },
}

impl CardPreview {
    fn url(&self) -> Option<&str> {
        match self {
            CardPreview::Empty => None,
            CardPreview::Loading { url }
            | CardPreview::Ready { url, .. }
            | CardPreview::Failed { url, .. } => Some(url),
        }
    }
}

pub struct BadgeDesktopApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    card_file_name: String,
    pending_download: Option<String>,

    pub(crate) state: RegistrationState,
    pub(crate) status: String,
    pub(crate) card: CardPreview,
}

impl BadgeDesktopApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, settings: &Settings) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            card_file_name: settings.card_file_name.clone(),
            pending_download: None,
            state: RegistrationState::default(),
            status: "Loading exhibitions...".to_string(),
            card: CardPreview::Empty,
        };
        if !dispatch_backend_command(&app.cmd_tx, BackendCommand::LoadExhibitions, &mut app.status)
        {
            let reason = app.status.clone();
            app.state
                .exhibitions_failed(&RegistrationError::Connectivity(reason));
        }
        app
    }

    pub(crate) fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::ExhibitionsLoaded(exhibitions) => {
                    self.status = format!("Loaded {} exhibitions", exhibitions.len());
                    self.state.exhibitions_loaded(exhibitions);
                }
                UiEvent::ExhibitionsFailed(err) => {
                    self.status = format!("Exhibition list unavailable: {err}");
                    self.state.exhibitions_failed(&err);
                }
                UiEvent::SubmitSucceeded { card_url } => {
                    self.status = "Registration submitted".to_string();
                    self.state.submit_succeeded(&card_url);
                }
                UiEvent::SubmitFailed(err) => {
                    self.status = format!("Registration failed: {err}");
                    self.state.submit_failed(&err);
                }
                UiEvent::CardImageLoaded {
                    url,
                    image,
                    original_bytes,
                } => {
                    if self.card.url() == Some(url.as_str()) {
                        self.card = CardPreview::Ready {
                            url,
                            image,
                            original_bytes,
                            texture: None,
                        };
                    } else {
                        tracing::debug!(%url, "discarding card image for a card no longer shown");
                    }
                }
                UiEvent::CardImageFailed {
                    url,
                    reason,
                    original_bytes,
                } => {
                    if self.card.url() == Some(url.as_str()) {
                        tracing::warn!(%url, "card image unavailable: {reason}");
                        self.card = CardPreview::Failed {
                            url,
                            reason,
                            original_bytes,
                        };
                    }
                }
                UiEvent::CardDownloadReady { url, bytes } => {
                    if self.take_pending_download(&url) {
                        let suggested_name = self.card_file_name.clone();
                        self.save_image_bytes_as(&bytes, &suggested_name);
                    } else {
                        tracing::debug!(%url, "discarding card download for a card no longer shown");
                    }
                }
                UiEvent::CardDownloadFailed { url, reason } => {
                    if self.take_pending_download(&url) {
                        self.status = format!("Failed to download card: {reason}");
                    }
                }
            }
        }
    }

    /// Requests the image behind the current result URL whenever it changes.
    pub(crate) fn sync_card_preview(&mut self) {
        let current = self.state.result_image().map(str::to_owned);
        if self.card.url() == current.as_deref() {
            return;
        }

        let Some(url) = current else {
            self.card = CardPreview::Empty;
            return;
        };

        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchCardImage { url: url.clone() },
            &mut self.status,
        );
        self.card = if queued {
            CardPreview::Loading { url }
        } else {
            CardPreview::Failed {
                url,
                reason: self.status.clone(),
                original_bytes: None,
            }
        };
    }

    pub(crate) fn try_submit(&mut self) {
        let request = match self.state.begin_submit() {
            Ok(request) => request,
            Err(SubmitRejected::InFlight) => return,
            Err(SubmitRejected::NoExhibitionSelected) => {
                self.status = "Select an exhibition before submitting".to_string();
                return;
            }
        };

        self.status = "Submitting registration...".to_string();
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Submit { request },
            &mut self.status,
        ) {
            let reason = self.status.clone();
            self.state
                .submit_failed(&RegistrationError::Connectivity(reason));
        }
    }

    pub(crate) fn reset_registration(&mut self) {
        if self.state.reset() {
            self.pending_download = None;
            self.status = "Ready for another registration".to_string();
        }
    }

    /// Cached bytes of the card currently displayed, if it may be saved.
    pub(crate) fn downloadable_card(&self) -> Option<&[u8]> {
        let target = self.state.download_target()?;
        match &self.card {
            CardPreview::Ready {
                url,
                original_bytes,
                ..
            } if url == target => Some(original_bytes.as_slice()),
            CardPreview::Failed {
                url,
                original_bytes: Some(original_bytes),
                ..
            } if url == target => Some(original_bytes.as_slice()),
            _ => None,
        }
    }

    pub(crate) fn can_download(&self) -> bool {
        self.state.download_target().is_some() && self.pending_download.is_none()
    }

    /// Saves the cached card bytes, or asks the backend to fetch them first.
    pub(crate) fn download_card(&mut self) {
        if let Some(bytes) = self.downloadable_card().map(<[u8]>::to_vec) {
            let suggested_name = self.card_file_name.clone();
            self.save_image_bytes_as(&bytes, &suggested_name);
            return;
        }

        let Some(url) = self.state.download_target().map(str::to_owned) else {
            return;
        };
        if self.pending_download.is_some() {
            return;
        }
        if dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::DownloadCard { url: url.clone() },
            &mut self.status,
        ) {
            self.status = "Fetching card for download...".to_string();
            self.pending_download = Some(url);
        }
    }

    fn take_pending_download(&mut self, url: &str) -> bool {
        let matches = self.pending_download.as_deref() == Some(url)
            && self.state.download_target() == Some(url);
        if self.pending_download.as_deref() == Some(url) {
            self.pending_download = None;
        }
        matches
    }

    fn save_image_bytes_as(&mut self, bytes: &[u8], suggested_name: &str) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(suggested_name)
            .save_file()
        {
            match fs::write(&path, bytes) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "saved card image");
                    self.status = format!("Saved card to {}", path.display());
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), "failed to save card image: {err}");
                    self.status = format!("Failed to save card: {err}");
                }
            }
        }
    }
}

impl eframe::App for BadgeDesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.sync_card_preview();

        self.show_notification_dialog(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(egui::RichText::new(&self.status).weak());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                egui::ScrollArea::vertical()
                    .id_salt("registration_form_scroll")
                    .show(&mut columns[0], |ui| self.show_registration_form(ui));
                self.show_result_panel(&mut columns[1]);
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
