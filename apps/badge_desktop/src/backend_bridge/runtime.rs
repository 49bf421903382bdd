//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::{RegistrationApi, RegistrationClient, RegistrationError, Settings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::media::decode_preview_image;

pub fn launch(
    settings: &Settings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> JoinHandle<()> {
    tracing::info!(api_base_url = %settings.api_base_url, "starting registration backend");
    let api: Arc<dyn RegistrationApi> = Arc::new(RegistrationClient::from_settings(settings));
    spawn_backend_thread(api, cmd_rx, ui_tx)
}

/// Runs commands one at a time until the UI side drops its sender.
pub fn spawn_backend_thread(
    api: Arc<dyn RegistrationApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                report_startup_failure(&ui_tx, &err.to_string());
                return;
            }
        };

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(api.as_ref(), cmd, &ui_tx).await;
            }
            tracing::debug!("ui command queue closed; backend worker exiting");
        });
    })
}

/// Returns false when the UI could not be told; the failure is logged either way.
fn report_startup_failure(ui_tx: &Sender<UiEvent>, reason: &str) -> bool {
    let event = UiEvent::ExhibitionsFailed(RegistrationError::Connectivity(format!(
        "backend worker startup failure: {reason}"
    )));
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(err) => {
            tracing::error!("could not report backend startup failure to ui: {err}");
            false
        }
    }
}

pub async fn handle_command(
    api: &dyn RegistrationApi,
    cmd: BackendCommand,
    ui_tx: &Sender<UiEvent>,
) {
    let cmd_name = cmd.name();
    let event = match cmd {
        BackendCommand::LoadExhibitions => match api.list_exhibitions().await {
            Ok(exhibitions) => UiEvent::ExhibitionsLoaded(exhibitions),
            Err(err) => UiEvent::ExhibitionsFailed(err),
        },
        BackendCommand::Submit { request } => match api.submit_registration(&request).await {
            Ok(card_url) => UiEvent::SubmitSucceeded { card_url },
            Err(err) => UiEvent::SubmitFailed(err),
        },
        BackendCommand::FetchCardImage { url } => match api.fetch_card_image(&url).await {
            Ok(bytes) => match decode_preview_image(&bytes) {
                Ok(image) => UiEvent::CardImageLoaded {
                    url,
                    image,
                    original_bytes: bytes,
                },
                Err(reason) => {
                    tracing::warn!(%url, "card image not previewable: {reason}");
                    UiEvent::CardImageFailed {
                        url,
                        reason,
                        original_bytes: Some(bytes),
                    }
                }
            },
            Err(err) => UiEvent::CardImageFailed {
                url,
                reason: err.to_string(),
                original_bytes: None,
            },
        },
        BackendCommand::DownloadCard { url } => match api.fetch_card_image(&url).await {
            Ok(bytes) => UiEvent::CardDownloadReady { url, bytes },
            Err(err) => {
                tracing::warn!(%url, "card download failed: {err}");
                UiEvent::CardDownloadFailed {
                    url,
                    reason: err.to_string(),
                }
            }
        },
    };

    if ui_tx.send(event).is_err() {
        tracing::debug!(command = cmd_name, "ui event receiver dropped; result discarded");
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use crossbeam_channel::bounded;
    use shared::{
        domain::{Exhibition, ExhibitionId, RegistrationForm},
        protocol::RegistrationRequest,
    };

    use super::*;
    use crate::media::encode_test_png;

    struct FakeApi {
        exhibitions: Result<Vec<Exhibition>, RegistrationError>,
        submit: Result<String, RegistrationError>,
        card: Result<Vec<u8>, RegistrationError>,
    }

    impl FakeApi {
        fn ok() -> Self {
            Self {
                exhibitions: Ok(vec![sample_exhibition()]),
                submit: Ok("https://x/card123.png".to_string()),
                card: Ok(encode_test_png(2, 2)),
            }
        }
    }

    #[async_trait]
    impl RegistrationApi for FakeApi {
        async fn list_exhibitions(&self) -> Result<Vec<Exhibition>, RegistrationError> {
            self.exhibitions.clone()
        }

        async fn submit_registration(
            &self,
            _request: &RegistrationRequest,
        ) -> Result<String, RegistrationError> {
            self.submit.clone()
        }

        async fn fetch_card_image(&self, _url: &str) -> Result<Vec<u8>, RegistrationError> {
            self.card.clone()
        }
    }

    fn sample_exhibition() -> Exhibition {
        Exhibition {
            id: ExhibitionId("1".to_string()),
            abbreviation: "EXPO24".to_string(),
            time: "2024-01-01".to_string(),
            location: "Hall A".to_string(),
            card_link: "https://x/a.png".to_string(),
        }
    }

    fn submit_command() -> BackendCommand {
        BackendCommand::Submit {
            request: RegistrationRequest::new(RegistrationForm::default(), &sample_exhibition()),
        }
    }

    #[tokio::test]
    async fn load_command_emits_loaded_exhibitions() {
        let (ui_tx, ui_rx) = bounded(4);

        handle_command(&FakeApi::ok(), BackendCommand::LoadExhibitions, &ui_tx).await;

        match ui_rx.try_recv().expect("event") {
            UiEvent::ExhibitionsLoaded(list) => assert_eq!(list, vec![sample_exhibition()]),
            _ => panic!("unexpected event"),
        }
    }

    #[tokio::test]
    async fn submit_failure_is_forwarded_with_server_message() {
        let api = FakeApi {
            submit: Err(RegistrationError::Application("duplicate email".to_string())),
            ..FakeApi::ok()
        };
        let (ui_tx, ui_rx) = bounded(4);

        handle_command(&api, submit_command(), &ui_tx).await;

        match ui_rx.try_recv().expect("event") {
            UiEvent::SubmitFailed(err) => assert_eq!(err.notification_text(), "duplicate email"),
            _ => panic!("unexpected event"),
        }
    }

    #[tokio::test]
    async fn card_fetch_decodes_image_and_keeps_original_bytes() {
        let api = FakeApi::ok();
        let expected_bytes = encode_test_png(2, 2);
        let (ui_tx, ui_rx) = bounded(4);

        handle_command(
            &api,
            BackendCommand::FetchCardImage {
                url: "https://x/a.png".to_string(),
            },
            &ui_tx,
        )
        .await;

        match ui_rx.try_recv().expect("event") {
            UiEvent::CardImageLoaded {
                url,
                image,
                original_bytes,
            } => {
                assert_eq!(url, "https://x/a.png");
                assert_eq!((image.width, image.height), (2, 2));
                assert_eq!(original_bytes, expected_bytes);
            }
            _ => panic!("unexpected event"),
        }
    }

    #[tokio::test]
    async fn undecodable_card_reports_failure_for_that_url() {
        let api = FakeApi {
            card: Ok(b"not an image".to_vec()),
            ..FakeApi::ok()
        };
        let (ui_tx, ui_rx) = bounded(4);

        handle_command(
            &api,
            BackendCommand::FetchCardImage {
                url: "https://x/broken.png".to_string(),
            },
            &ui_tx,
        )
        .await;

        match ui_rx.try_recv().expect("event") {
            UiEvent::CardImageFailed {
                url,
                original_bytes,
                ..
            } => {
                assert_eq!(url, "https://x/broken.png");
                assert_eq!(original_bytes.as_deref(), Some(b"not an image".as_slice()));
            }
            _ => panic!("unexpected event"),
        }
    }

    #[tokio::test]
    async fn unreachable_card_reports_failure_without_bytes() {
        let api = FakeApi {
            card: Err(RegistrationError::Connectivity("refused".to_string())),
            ..FakeApi::ok()
        };
        let (ui_tx, ui_rx) = bounded(4);

        handle_command(
            &api,
            BackendCommand::FetchCardImage {
                url: "https://x/a.png".to_string(),
            },
            &ui_tx,
        )
        .await;

        assert!(matches!(
            ui_rx.try_recv().expect("event"),
            UiEvent::CardImageFailed { original_bytes: None, .. }
        ));
    }

    #[tokio::test]
    async fn download_command_returns_raw_card_bytes() {
        let api = FakeApi {
            card: Ok(b"<svg/>".to_vec()),
            ..FakeApi::ok()
        };
        let (ui_tx, ui_rx) = bounded(4);

        handle_command(
            &api,
            BackendCommand::DownloadCard {
                url: "https://x/card.svg".to_string(),
            },
            &ui_tx,
        )
        .await;

        match ui_rx.try_recv().expect("event") {
            UiEvent::CardDownloadReady { url, bytes } => {
                assert_eq!(url, "https://x/card.svg");
                assert_eq!(bytes, b"<svg/>".to_vec());
            }
            _ => panic!("unexpected event"),
        }
    }

    #[test]
    fn startup_failure_reaches_ui_or_reports_unsent() {
        let (ui_tx, ui_rx) = bounded(1);
        assert!(report_startup_failure(&ui_tx, "no threads"));
        assert!(matches!(
            ui_rx.try_recv(),
            Ok(UiEvent::ExhibitionsFailed(err)) if err.is_connectivity()
        ));

        drop(ui_rx);
        assert!(!report_startup_failure(&ui_tx, "no threads"));
    }

    #[test]
    fn backend_thread_drains_commands_and_exits_when_ui_drops_sender() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let api = FakeApi {
            exhibitions: Err(RegistrationError::Connectivity("refused".to_string())),
            ..FakeApi::ok()
        };

        let worker = spawn_backend_thread(Arc::new(api), cmd_rx, ui_tx);
        cmd_tx
            .send(BackendCommand::LoadExhibitions)
            .map_err(|_| "send failed")
            .expect("send");
        cmd_tx
            .send(submit_command())
            .map_err(|_| "send failed")
            .expect("send");
        drop(cmd_tx);
        worker.join().expect("worker");

        let events: Vec<UiEvent> = ui_rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            UiEvent::ExhibitionsFailed(err) if err.is_connectivity()
        ));
        assert!(matches!(
            &events[1],
            UiEvent::SubmitSucceeded { card_url } if card_url == "https://x/card123.png"
        ));
    }
}
