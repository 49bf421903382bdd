mod backend_bridge;
mod controller;
mod media;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{config::normalize_api_base_url, load_settings, Settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{BadgeDesktopApp, APP_TITLE};

#[derive(Debug, Parser)]
#[command(name = "badge_desktop", about = "Register for an exhibition and get a badge card")]
struct Cli {
    /// Registration API base URL; overrides badge.toml and environment.
    #[arg(long)]
    api_base_url: Option<String>,
    /// Default file name offered when saving the card.
    #[arg(long)]
    card_file_name: Option<String>,
}

fn resolve_settings(cli: Cli) -> anyhow::Result<Settings> {
    let mut settings = load_settings().context("failed to load registration settings")?;
    if let Some(url) = cli.api_base_url {
        settings.api_base_url = normalize_api_base_url(&url)
            .with_context(|| format!("invalid --api-base-url '{url}'"))?;
    }
    if let Some(name) = cli.card_file_name {
        settings.card_file_name = name;
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = resolve_settings(Cli::parse())?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(&settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(BadgeDesktopApp::new(cmd_tx, ui_rx, &settings)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
