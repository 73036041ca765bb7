use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{load_settings, settings::parse_base_url, BackofficeClient, ClientSettings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::events::UiEvent;
use crate::ui::{EmpresasApp, StartupConfig};

const APP_NAME: &str = "Cadastro de Empresas";

#[derive(Parser, Debug)]
#[command(about = "Back-office screen for managing Empresas")]
struct Args {
    /// Base URL of the back-office API.
    #[arg(long)]
    api_url: Option<String>,
    /// Bearer token sent with every request.
    #[arg(long)]
    token: Option<String>,
    /// Settings file; defaults to ./backoffice.toml, then the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_settings(args: &Args) -> anyhow::Result<ClientSettings> {
    let path = args.config.clone().or_else(|| {
        let local = PathBuf::from(client_core::settings::DEFAULT_SETTINGS_FILE);
        if local.exists() {
            return None;
        }
        dirs::config_dir()
            .map(|dir| dir.join("empresas").join(client_core::settings::DEFAULT_SETTINGS_FILE))
            .filter(|path| path.exists())
    });

    let mut settings = load_settings(path.as_deref())?;
    if let Some(url) = &args.api_url {
        parse_base_url(url)?;
        settings.api_base_url = url.clone();
    }
    if let Some(token) = &args.token {
        settings.auth_token = Some(token.trim().to_string()).filter(|t| !t.is_empty());
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let settings = resolve_settings(&args)?;
    let client = BackofficeClient::new(&settings)?;
    let config = StartupConfig {
        api_base_url: client.base_url().to_string(),
        login_url: settings.login_url()?.to_string(),
        rows_per_page: settings.rows_per_page,
    };
    tracing::info!(
        api = %config.api_base_url,
        authenticated = settings.auth_token.is_some(),
        "starting empresas back-office"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let _worker = runtime::launch(cmd_rx, ui_tx, runtime::Gateways::from_client(client));
    cmd_tx
        .try_send(BackendCommand::ResolveTenant)
        .context("failed to queue tenant resolution")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([800.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|_cc| Ok(Box::new(EmpresasApp::new(cmd_tx, ui_rx, config)))),
    )
    .map_err(|err| anyhow!("failed to run desktop ui: {err}"))
}
