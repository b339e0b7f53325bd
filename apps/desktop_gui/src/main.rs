use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context as _};
use clap::Parser;
use client_core::{load_settings, AdminApi, AdminClient, FileTokenStore, HttpTransport, Session};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime::spawn_backend_thread};
use crate::controller::events::UiEvent;
use crate::ui::DeptAdminApp;

#[derive(Parser, Debug)]
#[command(about = "Department administration desktop client")]
struct Args {
    /// GraphQL endpoint, overriding deptadmin.toml and the environment.
    #[arg(long)]
    graphql_url: Option<String>,
    /// Directory holding the session file.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings().with_overrides(args.graphql_url, args.data_dir);
    let endpoint = settings.endpoint()?;
    let session = Session::start(Box::new(FileTokenStore::new(settings.token_path()?)))
        .context("failed to restore session")?;
    let authenticated = session.is_authenticated();
    tracing::info!(%endpoint, authenticated, "starting desktop client");

    let api: Arc<dyn AdminApi> = Arc::new(AdminClient::new(
        Arc::new(HttpTransport::new(endpoint)),
        session,
    ));

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    spawn_backend_thread(api, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Department Admin")
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Department Admin",
        options,
        Box::new(move |_cc| Ok(Box::new(DeptAdminApp::new(cmd_tx, ui_rx, authenticated)))),
    )
    .map_err(|err| anyhow!("desktop GUI exited with an error: {err}"))
}
