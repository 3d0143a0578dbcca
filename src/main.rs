//! Deskpet - desktop companion
//!
//! Starts the GUI, or hands the requested page to an instance that is
//! already running.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use deskpet::config::AppConfig;
use deskpet::gui::{tray, DeskpetApp, LaunchOptions};
use deskpet::i18n;
use deskpet::host::HostRequest;
use deskpet::ipc::IpcClient;
use deskpet::router::Route;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Read window flags from this file instead of the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page to bring up: /, /todo, /markdown or /settings
    #[arg(short, long, default_value = "/")]
    route: Route,

    /// Run without the system tray icon
    #[arg(long)]
    no_tray: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging. RUST_LOG wins over --verbose.
    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    info!("🐾 Deskpet v{} starting...", env!("CARGO_PKG_VERSION"));

    let client = IpcClient::default();
    if client.is_server_running() {
        let request = HostRequest::RevealAndFocus(args.route.window_label());
        info!("🔁 Deskpet is already running, forwarding {:?}", request);
        match client.send_host_request(request) {
            Ok(true) => {}
            Ok(false) => warn!("Running instance declined the request"),
            Err(e) => warn!("Failed to reach running instance: {}", e),
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => AppConfig::load(),
    };

    let options = LaunchOptions {
        initial_route: args.route,
        ..LaunchOptions::new(config)
    };

    // Tray labels follow the saved language
    let language = options.settings_store.load().app_language();
    i18n::init(Some(language.code()));
    let _tray = if args.no_tray { None } else { tray::install() };

    iced::daemon(DeskpetApp::title, DeskpetApp::update, DeskpetApp::view)
        .theme(DeskpetApp::theme)
        .subscription(DeskpetApp::subscription)
        .run_with(move || DeskpetApp::new(options.clone()))?;

    Ok(())
}
