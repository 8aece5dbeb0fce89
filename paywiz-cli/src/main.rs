//! paywiz
//!
//! A terminal payment wizard: payer form, transfer method, timed transfer
//! instructions and a receipt.

mod app;
mod clipboard;
mod config;
mod embed;
mod input;
mod render;
mod shutdown;

use app::{Terminal, TerminalInputs};
use clap::Parser;
use clipboard::Osc52Clipboard;
use config::{ConfigLoader, Overrides};
use embed::TerminalNavigator;
use paywiz_core::collaborators::Clipboard;
use paywiz_core::events::{command_channel, notification_channel};
use paywiz_core::processors::WizardController;
use paywiz_core::wizard::WizardState;
use paywiz_sdk::objects::Route;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// paywiz - step-by-step payment wizard for the terminal
#[derive(Parser, Debug)]
#[command(name = "paywiz")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (built-in defaults when omitted)
    #[arg(short, long, env = "PAYWIZ_CONFIG")]
    config: Option<PathBuf>,

    /// Override the receipt export directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Accept contract numbers shorter than 8 digits
    #[arg(long, default_value = "false")]
    lenient_contract: bool,

    /// Go straight from verification to the receipt
    #[arg(long, default_value = "false")]
    skip_processing: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting paywiz v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let overrides = Overrides {
        export_dir: args.export_dir.clone(),
        lenient_contract: args.lenient_contract,
        skip_processing: args.skip_processing,
    };
    let settings = ConfigLoader::new(args.config.as_ref(), overrides)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;
    match &args.config {
        Some(path) => tracing::info!("Configuration loaded from {:?}", path),
        None => tracing::info!("No configuration file given, using defaults"),
    }

    // Wire up channels
    let (command_tx, command_rx) = command_channel();
    let (notification_tx, notification_rx) = notification_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(WizardState::new(&settings.timing));
    let (route_tx, route_rx) = watch::channel(Route::default());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let clipboard: Arc<dyn Clipboard> = Arc::new(Osc52Clipboard::new());

    // Spawn the controller
    let controller = WizardController::new(
        settings.clone(),
        command_rx,
        notification_tx,
        snapshot_tx,
        Box::new(clipboard.clone()),
        shutdown_rx,
    );
    let controller_handle = tokio::spawn(controller.run());

    // Run the terminal until the user leaves
    let terminal = Terminal::new(
        settings,
        command_tx,
        TerminalNavigator::new(route_tx),
        clipboard,
    );
    let result = terminal
        .run(TerminalInputs {
            snapshot_rx,
            notification_rx,
            route_rx,
        })
        .await;

    // Stop the controller and its timers
    let _ = shutdown_tx.send(true);
    if let Err(e) = controller_handle.await {
        tracing::error!("Wizard controller task failed: {}", e);
    }
    tracing::info!("paywiz shutdown complete");

    result
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Logs go to stderr so they do not interleave with the screens on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,paywiz_core=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
