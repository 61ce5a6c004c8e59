mod api;
mod clipboard;
mod controller;
mod display;
mod tui;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use wally_types::display::{DEFAULT_EXPLORER_URL, DEFAULT_SOURCE_URL};
use wally_types::WalletField;

use crate::api::ProxyClient;
use crate::clipboard::{ClipboardAdapter, LegacyCommand};
use crate::controller::{ControllerEvent, CopyOutcome, Status, WalletController};

#[derive(Parser)]
#[command(name = "wally-cli")]
#[command(about = "Terminal client for the wally wallet generator")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct CommonArgs {
    /// Base URL of the wally server
    #[arg(long, env = "WALLY_SERVER", default_value = "http://localhost:3000", global = true)]
    server: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 15, global = true)]
    timeout_secs: u64,

    /// Copy command used when the system clipboard is unavailable
    #[arg(long, env = "WALLY_COPY_COMMAND", global = true)]
    copy_command: Option<String>,

    /// Block explorer address prefix (empty to disable)
    #[arg(long, default_value = DEFAULT_EXPLORER_URL, global = true)]
    explorer_url: String,

    /// Project source link
    #[arg(long, default_value = DEFAULT_SOURCE_URL, global = true)]
    source_url: String,

    /// Show the seed phrase without toggling it
    #[arg(long, global = true)]
    show_seed: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the Terminal User Interface (default)
    Tui,
    /// Generate one wallet, print it and exit
    Generate {
        /// Copy a field to the clipboard: address, key or seed
        #[arg(long)]
        copy: Option<WalletField>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = Arc::new(ProxyClient::new(
        &cli.common.server,
        Duration::from_secs(cli.common.timeout_secs),
    )?);

    let legacy = match cli.common.copy_command.as_deref() {
        Some(line) => LegacyCommand::parse(line),
        None => Some(LegacyCommand::platform_default()),
    };
    // A one-shot run exits right after copying, so the clipboard has to be
    // handed over before returning.
    let one_shot = matches!(cli.command, Some(Commands::Generate { .. }));
    let clipboard = ClipboardAdapter::new(legacy).hold_until_replaced(one_shot);
    let (controller, controller_rx) = WalletController::new(source, clipboard);
    let controller = controller.with_seed_phrase_visible(cli.common.show_seed);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = tui::App::new(
                controller,
                cli.common.explorer_url,
                cli.common.source_url,
            );
            tui::run_tui(app, controller_rx).await
        }
        Commands::Generate { copy } => {
            init_logging();
            generate_once(controller, controller_rx, &cli.common, copy).await
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wally_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn generate_once(
    mut controller: WalletController<ClipboardAdapter>,
    mut controller_rx: tokio::sync::mpsc::UnboundedReceiver<ControllerEvent>,
    common: &CommonArgs,
    copy: Option<WalletField>,
) -> Result<()> {
    info!("Requesting wallet from {}", common.server);
    controller.generate_wallet();

    while controller.state().is_loading() {
        let event = controller_rx
            .recv()
            .await
            .ok_or_else(|| anyhow!("controller channel closed"))?;
        controller.handle_event(event);
    }

    print!(
        "{}",
        display::render_plain(controller.state(), &common.explorer_url, &common.source_url)
    );

    if controller.state().status() != Status::Loaded {
        return Err(anyhow!("wallet generation failed"));
    }

    if let Some(field) = copy {
        let outcome = controller.copy_field(field);
        if let Some(toast) = controller.state().toast() {
            eprintln!("{}", toast.message);
        }
        if outcome == CopyOutcome::Failure {
            return Err(anyhow!("could not copy {} to the clipboard", field.label()));
        }
    }

    Ok(())
}
