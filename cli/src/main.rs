//! QR Panel CLI - generate, manage and export QR codes.

mod commands;
mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use qrpanel_core::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrpanel")]
#[command(about = "QR code generator and dashboard", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(short, long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a QR code through the backend
    Generate {
        /// Text or URL to encode
        content: String,
        /// Treat the request as coming from the dashboard page
        #[arg(long)]
        dashboard: bool,
        /// Render locally instead of calling the backend
        #[arg(long)]
        offline: bool,
        /// Directory to save the PNG in
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Delete a stored QR code
    Delete {
        /// Identifier of the code
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Render a styled code with an optional logo, no backend involved
    Widget {
        /// Text or URL to encode
        text: String,
        /// Image to embed in the middle of the code
        #[arg(short, long)]
        logo: Option<PathBuf>,
        /// Directory to export the PNG to
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print a QR code in the terminal
    Show {
        /// Text or URL to encode
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("qrpanel=info".parse()?)
                .add_directive("qrpanel_core=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(server) = cli.server {
        config.base_url = server;
    }

    match cli.command {
        Commands::Generate { content, dashboard, offline, out } => {
            if let Some(out) = out {
                config.download_dir = out;
            }
            commands::generate(config, &content, dashboard, offline).await?
        }
        Commands::Delete { id, yes } => commands::delete(config, id, yes).await?,
        Commands::Widget { text, logo, out } => {
            let dir = out.unwrap_or_else(|| config.download_dir.clone());
            commands::widget(&text, logo, &dir)?
        }
        Commands::Show { text } => ui::print_qr_code(&text),
    }

    Ok(())
}
