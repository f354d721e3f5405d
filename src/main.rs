//! Newsdesk - terminal client for the newsroom CMS
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use newsdesk_api::{ApiClient, ClientConfig, ExportKind};
use newsdesk_app::actions::run_export;
use newsdesk_app::config::{default_config_dir, init_config_dir, load_settings, Settings};
use newsdesk_core::prelude::*;
use newsdesk_core::PasswordChange;

/// Newsdesk - terminal client for the newsroom CMS
#[derive(Parser, Debug)]
#[command(name = "newsdesk")]
#[command(about = "Section layout, inline editing and ad management from the terminal", long_about = None)]
struct Args {
    /// Base URL of the REST API (overrides config.toml)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Bearer token (defaults to the variable named by `api.token_env`)
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// Configuration directory
    #[arg(long, value_name = "DIR")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download a CSV export (roles, users, articles or logs)
    Export {
        kind: String,

        /// Directory to save into (defaults to `export.download_dir`)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Change the signed-in user's password
    Passwd {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },

    /// Write a default config.toml into the configuration directory
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since the TUI owns stdout)
    newsdesk_core::logging::init()?;

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    if let Some(Command::InitConfig) = args.command {
        let path = init_config_dir(&config_dir)?;
        eprintln!("Wrote {}", path.display());
        return Ok(());
    }

    let mut settings = load_settings(&config_dir);
    if let Some(url) = &args.api_url {
        settings.api.base_url = url.clone();
    }
    let client = build_client(&settings, args.token.clone())?;

    info!("Newsdesk starting against {}", client.base_url());

    let result = match args.command {
        None => newsdesk_tui::run(settings, client).await,
        Some(Command::Export { kind, out }) => export(&settings, &client, &kind, out).await,
        Some(Command::Passwd {
            current,
            new,
            confirm,
        }) => {
            change_password(
                &client,
                PasswordChange {
                    current,
                    new,
                    confirm,
                },
            )
            .await
        }
        Some(Command::InitConfig) => Ok(()),
    };

    match &result {
        Err(e) if e.is_fatal() => error!("Fatal error: {:?}", e),
        Err(e) => error!("Application error: {:?}", e),
        Ok(()) => {}
    }

    info!("Newsdesk exiting");
    result
}

fn build_client(settings: &Settings, token: Option<String>) -> Result<ApiClient> {
    let token = token.or_else(|| settings.api.token_from_env());
    if token.is_none() {
        warn!("No API token; requests will be anonymous");
    }
    ApiClient::new(ClientConfig {
        base_url: settings.api.base_url.clone(),
        timeout: settings.api.timeout(),
        token,
    })
}

async fn export(
    settings: &Settings,
    client: &ApiClient,
    kind: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let kind: ExportKind = kind.parse()?;
    let dir = out.unwrap_or_else(|| settings.export.download_dir.clone());

    let result = run_export(client, kind, &settings.export.default_filename, &dir).await;
    match result.data {
        Some(path) if result.success => {
            eprintln!("Saved {}", path.display());
            Ok(())
        }
        _ => Err(Error::request(
            result
                .message
                .unwrap_or_else(|| format!("Export of {kind} failed")),
        )),
    }
}

async fn change_password(client: &ApiClient, change: PasswordChange) -> Result<()> {
    let ack = client.change_password(&change).await?;
    eprintln!("{}", ack.message.as_deref().unwrap_or("Password changed"));
    Ok(())
}
