//! `stockroom-tui`: terminal dashboard for a remote product inventory.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive state from
//! `stockroom-core`'s [`StateStream`](stockroom_core::StateStream). Two
//! screens, navigable with number keys: Dashboard (stat cards, low stock,
//! categories) and Products (the editable table).
//!
//! Logs go to a file (default `/tmp/stockroom-tui.log`) so they never
//! corrupt the terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use stockroom_core::{CatalogConfig, Inventory, Role, TlsVerification};

use crate::app::App;

/// Terminal dashboard for browsing and editing a product inventory.
#[derive(Parser, Debug)]
#[command(name = "stockroom-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short = 'p', long, env = "STOCKROOM_PROFILE")]
    profile: Option<String>,

    /// Catalog root URL (overrides the profile)
    #[arg(short = 'u', long, env = "STOCKROOM_BASE_URL")]
    base_url: Option<Url>,

    /// Product list path under the base URL
    #[arg(short = 'e', long, env = "STOCKROOM_ENDPOINT")]
    endpoint: Option<String>,

    /// Starting role: admin or user
    #[arg(long)]
    role: Option<Role>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log file path (defaults to /tmp/stockroom-tui.log)
    #[arg(long, default_value = "/tmp/stockroom-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Never log to stdout/stderr while the TUI owns the
/// terminal. The returned guard flushes logs on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("stockroom_tui={log_level},stockroom_core={log_level}"))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("stockroom-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the catalog settings: config profile first, then flags.
fn build_catalog_config(cli: &Cli) -> Result<CatalogConfig> {
    let cfg = stockroom_config::load_config_or_default();
    let (name, profile) = cfg
        .resolve_profile(cli.profile.as_deref())
        .wrap_err("cannot select config profile")?;
    let mut catalog = stockroom_config::profile_to_catalog_config(&profile, &cfg.defaults)
        .wrap_err_with(|| format!("invalid profile '{name}'"))?;

    if let Some(ref url) = cli.base_url {
        catalog.base_url = url.clone();
    }
    if let Some(ref endpoint) = cli.endpoint {
        catalog.endpoint.clone_from(endpoint);
    }
    if let Some(role) = cli.role {
        catalog.initial_role = role;
    }
    if cli.insecure {
        catalog.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = cli.timeout {
        catalog.timeout = Duration::from_secs(secs);
    }

    info!(profile = %name, base_url = %catalog.base_url, endpoint = %catalog.endpoint, "catalog resolved");
    Ok(catalog)
}

/// Human-readable location of the product list, as the client requests it.
fn catalog_source(inventory: &Inventory) -> String {
    inventory.source_url().map_or_else(
        |_| inventory.config().base_url.to_string(),
        |url| url.to_string(),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal enters raw mode
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let catalog = build_catalog_config(&cli)?;
    let inventory = Inventory::new(catalog).wrap_err("cannot build catalog client")?;
    let source = catalog_source(&inventory);

    info!(%source, "starting stockroom-tui");
    let mut app = App::new(inventory, source);
    app.run().await
}
