//! rob-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), loads the case
//! export once, and either serves the JSON API or prints a one-off summary.
//!
//! ```
//! cargo run -p rob-server -- serve
//! cargo run -p rob-server -- summary --min-date 2020-01-01
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rob_core::{SystemClock, Window, dashboard::Dashboard, window::parse_instant};
use rob_server::ServerConfig;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Seal rescue dashboard server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API (default).
  Serve,
  /// Print all views for one window as JSON and exit.
  Summary {
    /// Lower bound, `YYYY-MM-DD` or RFC 3339.
    #[arg(long)]
    min_date: Option<String>,
    /// Upper bound (exclusive), `YYYY-MM-DD` or RFC 3339.
    #[arg(long)]
    max_date: Option<String>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to read config from {:?}", cli.config))?;

  // The log is immutable for the lifetime of the process.
  let log = rob_loader::load(&server_cfg.source)
    .await
    .with_context(|| format!("failed to load case log from {}", server_cfg.source))?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => {
      let app = rob_server::app(log, Arc::new(SystemClock), server_cfg.station.clone());
      let address = server_cfg.address();

      tracing::info!("Listening on http://{address}");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

      axum::serve(listener, app).await.context("server error")?;
    }
    Command::Summary { min_date, max_date } => {
      let min = min_date.as_deref().map(parse_instant).transpose()?;
      let max = max_date.as_deref().map(parse_instant).transpose()?;
      let window = Window::resolve(min, max, &SystemClock);

      let dashboard = Dashboard::compute(&log, window);
      println!("{}", serde_json::to_string_pretty(&dashboard)?);
    }
  }

  Ok(())
}
