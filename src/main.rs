//! Site Gate
//!
//! A per-site configuration and redirect gateway for a multi-tenant web
//! platform.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                  SITE GATE                    │
//!   Client Request   │  ┌────────┐   ┌─────────┐   ┌────────────┐   │
//!   ─────────────────┼─▶│  http  │──▶│  sites  │──▶│  upstream  │───┼──▶ Platform
//!                    │  │ server │   │resolver │   │   client   │   │
//!                    │  └────────┘   └────┬────┘   └─────┬──────┘   │
//!                    │                    │              │ 404      │
//!                    │                    ▼              ▼          │
//!                    │             ┌────────────┐  ┌────────────┐   │
//!                    │             │   hooks    │─▶│  redirect  │   │
//!   Client Response  │             │  (wiring)  │  │   engine   │   │
//!   ◀────────────────┼─────────────┴────────────┴──┴────────────┘   │
//!                    │                                              │
//!                    │   config · plugins · observability · lifecycle│
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use site_gate::config::loader::load_config;
use site_gate::config::GatewayConfig;
use site_gate::lifecycle::startup;
use site_gate::observability::logging;

#[derive(Parser)]
#[command(name = "site-gate")]
#[command(about = "Per-site plugin and redirect gateway", long_about = None)]
struct Cli {
    /// Gateway configuration file (TOML). Defaults are used when omitted.
    #[arg(short, long, env = "SITE_GATE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "site-gate starting");

    startup::run(config).await
}
