//! Web front-end for the launch dashboard.
//!
//! # Usage
//!
//! ```bash
//! launch-dash-web                          # ./spacex_launch_dash.csv on :8050
//! launch-dash-web launches.parquet --port 8080
//! launch-dash-web launches.csv --no-browser
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use launch_dash::data::load_file;
use launch_dash::server;

#[derive(Parser, Debug)]
#[command(name = "launch-dash-web")]
#[command(about = "Launch records dashboard served over HTTP")]
#[command(version)]
struct Args {
    /// Launch dataset (.csv, .json or .parquet)
    #[arg(default_value = "spacex_launch_dash.csv", env = "LAUNCH_DASH_DATA")]
    dataset: PathBuf,

    /// Port for web server
    #[arg(short, long, default_value = "8050")]
    port: u16,

    /// Don't open browser automatically
    #[arg(long)]
    no_browser: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Loaded once; every request reads the same table.
    let table = load_file(&args.dataset)
        .with_context(|| format!("loading {}", args.dataset.display()))?;

    let config = server::ServerConfig {
        port: args.port,
        open_browser: !args.no_browser,
    };

    server::run_server(Arc::new(table), config).await
}
