use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use launch_dash::app::LaunchDashApp;
use launch_dash::data::load_file;
use launch_dash::layout::HEADING;

#[derive(Parser, Debug)]
#[command(name = "launch-dash")]
#[command(about = "Desktop dashboard for launch records")]
#[command(version)]
struct Args {
    /// Launch dataset (.csv, .json or .parquet)
    #[arg(default_value = "spacex_launch_dash.csv", env = "LAUNCH_DASH_DATA")]
    dataset: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let table = load_file(&args.dataset)
        .with_context(|| format!("loading {}", args.dataset.display()))?;
    let table = Arc::new(table);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        HEADING,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(table)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
