use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use rusty_traffic::app::RustyTrafficApp;
use rusty_traffic::config::Args;
use rusty_traffic::data::store::DatasetStore;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.dashboard_config()?;

    // Loading is all-or-nothing: no window without all four datasets.
    let store = DatasetStore::load_dir(&config.data_dir)
        .with_context(|| format!("loading datasets from {}", config.data_dir.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Traffic – Real vs Synthetic",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyTrafficApp::new(store, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard exited with an error: {e}"))
}
