mod app;
mod color;
mod config;
mod data;
mod model;
mod pipeline;
mod state;
mod ui;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use app::SalaryApp;
use eframe::egui;
use model::artifact::ModelArtifact;

fn main() -> Result<()> {
    env_logger::init();

    // Without a model there is nothing to serve.
    let model = ModelArtifact::load(Path::new(config::MODEL_PATH))
        .with_context(|| format!("loading model from {}", config::MODEL_PATH))
        .inspect_err(|e| log::error!("{e:#}"))?;
    let model = Arc::new(model);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config::WINDOW_TITLE)
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::WINDOW_MIN_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        config::WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(SalaryApp::new(model)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the UI")
}
