mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;
mod views;

use anyhow::anyhow;
use app::{SessionFailure, SlideData, SlidesApp};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let data_dir = config::resolve_data_dir(std::env::args().nth(1))?;
    log::info!("Reading neighborhood tables from {}", data_dir.display());

    let data = SlideData::load(&data_dir)?;
    data.validate()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let failure = SessionFailure::default();
    let app_failure = failure.clone();
    eframe::run_native(
        "Bairros – Rio de Janeiro",
        options,
        Box::new(move |cc| {
            let app = SlidesApp::new(cc.egui_ctx.clone(), data, app_failure)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("{e}"))?;

    match failure.take() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
