// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Trackboard - tracked-node annotation overlay.
//!
//! A desktop application that overlays user-authored annotations on a live
//! stream of tracked node positions. Drawings are anchored to specific
//! nodes so they move and animate as the nodes move.

mod app;
mod config;
mod interaction;
mod models;
mod render;
mod store;
mod tracking;
mod ui;
mod util;

use anyhow::Result;
use app::TrackboardApp;
use config::Config;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = Config::from_env();
    log::info!(
        "polling {} at {} Hz",
        config.nodes_url,
        config.poll_rate_hz
    );

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Trackboard - Tracked-Node Annotation Overlay"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Trackboard",
        options,
        Box::new(move |_cc| Ok(Box::new(TrackboardApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
