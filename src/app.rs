// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the reducer store, the tracking window, and the
//! interaction machine into the UI loop. Two independent clocks drive the
//! app: the background poll thread refreshes the tracking window, and the
//! animation tick advances with wall time at the configured cadence. Both
//! are torn down together when the app is dropped.

use std::time::Instant;

use crate::config::Config;
use crate::interaction::Interaction;
use crate::models::object::Stage;
use crate::store::{Command, Store};
use crate::tracking::{TrackingClient, TrackingWindow};
use crate::ui::{board, panel, toolbar};

/// Main application state.
pub struct TrackboardApp {
    config: Config,
    store: Store,
    interaction: Interaction,
    window: TrackingWindow,
    /// Keeps the poll thread alive; dropping it stops polling.
    tracking: TrackingClient,
    /// Animation clock origin; the tick counter derives from elapsed time,
    /// so it is monotonic regardless of repaint jitter.
    started: Instant,
}

impl TrackboardApp {
    /// Create the application and start polling the tracking source.
    pub fn new(config: Config) -> Self {
        let window = TrackingWindow::new(config.window_capacity());
        let tracking = TrackingClient::spawn(&config);
        Self {
            config,
            store: Store::new(),
            interaction: Interaction::new(),
            window,
            tracking,
            started: Instant::now(),
        }
    }

    /// Current animation tick.
    fn tick(&self) -> u64 {
        (self.started.elapsed().as_secs_f64() * f64::from(self.config.poll_rate_hz)) as u64
    }

    fn dispatch(&mut self, command: Command) {
        log::debug!("dispatch {command:?}");
        self.store.dispatch(command);
    }
}

impl eframe::App for TrackboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pull in whatever the poll thread produced since the last frame.
        self.tracking.drain_into(&mut self.window);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let mut show_nodes = self.store.state().show_nodes;
                    if ui.checkbox(&mut show_nodes, "Show Tracked Nodes").clicked() {
                        self.store.dispatch(Command::SetShowNodes(show_nodes));
                        ui.close_menu();
                    }
                });
            });
        });

        // Escape drops back to Idle, ending any authoring gesture.
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.dispatch(Command::SetStage(Stage::Idle));
        }

        // Toolbar
        let toolbar_commands = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, self.store.state()))
            .inner;
        for command in toolbar_commands {
            self.dispatch(command);
        }

        // Drawings panel (right side)
        let panel_command = egui::SidePanel::right("drawings")
            .default_width(250.0)
            .show(ctx, |ui| panel::show(ui, self.store.state()))
            .inner;
        if let Some(command) = panel_command {
            self.dispatch(command);
        }

        // Main canvas (center)
        let tick = self.tick();
        let head_trim = self.config.head_trim();
        let board_command = egui::CentralPanel::default()
            .show(ctx, |ui| {
                board::show(
                    ui,
                    self.store.state(),
                    &self.window,
                    &mut self.interaction,
                    tick,
                    head_trim,
                )
            })
            .inner;
        if let Some(command) = board_command {
            self.dispatch(command);
        }

        // Keep animating even without input events.
        ctx.request_repaint_after(self.config.tick_interval());
    }
}
