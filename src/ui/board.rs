// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the tracked-node overlay.
//!
//! This module hosts the canvas area: it translates egui pointer input
//! into the interaction machine's events and paints the render pass's
//! stroke ops plus optional node markers.

use crate::interaction::Interaction;
use crate::models::node::Point;
use crate::render::{render_pass, StrokeOp};
use crate::store::{BoardState, Command};
use crate::tracking::TrackingWindow;
use crate::util::color;

/// Radius of the markers drawn for tracked nodes.
const NODE_MARKER_RADIUS: f32 = 4.0;

/// Display the canvas, handle pointer input, and paint one frame.
pub fn show(
    ui: &mut egui::Ui,
    state: &BoardState,
    window: &TrackingWindow,
    interaction: &mut Interaction,
    tick: u64,
    head_trim: usize,
) -> Option<Command> {
    let mut command = None;

    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);
    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        let (response, painter) =
            ui.allocate_painter(available_size, egui::Sense::click_and_drag());
        let rect = response.rect;
        painter.rect_filled(rect, 4.0, egui::Color32::from_gray(24));

        interaction.observe_mode(state.tool, state.stage);

        // Raw pointer state rather than gesture interpretation: a Select
        // click and the first point of a freehand stroke both need to fire
        // on the press itself.
        let (pressed, down, released, pointer_pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        let local = pointer_pos
            .filter(|pos| rect.contains(*pos))
            .map(|pos| Point::new(f64::from(pos.x - rect.min.x), f64::from(pos.y - rect.min.y)));

        if let Some(point) = local {
            if pressed {
                command = interaction.pointer_down(state, window, point);
            } else if down {
                if let Some(cmd) = interaction.pointer_move(state, point) {
                    command = Some(cmd);
                }
            }
        } else if interaction.is_drawing() {
            interaction.pointer_leave();
        }
        if released {
            interaction.pointer_up();
        }

        // Node markers make the Select stage aimable without a video feed.
        if state.show_nodes {
            if let Some(snapshot) = window.latest() {
                for node in snapshot {
                    let center = rect.min + egui::vec2(node.x as f32, node.y as f32);
                    if rect.contains(center) {
                        painter.circle_filled(
                            center,
                            NODE_MARKER_RADIUS,
                            egui::Color32::from_gray(200),
                        );
                        painter.circle_stroke(
                            center,
                            NODE_MARKER_RADIUS,
                            egui::Stroke::new(1.0, egui::Color32::BLACK),
                        );
                    }
                }
            }
        }

        for op in render_pass(state, window, tick, head_trim) {
            paint_stroke(&painter, rect, &op);
        }
    });

    // Status line under the canvas.
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!(
            "Tool: {}  |  Stage: {}",
            state.tool.label(),
            state.stage.label()
        ));
        ui.separator();
        if window.is_empty() {
            ui.label("No tracking data");
        } else {
            ui.label(format!("{} snapshots buffered", window.len()));
        }
    });

    command
}

/// Paint one stroke op, translating canvas coordinates to screen space.
fn paint_stroke(painter: &egui::Painter, rect: egui::Rect, op: &StrokeOp) {
    let fill = color::parse(&op.color);
    let points: Vec<egui::Pos2> = op
        .points
        .iter()
        .map(|p| rect.min + egui::vec2(p.x as f32, p.y as f32))
        .collect();
    match points.as_slice() {
        [] => {}
        // A stroke that is still a single press renders as a dot.
        [single] => {
            painter.circle_filled(*single, op.width / 2.0, fill);
        }
        _ => {
            painter.add(egui::Shape::line(points, egui::Stroke::new(op.width, fill)));
        }
    }
}
