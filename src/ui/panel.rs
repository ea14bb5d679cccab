// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawings panel.
//!
//! Shows the in-progress object and the finished objects for the active
//! tool, with edit/isolate/delete controls. The panel never mutates state
//! directly; it emits commands.

use crate::models::object::{RCObject, Tool};
use crate::store::{BoardState, Command};

/// Display the drawings panel and return the command it emits, if any.
pub fn show(ui: &mut egui::Ui, state: &BoardState) -> Option<Command> {
    let mut command = None;

    ui.heading("Current Drawing");
    summarize(ui, &state.current_object);
    if state.tool == Tool::Flipbook {
        for (index, frame) in state.current_object.frames.iter().enumerate() {
            ui.weak(format!("  frame {index}: {} stroke(s)", frame.len()));
        }
    }

    ui.separator();
    ui.heading("Finished Drawings");

    let finished = state.finished_objects.for_tool(state.tool);
    if finished.is_empty() {
        ui.weak("Nothing committed for this tool yet");
        return None;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for object in finished {
            let isolated = state.isolated_object_id.as_deref() == Some(object.id.as_str());
            ui.horizontal(|ui| {
                let title = short_id(&object.id);
                if isolated {
                    ui.label(egui::RichText::new(title).strong());
                } else {
                    ui.label(title);
                }

                if ui.small_button("Edit").clicked() {
                    command = Some(Command::EditObject(object.id.clone()));
                }
                let isolate_label = if isolated { "Unisolate" } else { "Isolate" };
                if ui.small_button(isolate_label).clicked() {
                    command = Some(Command::IsolateObject(object.id.clone()));
                }
                if ui.small_button("Delete").clicked() {
                    command = Some(Command::DeleteObject(object.id.clone()));
                }
            });
        }
    });

    command
}

fn summarize(ui: &mut egui::Ui, object: &RCObject) {
    let strokes: usize = object.frames.iter().map(Vec::len).sum();
    ui.label(format!(
        "{} · {} node ref(s) · {} frame(s) · {} stroke(s)",
        object.kind.label(),
        object.ref_node.len(),
        object.frames.len(),
        strokes
    ));
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}
