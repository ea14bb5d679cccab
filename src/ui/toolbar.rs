// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar: tool and stage selection, stroke style, commit buttons.

use crate::models::object::{Stage, Tool};
use crate::store::{BoardState, Command};
use crate::util::color;

/// Display the toolbar and collect the commands it emits.
pub fn show(ui: &mut egui::Ui, state: &BoardState) -> Vec<Command> {
    let mut commands = Vec::new();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tool:");
        for tool in Tool::ALL {
            if ui
                .selectable_label(state.tool == tool, tool.label())
                .clicked()
            {
                commands.push(Command::SetTool(tool));
            }
        }

        ui.separator();

        ui.label("Stage:");
        for stage in Stage::ALL {
            if ui
                .selectable_label(state.stage == stage, stage.label())
                .clicked()
            {
                commands.push(Command::SetStage(stage));
            }
        }

        ui.separator();

        let mut rgb = color::parse(&state.color);
        if ui.color_edit_button_srgba(&mut rgb).changed() {
            commands.push(Command::SetColor(color::to_hex(rgb)));
        }

        let mut width = state.stroke_width;
        if ui
            .add(egui::Slider::new(&mut width, 1.0..=12.0).text("Width"))
            .changed()
        {
            commands.push(Command::SetStrokeWidth(width));
        }

        ui.separator();

        // Only flipbooks have multiple animation phases.
        let can_add_frame = state.tool == Tool::Flipbook;
        if ui
            .add_enabled(can_add_frame, egui::Button::new("➕ Frame"))
            .clicked()
        {
            commands.push(Command::SaveFrame);
        }
        if ui.button("💾 Save Object").clicked() {
            commands.push(Command::SaveCurrentObject);
        }

        ui.separator();

        ui.label(egui::RichText::new(hint(state.tool, state.stage)).italics().weak());
    });

    commands
}

fn hint(tool: Tool, stage: Stage) -> &'static str {
    match (tool, stage) {
        (_, Stage::Idle) => "Pick a stage to start authoring",
        (Tool::Binding | Tool::Flipbook | Tool::Trajectory, Stage::Select) => {
            "Click to anchor the drawing to the nearest node"
        }
        (Tool::Triggering, Stage::Select) => "Click to pick the trigger pair (last two kept)",
        (Tool::Binding | Tool::Flipbook, Stage::Draw) => "Drag to draw freehand strokes",
        (Tool::Emission, Stage::Select)
        | (Tool::Triggering | Tool::Trajectory | Tool::Emission, Stage::Draw) => {
            "Nothing to do in this stage for this tool"
        }
    }
}
