// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer-event interpretation.
//!
//! What a press or drag means depends entirely on the active
//! `(tool, stage)` pair; each annotation kind has its own authoring
//! gesture. The dispatch below covers every combination explicitly, so
//! adding a tool or stage is a compile-time-checked decision. Handlers
//! never touch the store; they produce [`Command`]s for the caller to
//! dispatch.

use crate::models::node::Point;
use crate::models::object::{Stage, Tool};
use crate::store::{BoardState, Command};
use crate::tracking::TrackingWindow;

/// Freehand-drawing latch carried across pointer events.
#[derive(Debug, Default)]
pub struct Interaction {
    is_drawing: bool,
    last_mode: Option<(Tool, Stage)>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any tool or stage change cancels an in-flight drag.
    pub fn observe_mode(&mut self, tool: Tool, stage: Stage) {
        if self.last_mode != Some((tool, stage)) {
            self.last_mode = Some((tool, stage));
            self.is_drawing = false;
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    /// Handle a primary-button press at `point` (canvas coordinates).
    pub fn pointer_down(
        &mut self,
        state: &BoardState,
        window: &TrackingWindow,
        point: Point,
    ) -> Option<Command> {
        match (state.tool, state.stage) {
            // Single-reference kinds: reselect replaces the reference.
            (Tool::Binding | Tool::Flipbook | Tool::Trajectory, Stage::Select) => {
                let mut object = state.current_object.clone();
                object.set_ref_node(window.nearest(point));
                Some(Command::SetCurrentObject(object))
            }
            // Triggering keeps a sliding window of the last two references.
            (Tool::Triggering, Stage::Select) => {
                let mut object = state.current_object.clone();
                object.push_ref_node(window.nearest(point));
                Some(Command::SetCurrentObject(object))
            }
            // Freehand kinds: a press opens a new stroke in the last frame.
            (Tool::Binding | Tool::Flipbook, Stage::Draw) => {
                let mut object = state.current_object.clone();
                object.start_line(point);
                self.is_drawing = true;
                Some(Command::SetCurrentObject(object))
            }
            // A press means nothing for the remaining combinations.
            (Tool::Triggering | Tool::Trajectory | Tool::Emission, Stage::Draw)
            | (Tool::Emission, Stage::Select)
            | (_, Stage::Idle) => None,
        }
    }

    /// Handle pointer movement; only meaningful mid-drag.
    pub fn pointer_move(&self, state: &BoardState, point: Point) -> Option<Command> {
        if !self.is_drawing {
            return None;
        }
        match (state.tool, state.stage) {
            (Tool::Binding | Tool::Flipbook, Stage::Draw) => {
                let mut object = state.current_object.clone();
                object.extend_line(point);
                Some(Command::SetCurrentObject(object))
            }
            _ => None,
        }
    }

    pub fn pointer_up(&mut self) {
        self.is_drawing = false;
    }

    pub fn pointer_leave(&mut self) {
        self.is_drawing = false;
    }
}
