// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Reducer-shaped application state.
//!
//! Every mutation of the authoring model flows through [`Command`];
//! [`reduce`] is a pure transition function so the state machine is
//! testable without any rendering surface. UI code only reads the state
//! and dispatches commands.

use crate::models::object::{RCObject, Stage, Tool};

/// Starting stroke color for a fresh session.
pub const DEFAULT_COLOR: &str = "#ff0000";

/// Starting stroke width for a fresh session.
pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;

/// Committed annotations, partitioned by kind. Ids are unique within a
/// kind, not necessarily globally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinishedObjects {
    pub binding: Vec<RCObject>,
    pub flipbook: Vec<RCObject>,
    pub triggering: Vec<RCObject>,
    pub trajectory: Vec<RCObject>,
    pub emission: Vec<RCObject>,
}

impl FinishedObjects {
    pub fn for_tool(&self, tool: Tool) -> &[RCObject] {
        match tool {
            Tool::Binding => &self.binding,
            Tool::Flipbook => &self.flipbook,
            Tool::Triggering => &self.triggering,
            Tool::Trajectory => &self.trajectory,
            Tool::Emission => &self.emission,
        }
    }

    fn for_tool_mut(&mut self, tool: Tool) -> &mut Vec<RCObject> {
        match tool {
            Tool::Binding => &mut self.binding,
            Tool::Flipbook => &mut self.flipbook,
            Tool::Triggering => &mut self.triggering,
            Tool::Trajectory => &mut self.trajectory,
            Tool::Emission => &mut self.emission,
        }
    }

    pub fn get(&self, tool: Tool, id: &str) -> Option<&RCObject> {
        self.for_tool(tool).iter().find(|object| object.id == id)
    }

    /// Replace-or-append by id, preserving the position of other entries.
    fn upsert(&mut self, tool: Tool, object: RCObject) {
        let list = self.for_tool_mut(tool);
        match list.iter_mut().find(|existing| existing.id == object.id) {
            Some(slot) => *slot = object,
            None => list.push(object),
        }
    }

    fn delete(&mut self, tool: Tool, id: &str) {
        self.for_tool_mut(tool).retain(|object| object.id != id);
    }
}

/// The whole authoring state tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub tool: Tool,
    pub stage: Stage,
    /// Global stroke color, copied onto objects at creation.
    pub color: String,
    /// Global stroke width, copied onto objects at creation.
    pub stroke_width: f32,
    /// Whether the canvas overlays markers for the tracked nodes.
    pub show_nodes: bool,
    pub isolated_object_id: Option<String>,
    /// The one in-progress object, always present and outside the store.
    pub current_object: RCObject,
    pub finished_objects: FinishedObjects,
}

impl Default for BoardState {
    fn default() -> Self {
        let color = DEFAULT_COLOR.to_owned();
        Self {
            tool: Tool::Binding,
            stage: Stage::Idle,
            stroke_width: DEFAULT_STROKE_WIDTH,
            show_nodes: true,
            isolated_object_id: None,
            current_object: RCObject::new(Tool::Binding, &color, DEFAULT_STROKE_WIDTH),
            finished_objects: FinishedObjects::default(),
            color,
        }
    }
}

impl BoardState {
    /// A fresh in-progress object for the active tool, carrying the
    /// current global style.
    fn fresh_object(&self) -> RCObject {
        RCObject::new(self.tool, &self.color, self.stroke_width)
    }
}

/// Every legal mutation of [`BoardState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetTool(Tool),
    SetStage(Stage),
    SetCurrentObject(RCObject),
    SetColor(String),
    SetStrokeWidth(f32),
    SetShowNodes(bool),
    /// Append a new empty frame to the in-progress object (next flipbook phase).
    SaveFrame,
    /// Commit the in-progress object into the store under the active tool.
    SaveCurrentObject,
    EditObject(String),
    IsolateObject(String),
    DeleteObject(String),
}

/// Pure state transition.
pub fn reduce(mut state: BoardState, command: Command) -> BoardState {
    match command {
        Command::SetTool(tool) => {
            state.tool = tool;
            state.stage = Stage::Idle;
            state.current_object = state.fresh_object();
        }
        Command::SetStage(stage) => state.stage = stage,
        Command::SetCurrentObject(object) => state.current_object = object,
        Command::SetColor(color) => {
            state.color.clone_from(&color);
            state.current_object.local_color = color;
        }
        Command::SetStrokeWidth(width) => {
            state.stroke_width = width;
            state.current_object.local_stroke_width = width;
        }
        Command::SetShowNodes(show) => state.show_nodes = show,
        Command::SaveFrame => state.current_object.push_frame(),
        Command::SaveCurrentObject => {
            let fresh = state.fresh_object();
            let finished = std::mem::replace(&mut state.current_object, fresh);
            state.finished_objects.upsert(state.tool, finished);
            state.stage = Stage::Idle;
        }
        Command::EditObject(id) => {
            // Unknown ids fall back to a fresh object rather than erroring.
            state.current_object = state
                .finished_objects
                .get(state.tool, &id)
                .cloned()
                .unwrap_or_else(|| state.fresh_object());
        }
        Command::IsolateObject(id) => {
            // Toggle: isolating the isolated id clears isolation.
            state.isolated_object_id = if state.isolated_object_id.as_deref() == Some(id.as_str()) {
                None
            } else {
                Some(id)
            };
        }
        Command::DeleteObject(id) => {
            if state.isolated_object_id.as_deref() == Some(id.as_str()) {
                state.isolated_object_id = None;
            }
            state.finished_objects.delete(state.tool, &id);
        }
    }
    state
}

/// Thin dispatcher over [`reduce`].
#[derive(Debug, Default)]
pub struct Store {
    state: BoardState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn dispatch(&mut self, command: Command) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, command);
    }
}
