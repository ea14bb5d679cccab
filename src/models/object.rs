// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the core data structures for representing
//! strokes, animation frames, and node-anchored annotation objects.

use serde::{Deserialize, Serialize};

use super::node::{Node, Point};

/// Annotation kind being authored. Determines both the authoring gesture
/// and the render semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    Binding,
    Flipbook,
    Triggering,
    Trajectory,
    Emission,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Binding,
        Tool::Flipbook,
        Tool::Triggering,
        Tool::Trajectory,
        Tool::Emission,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Binding => "Binding",
            Tool::Flipbook => "Flipbook",
            Tool::Triggering => "Triggering",
            Tool::Trajectory => "Trajectory",
            Tool::Emission => "Emission",
        }
    }
}

/// Interaction phase within a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Idle,
    Select,
    Draw,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Idle, Stage::Select, Stage::Draw];

    pub fn label(self) -> &'static str {
        match self {
            Stage::Idle => "Idle",
            Stage::Select => "Select",
            Stage::Draw => "Draw",
        }
    }
}

/// A single stroke, stored in the coordinate frame it was authored in.
/// Render paths may translate the points by an offset before drawing but
/// never write the offset back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub points: Vec<Point>,
    /// `#rrggbb` hex color; an alpha suffix is appended at render time.
    pub color: String,
    pub stroke_width: f32,
}

/// Strokes drawn together; insertion order is layering order.
pub type Frame = Vec<Line>;

/// One user-authored annotation, anchored to one or two tracked nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RCObject {
    /// Unique within a kind, stable across edits.
    pub id: String,
    pub kind: Tool,
    /// Copies of the referenced nodes taken at selection time. The live
    /// position lookup happens again at render time by `node_id`.
    pub ref_node: Vec<Node>,
    pub frames: Vec<Frame>,
    /// Style frozen from the global style at creation so later style
    /// changes don't retroactively affect finished objects.
    pub local_color: String,
    pub local_stroke_width: f32,
}

impl RCObject {
    /// Create a fresh object of the given kind with one empty frame.
    pub fn new(kind: Tool, color: &str, stroke_width: f32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            ref_node: Vec::new(),
            frames: vec![Vec::new()],
            local_color: color.to_owned(),
            local_stroke_width: stroke_width,
        }
    }

    /// Replace the node reference set with a single node.
    pub fn set_ref_node(&mut self, node: Node) {
        self.ref_node = vec![node];
    }

    /// Append a node reference, keeping only the newest two.
    pub fn push_ref_node(&mut self, node: Node) {
        self.ref_node.push(node);
        if self.ref_node.len() > 2 {
            let excess = self.ref_node.len() - 2;
            self.ref_node.drain(..excess);
        }
    }

    /// Start a new stroke in the last frame using the object's own style.
    pub fn start_line(&mut self, at: Point) {
        let line = Line {
            points: vec![at],
            color: self.local_color.clone(),
            stroke_width: self.local_stroke_width,
        };
        if let Some(frame) = self.frames.last_mut() {
            frame.push(line);
        }
    }

    /// Extend the stroke most recently started, if any.
    pub fn extend_line(&mut self, to: Point) {
        if let Some(line) = self.frames.last_mut().and_then(|frame| frame.last_mut()) {
            line.points.push(to);
        }
    }

    /// Append a new empty frame; subsequent strokes land in it.
    pub fn push_frame(&mut self) {
        self.frames.push(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, x: f64, y: f64) -> Node {
        Node { node_id: id, x, y }
    }

    #[test]
    fn test_ref_node_window_keeps_last_two() {
        let mut object = RCObject::new(Tool::Triggering, "#ff0000", 3.0);
        object.push_ref_node(node(1, 0.0, 0.0));
        object.push_ref_node(node(2, 1.0, 0.0));
        object.push_ref_node(node(3, 2.0, 0.0));

        let ids: Vec<i64> = object.ref_node.iter().map(|n| n.node_id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_set_ref_node_replaces() {
        let mut object = RCObject::new(Tool::Binding, "#ff0000", 3.0);
        object.set_ref_node(node(1, 0.0, 0.0));
        object.set_ref_node(node(2, 1.0, 0.0));

        assert_eq!(object.ref_node.len(), 1);
        assert_eq!(object.ref_node[0].node_id, 2);
    }

    #[test]
    fn test_strokes_append_into_last_frame() {
        let mut object = RCObject::new(Tool::Flipbook, "#00ff00", 2.0);
        object.start_line(Point::new(1.0, 1.0));
        object.extend_line(Point::new(2.0, 2.0));
        object.push_frame();
        object.start_line(Point::new(5.0, 5.0));

        assert_eq!(object.frames.len(), 2);
        assert_eq!(object.frames[0].len(), 1);
        assert_eq!(object.frames[0][0].points.len(), 2);
        assert_eq!(object.frames[1].len(), 1);
        assert_eq!(object.frames[1][0].color, "#00ff00");
    }
}
