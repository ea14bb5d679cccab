// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-tick render pass.
//!
//! Given the reducer state, the tracking window, and the animation tick,
//! compute every stroke for one frame as plain [`StrokeOp`]s. Keeping the
//! pass free of any drawing surface makes the frame algorithm testable and
//! leaves the canvas widget a dumb painter.
//!
//! Stored geometry stays immutable: node-following kinds are translated by
//! a render-time offset from the captured reference position to the node's
//! current one, never rewritten.

use crate::models::node::{Node, NodeSnapshot, Point};
use crate::models::object::{Line, RCObject, Stage};
use crate::store::BoardState;
use crate::tracking::TrackingWindow;
use crate::util::color::{with_alpha, ALPHA_GHOST, ALPHA_OPAQUE};

/// One polyline for the canvas; the color carries its alpha suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeOp {
    pub points: Vec<Point>,
    /// `#rrggbbaa` hex color.
    pub color: String,
    pub width: f32,
}

/// Compute every stroke for one animation tick.
///
/// Missing node references degrade to skipped draws and an empty window
/// silences the node-anchored kinds; the in-progress object always renders.
pub fn render_pass(
    state: &BoardState,
    window: &TrackingWindow,
    tick: u64,
    head_trim: usize,
) -> Vec<StrokeOp> {
    let mut ops = Vec::new();

    // In-progress object, in authored coordinates. Earlier frames are
    // ghosted so prior flipbook phases stay faintly visible while the
    // next one is drawn on top.
    let frames = &state.current_object.frames;
    for (index, frame) in frames.iter().enumerate() {
        let alpha = if index + 1 == frames.len() {
            ALPHA_OPAQUE
        } else {
            ALPHA_GHOST
        };
        for line in frame {
            push_line(&mut ops, line, (0.0, 0.0), alpha);
        }
    }

    // Finished work is ghosted while the author is actively drawing, as a
    // cue that the stroke under the cursor is not committed yet.
    let finished_alpha = if state.stage == Stage::Draw {
        ALPHA_GHOST
    } else {
        ALPHA_OPAQUE
    };

    let latest = window.latest();

    for object in &state.finished_objects.binding {
        let Some(offset) = current_offset(latest, object) else {
            continue;
        };
        if let Some(frame) = object.frames.first() {
            for line in frame {
                push_line(&mut ops, line, offset, finished_alpha);
            }
        }
    }

    for object in &state.finished_objects.flipbook {
        let Some(offset) = current_offset(latest, object) else {
            continue;
        };
        if object.frames.is_empty() {
            continue;
        }
        // Cyclic frame selection drives the animation.
        let frame = &object.frames[(tick as usize) % object.frames.len()];
        for line in frame {
            push_line(&mut ops, line, offset, finished_alpha);
        }
    }

    for object in &state.finished_objects.trajectory {
        let Some(reference) = object.ref_node.first() else {
            continue;
        };
        // Resample the position history, leaving off the newest samples to
        // keep the head of the polyline from jittering. Snapshots where the
        // node is absent are dropped.
        let keep = window.len().saturating_sub(head_trim);
        let points: Vec<Point> = window
            .history()
            .take(keep)
            .filter_map(|snapshot| lookup(snapshot, reference.node_id))
            .map(|node| node.position())
            .collect();
        if points.is_empty() {
            continue;
        }
        // World coordinates, no offset: the trajectory is the node's own path.
        ops.push(StrokeOp {
            points,
            color: with_alpha(&object.local_color, finished_alpha),
            width: object.local_stroke_width,
        });
    }

    // Triggering and Emission objects have no standalone render rule.

    ops
}

/// Translation from the captured reference position to the node's current
/// one, or `None` when the node is not in the latest snapshot.
fn current_offset(latest: Option<&NodeSnapshot>, object: &RCObject) -> Option<(f64, f64)> {
    let captured = object.ref_node.first()?;
    let node = lookup(latest?, captured.node_id)?;
    Some((node.x - captured.x, node.y - captured.y))
}

fn lookup(snapshot: &NodeSnapshot, node_id: i64) -> Option<&Node> {
    snapshot.iter().find(|node| node.node_id == node_id)
}

fn push_line(ops: &mut Vec<StrokeOp>, line: &Line, offset: (f64, f64), alpha: &str) {
    if line.points.is_empty() {
        return;
    }
    ops.push(StrokeOp {
        points: line
            .points
            .iter()
            .map(|p| Point::new(p.x + offset.0, p.y + offset.1))
            .collect(),
        color: with_alpha(&line.color, alpha),
        width: line.stroke_width,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::object::Tool;

    fn node(id: i64, x: f64, y: f64) -> Node {
        Node { node_id: id, x, y }
    }

    fn line_at(x: f64) -> Line {
        Line {
            points: vec![Point::new(x, 0.0), Point::new(x, 10.0)],
            color: "#112233".to_owned(),
            stroke_width: 2.0,
        }
    }

    fn anchored_object(kind: Tool, frames: Vec<Vec<Line>>) -> RCObject {
        let mut object = RCObject::new(kind, "#112233", 2.0);
        object.set_ref_node(node(1, 100.0, 100.0));
        object.frames = frames;
        object
    }

    fn window_with_node_at(x: f64, y: f64) -> TrackingWindow {
        let mut window = TrackingWindow::new(20);
        window.push(vec![node(1, x, y)]);
        window
    }

    #[test]
    fn test_binding_translates_by_node_movement() {
        let mut state = BoardState::default();
        state
            .finished_objects
            .binding
            .push(anchored_object(Tool::Binding, vec![vec![line_at(0.0)]]));
        let window = window_with_node_at(105.0, 97.0);

        let ops = render_pass(&state, &window, 0, 5);
        // One empty current object (no strokes) + one binding stroke.
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].points[0], Point::new(5.0, -3.0));
        assert_eq!(ops[0].points[1], Point::new(5.0, 7.0));
    }

    #[test]
    fn test_vanished_node_skips_object_without_error() {
        let mut state = BoardState::default();
        state
            .finished_objects
            .binding
            .push(anchored_object(Tool::Binding, vec![vec![line_at(0.0)]]));
        let mut window = TrackingWindow::new(20);
        window.push(vec![node(99, 0.0, 0.0)]); // referenced node absent

        assert!(render_pass(&state, &window, 0, 5).is_empty());
    }

    #[test]
    fn test_flipbook_frame_selection_is_cyclic() {
        let mut state = BoardState::default();
        state.finished_objects.flipbook.push(anchored_object(
            Tool::Flipbook,
            vec![
                vec![line_at(0.0)],
                vec![line_at(10.0)],
                vec![line_at(20.0)],
            ],
        ));
        let window = window_with_node_at(100.0, 100.0); // zero offset

        let frame_marker = |tick: u64| {
            let ops = render_pass(&state, &window, tick, 5);
            assert_eq!(ops.len(), 1);
            ops[0].points[0].x
        };

        assert_eq!(frame_marker(0), 0.0);
        assert_eq!(frame_marker(1), 10.0);
        assert_eq!(frame_marker(2), 20.0);
        assert_eq!(frame_marker(3), 0.0);
        assert_eq!(frame_marker(4), 10.0);
    }

    #[test]
    fn test_trajectory_trims_head_and_filters_absent() {
        let mut state = BoardState::default();
        let mut object = RCObject::new(Tool::Trajectory, "#445566", 4.0);
        object.set_ref_node(node(1, 0.0, 0.0));
        state.finished_objects.trajectory.push(object);

        let mut window = TrackingWindow::new(20);
        for i in 0..12 {
            if i == 3 {
                // Node drops out of this snapshot entirely.
                window.push(vec![node(2, 0.0, 0.0)]);
            } else {
                window.push(vec![node(1, i as f64, 0.0)]);
            }
        }

        let ops = render_pass(&state, &window, 0, 5);
        assert_eq!(ops.len(), 1);
        // 12 snapshots - 5 trimmed = first 7 considered, minus the absent one.
        let xs: Vec<f64> = ops[0].points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 4.0, 5.0, 6.0]);
        assert_eq!(ops[0].width, 4.0);
        assert_eq!(ops[0].color, "#445566ff");
    }

    #[test]
    fn test_empty_window_still_renders_current_object() {
        let mut state = BoardState::default();
        state.current_object.start_line(Point::new(1.0, 2.0));
        state
            .finished_objects
            .binding
            .push(anchored_object(Tool::Binding, vec![vec![line_at(0.0)]]));
        let window = TrackingWindow::new(20);

        let ops = render_pass(&state, &window, 0, 5);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].points, vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    fn test_current_object_ghosts_all_but_last_frame() {
        let mut state = BoardState::default();
        state.current_object.start_line(Point::new(0.0, 0.0));
        state.current_object.push_frame();
        state.current_object.start_line(Point::new(5.0, 5.0));
        let window = TrackingWindow::new(20);

        let ops = render_pass(&state, &window, 0, 5);
        assert_eq!(ops.len(), 2);
        assert!(ops[0].color.ends_with("7f"));
        assert!(ops[1].color.ends_with("ff"));
    }

    #[test]
    fn test_finished_strokes_ghosted_while_drawing() {
        let mut state = BoardState::default();
        state.stage = Stage::Draw;
        state
            .finished_objects
            .binding
            .push(anchored_object(Tool::Binding, vec![vec![line_at(0.0)]]));
        let window = window_with_node_at(100.0, 100.0);

        let ops = render_pass(&state, &window, 0, 5);
        assert_eq!(ops.len(), 1);
        assert!(ops[0].color.ends_with("7f"));
    }

    #[test]
    fn test_triggering_objects_produce_no_strokes() {
        let mut state = BoardState::default();
        state
            .finished_objects
            .triggering
            .push(anchored_object(Tool::Triggering, vec![vec![line_at(0.0)]]));
        let window = window_with_node_at(100.0, 100.0);

        assert!(render_pass(&state, &window, 0, 5).is_empty());
    }
}
