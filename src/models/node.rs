// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tracked-node data structures.
//!
//! This module defines the point and node types shared between the
//! tracking window, the interaction machine, and the render pass.

use serde::{Deserialize, Serialize};

/// A 2D point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One tracked entity captured at a poll instant.
///
/// `node_id` is stable across snapshots while the position varies; the
/// wire format spells the field `nodeId`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "nodeId")]
    pub node_id: i64,
    pub x: f64,
    pub y: f64,
}

impl Node {
    /// Stand-in returned when a lookup has nothing to offer. Its position
    /// acts as an identity offset downstream, so math against it degrades
    /// to "no movement" instead of failing.
    pub const SENTINEL: Node = Node {
        node_id: -1,
        x: -1.0,
        y: -1.0,
    };

    /// Current position of the node.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// All node positions captured at one poll instant.
pub type NodeSnapshot = Vec<Node>;
