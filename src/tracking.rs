// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tracked-node acquisition and history.
//!
//! A bounded window of node snapshots is refreshed by a background poll
//! thread at a fixed rate, independent of the render clock. Transport
//! failures are logged and skipped; a tracking gap is never fatal.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::Config;
use crate::models::node::{Node, NodeSnapshot, Point};
use crate::util::geometry::distance;

/// Upper bound for a single snapshot request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Bounded, time-ordered history of node snapshots.
///
/// Append-only from the caller's point of view: new snapshots land at the
/// back and the oldest are evicted once the capacity is reached, so the
/// newest snapshot is always last.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingWindow {
    snapshots: VecDeque<NodeSnapshot>,
    capacity: usize,
}

impl TrackingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a snapshot, evicting from the front when over capacity.
    pub fn push(&mut self, snapshot: NodeSnapshot) {
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
    }

    /// The most recent snapshot, if any.
    pub fn latest(&self) -> Option<&NodeSnapshot> {
        self.snapshots.back()
    }

    /// Read-only view of the buffered snapshots, oldest to newest.
    pub fn history(&self) -> impl Iterator<Item = &NodeSnapshot> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Copy of the node in the latest snapshot closest to `point`.
    ///
    /// The first node at the minimal distance wins ties. An empty window
    /// yields [`Node::SENTINEL`] so downstream offset math degrades to
    /// "no movement" instead of failing.
    pub fn nearest(&self, point: Point) -> Node {
        let mut nearest = Node::SENTINEL;
        let mut min_distance = f64::INFINITY;
        if let Some(snapshot) = self.latest() {
            for node in snapshot {
                let d = distance(node.position(), point);
                if d < min_distance {
                    min_distance = d;
                    nearest = *node;
                }
            }
        }
        nearest
    }
}

/// Wire shape of the tracking source response.
#[derive(Debug, Deserialize)]
struct NodesResponse {
    nodes: NodeSnapshot,
}

/// Decode a snapshot payload of the form `{"nodes": [{nodeId, x, y}, ...]}`.
/// Extra fields on a node record are tolerated.
pub fn parse_snapshot(payload: &str) -> Result<NodeSnapshot> {
    let response: NodesResponse =
        serde_json::from_str(payload).context("invalid node snapshot payload")?;
    Ok(response.nodes)
}

/// Fetch one snapshot from the tracking source.
pub fn fetch_snapshot(client: &reqwest::blocking::Client, url: &str) -> Result<NodeSnapshot> {
    let body = client
        .get(url)
        .send()
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()
        .context("tracking source returned an error status")?
        .text()
        .context("failed to read tracking response body")?;
    parse_snapshot(&body)
}

/// Background poll loop feeding snapshots to the UI thread over a channel.
///
/// The UI thread drains the channel into its [`TrackingWindow`] once per
/// frame. A fetch that completes after the client is dropped hits a closed
/// channel and is discarded instead of being applied to a dead window.
pub struct TrackingClient {
    stop: Arc<AtomicBool>,
    receiver: Receiver<NodeSnapshot>,
    handle: Option<JoinHandle<()>>,
}

impl TrackingClient {
    /// Spawn the poll thread against the configured endpoint.
    pub fn spawn(config: &Config) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = channel();
        let url = config.nodes_url.clone();
        let interval = config.poll_interval();
        let stop_flag = Arc::clone(&stop);
        let handle = match std::thread::Builder::new()
            .name("tracking-poll".to_owned())
            .spawn(move || poll_loop(&url, interval, &stop_flag, &sender))
        {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::error!("failed to spawn tracking poll thread: {err}");
                None
            }
        };
        Self {
            stop,
            receiver,
            handle,
        }
    }

    /// Move every snapshot that arrived since the last call into the window.
    pub fn drain_into(&self, window: &mut TrackingWindow) {
        loop {
            match self.receiver.try_recv() {
                Ok(snapshot) => window.push(snapshot),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }
}

impl Drop for TrackingClient {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn poll_loop(url: &str, interval: Duration, stop: &AtomicBool, sender: &Sender<NodeSnapshot>) {
    let client = match reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            log::error!("failed to build tracking client: {err}");
            return;
        }
    };

    log::info!("tracking poll started against {url}");
    while !stop.load(Ordering::Relaxed) {
        let started = Instant::now();
        match fetch_snapshot(&client, url) {
            Ok(snapshot) => {
                log::debug!("received snapshot with {} nodes", snapshot.len());
                if sender.send(snapshot).is_err() {
                    // Receiver gone, the app is shutting down.
                    break;
                }
            }
            Err(err) => log::warn!("tracking poll skipped: {err:#}"),
        }
        let elapsed = started.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }
    log::info!("tracking poll stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, x: f64, y: f64) -> Node {
        Node { node_id: id, x, y }
    }

    fn marker_snapshot(id: i64) -> NodeSnapshot {
        vec![node(id, id as f64, 0.0)]
    }

    #[test]
    fn test_window_never_exceeds_capacity() {
        let mut window = TrackingWindow::new(4);
        for i in 0..10 {
            window.push(marker_snapshot(i));
        }

        assert_eq!(window.len(), 4);
        let ids: Vec<i64> = window.history().map(|s| s[0].node_id).collect();
        assert_eq!(ids, vec![6, 7, 8, 9]);
        assert_eq!(window.latest().unwrap()[0].node_id, 9);
    }

    #[test]
    fn test_failed_poll_leaves_window_unchanged() {
        let mut window = TrackingWindow::new(4);
        window.push(marker_snapshot(1));
        let before = window.clone();

        // A failed fetch produces no snapshot to push.
        assert!(parse_snapshot("{\"error\": \"detector offline\"}").is_err());
        assert_eq!(window, before);
    }

    #[test]
    fn test_nearest_picks_closest_node() {
        let mut window = TrackingWindow::new(4);
        window.push(vec![node(0, 0.0, 0.0), node(1, 10.0, 0.0)]);

        let found = window.nearest(Point::new(1.0, 0.0));
        assert_eq!(found.node_id, 0);
    }

    #[test]
    fn test_nearest_tie_goes_to_first() {
        let mut window = TrackingWindow::new(4);
        window.push(vec![node(7, 0.0, 0.0), node(8, 2.0, 0.0)]);

        // Equidistant from both; encounter order wins.
        let found = window.nearest(Point::new(1.0, 0.0));
        assert_eq!(found.node_id, 7);
    }

    #[test]
    fn test_nearest_only_searches_latest_snapshot() {
        let mut window = TrackingWindow::new(4);
        window.push(vec![node(1, 0.0, 0.0)]);
        window.push(vec![node(2, 100.0, 100.0)]);

        let found = window.nearest(Point::new(0.0, 0.0));
        assert_eq!(found.node_id, 2);
    }

    #[test]
    fn test_nearest_on_empty_window_is_sentinel() {
        let window = TrackingWindow::new(4);
        let found = window.nearest(Point::new(5.0, 5.0));
        assert_eq!(found, Node::SENTINEL);
    }

    #[test]
    fn test_parse_snapshot_wire_format() {
        let payload = r#"{"nodes": [
            {"nodeId": 0, "x": 411.18324, "y": 351.84357},
            {"nodeId": 1, "x": 440.32921, "y": 303.0037, "confidence": 0.98}
        ]}"#;

        let snapshot = parse_snapshot(payload).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].node_id, 0);
        assert!((snapshot[1].x - 440.32921).abs() < 1e-9);
    }

    #[test]
    fn test_parse_snapshot_rejects_malformed_payload() {
        assert!(parse_snapshot("not json").is_err());
        assert!(parse_snapshot("{\"nodes\": [{\"x\": 1.0}]}").is_err());
    }
}
