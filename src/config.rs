// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Runtime configuration.
//!
//! Settings come from environment variables with sensible defaults, so the
//! app runs out of the box against a local tracking source.

use std::env;
use std::time::Duration;

/// Default tracking source endpoint.
pub const DEFAULT_NODES_URL: &str = "http://127.0.0.1:5000/nodes";

/// Default snapshot poll rate, which also sets the animation tick cadence.
pub const DEFAULT_POLL_RATE_HZ: u32 = 10;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint serving the current node snapshot under a `nodes` key.
    pub nodes_url: String,
    /// Fixed poll rate for the tracking source.
    pub poll_rate_hz: u32,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let nodes_url =
            env::var("TRACKBOARD_NODES_URL").unwrap_or_else(|_| DEFAULT_NODES_URL.to_owned());
        let poll_rate_hz = env::var("TRACKBOARD_POLL_RATE_HZ")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|hz| *hz > 0)
            .unwrap_or(DEFAULT_POLL_RATE_HZ);
        Self {
            nodes_url,
            poll_rate_hz,
        }
    }

    /// Snapshot window capacity: two seconds of history.
    pub fn window_capacity(&self) -> usize {
        (2 * self.poll_rate_hz) as usize
    }

    /// Snapshots trimmed off the head of a trajectory (~0.5 s), which
    /// suppresses jitter at the polyline's leading edge.
    pub fn head_trim(&self) -> usize {
        (f64::from(self.poll_rate_hz) / 2.0).round() as usize
    }

    /// Interval between tracking polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.poll_rate_hz))
    }

    /// Interval between animation ticks; the reference cadence matches the
    /// poll rate.
    pub fn tick_interval(&self) -> Duration {
        self.poll_interval()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nodes_url: DEFAULT_NODES_URL.to_owned(),
            poll_rate_hz: DEFAULT_POLL_RATE_HZ,
        }
    }
}
