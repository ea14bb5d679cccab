// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Trackboard application.

pub mod board;
pub mod panel;
pub mod toolbar;
