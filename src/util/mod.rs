// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Small shared utilities.

pub mod color;
pub mod geometry;
