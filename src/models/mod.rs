// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for tracked nodes and annotations.

pub mod node;
pub mod object;
