// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hex color handling.
//!
//! Stroke colors are stored as `#rrggbb` strings; opacity is encoded by
//! appending a two-digit alpha suffix at render time.

/// Fully opaque alpha suffix.
pub const ALPHA_OPAQUE: &str = "ff";

/// Reduced-opacity alpha suffix used for ghosted/uncommitted strokes.
pub const ALPHA_GHOST: &str = "7f";

/// Append an alpha suffix to a `#rrggbb` color.
pub fn with_alpha(color: &str, alpha: &str) -> String {
    format!("{color}{alpha}")
}

/// Parse `#rrggbb` or `#rrggbbaa` into an egui color.
///
/// Unparseable input falls back to opaque white rather than erroring;
/// a bad color is a cosmetic problem, not a fatal one.
pub fn parse(color: &str) -> egui::Color32 {
    let hex = color.strip_prefix('#').unwrap_or(color);
    let byte = |i: usize| hex.get(i..i + 2).and_then(|s| u8::from_str_radix(s, 16).ok());
    match hex.len() {
        6 => match (byte(0), byte(2), byte(4)) {
            (Some(r), Some(g), Some(b)) => egui::Color32::from_rgb(r, g, b),
            _ => egui::Color32::WHITE,
        },
        8 => match (byte(0), byte(2), byte(4), byte(6)) {
            (Some(r), Some(g), Some(b), Some(a)) => {
                egui::Color32::from_rgba_unmultiplied(r, g, b, a)
            }
            _ => egui::Color32::WHITE,
        },
        _ => egui::Color32::WHITE,
    }
}

/// Format an egui color as `#rrggbb`, dropping any alpha.
pub fn to_hex(color: egui::Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
