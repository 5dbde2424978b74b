// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for guide layout.
//!
//! Views do not shape text. Axes and legends estimate label extents through a
//! [`TextMeasurer`] so callers can plug in real font metrics when they have them.

/// Estimated extent of one line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width.
    pub width: f64,
    /// Line height.
    pub height: f64,
}

/// A minimal text measurement interface used by guide generators.
pub trait TextMeasurer {
    /// Measures `text` at `font_size`, in the same coordinate system as the marks.
    fn measure(&self, text: &str, font_size: f64) -> TextMetrics;
}

/// A heuristic measurer assuming an average glyph width of 0.6em and a 1em line.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> TextMetrics {
        TextMetrics {
            width: 0.6 * font_size * text.chars().count() as f64,
            height: font_size,
        }
    }
}
