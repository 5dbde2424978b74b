// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-standing text: chart titles, axis titles and map labels.
//!
//! Tick labels and legend entries are generated by their own components; [`TextMarkSpec`] covers
//! the one-off strings a view places itself.

extern crate alloc;

use alloc::string::String;

use kurbo::Point;
use peniko::{Brush, Color};
use vizlink_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::z_order;

/// A single text mark.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl TextMarkSpec {
    /// Creates a 12px black label, start-anchored and vertically centered on `pos`.
    pub fn new(id: MarkId, pos: Point, text: impl Into<String>) -> Self {
        Self {
            id,
            pos,
            text: text.into(),
            font_size: 12.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: Brush::Solid(Color::BLACK),
            z_index: z_order::TITLES,
        }
    }

    /// Creates a title hanging below `pos`, the way view titles sit in the top-left corner of
    /// their container.
    pub fn title(id: MarkId, pos: Point, text: impl Into<String>) -> Self {
        Self::new(id, pos, text).with_baseline(TextBaseline::Hanging)
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the horizontal anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the vertical baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        Mark::builder(self.id)
            .text()
            .z_index(self.z_index)
            .x(self.pos.x)
            .y(self.pos.y)
            .content(self.text.clone())
            .font_size(self.font_size)
            .fill(self.fill.clone())
            .text_anchor(self.anchor)
            .text_baseline(self.baseline)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vizlink_core::MarkPayload;

    #[test]
    fn title_hangs_from_its_anchor() {
        let mark = TextMarkSpec::title(MarkId::from_raw(1), Point::ZERO, "Trails").mark();
        let MarkPayload::Text(text) = &mark.payload else {
            panic!("expected a text payload");
        };
        assert_eq!(text.baseline, TextBaseline::Hanging);
        assert_eq!(text.text, "Trails");
        assert_eq!(mark.z_index, z_order::TITLES);
    }
}
