// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! A legend is a static guide: an optional title followed by a vertical list of color
//! swatches with text labels, optionally on a background panel.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::color::palette::css;
use peniko::{Brush, Color};
use vizlink_core::{Mark, MarkId, TextBaseline};

use crate::measure::TextMeasurer;
use crate::z_order;

/// A legend row.
#[derive(Clone, Debug)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
    /// Optional swatch outline (for swatches close to the background color).
    pub stroke: Option<Brush>,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
            stroke: None,
        }
    }

    /// Outlines the swatch.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>) -> Self {
        self.stroke = Some(stroke.into());
        self
    }
}

/// A vertical list of color swatches with text labels.
#[derive(Clone, Debug)]
pub struct LegendSwatches {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// Legend origin (top-left of the panel).
    pub x: f64,
    /// Legend origin (top-left of the panel).
    pub y: f64,
    /// Optional title above the rows.
    pub title: Option<String>,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Optional panel fill drawn behind the legend.
    pub background: Option<Brush>,
    /// Inner padding of the panel.
    pub padding: f64,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatches {
    /// Creates an empty legend at `(x, y)` with 18px swatches and no panel.
    pub fn new(id_base: u64, x: f64, y: f64) -> Self {
        Self {
            id_base,
            x,
            y,
            title: None,
            swatch_size: 18.0,
            row_gap: 4.0,
            label_dx: 8.0,
            font_size: 12.0,
            text_fill: Brush::Solid(css::BLACK),
            background: None,
            padding: 0.0,
            items: Vec::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Draws a panel behind the legend with the given inner padding.
    pub fn with_background(mut self, fill: impl Into<Brush>, padding: f64) -> Self {
        self.background = Some(fill.into());
        self.padding = padding;
        self
    }

    /// Appends an item.
    pub fn with_item(mut self, item: LegendItem) -> Self {
        self.items.push(item);
        self
    }

    fn row_height(&self) -> f64 {
        self.swatch_size.max(self.font_size)
    }

    fn title_height(&self) -> f64 {
        if self.title.is_some() {
            self.font_size + self.row_gap * 2.0
        } else {
            0.0
        }
    }

    /// Estimates the panel rectangle.
    pub fn bounds(&self, measurer: &dyn TextMeasurer) -> Rect {
        let label_w = self
            .items
            .iter()
            .map(|i| measurer.measure(&i.label, self.font_size).width)
            .fold(0.0_f64, f64::max);
        let title_w = self
            .title
            .as_deref()
            .map_or(0.0, |t| measurer.measure(t, self.font_size).width);
        let content_w = (self.swatch_size + self.label_dx + label_w).max(title_w);
        let n = self.items.len() as f64;
        let content_h =
            self.title_height() + n * self.row_height() + (n - 1.0).max(0.0) * self.row_gap;
        Rect::new(
            self.x,
            self.y,
            self.x + content_w + 2.0 * self.padding,
            self.y + content_h + 2.0 * self.padding,
        )
    }

    /// Generates legend marks: panel, title, then a swatch and a label per item.
    ///
    /// Ids: `id_base` panel, `+1` title, `+10 + i` swatches, `+1000 + i` labels.
    pub fn marks(&self, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.items.len() * 2 + 2);
        if let Some(bg) = &self.background {
            out.push(
                Mark::builder(MarkId::from_raw(self.id_base))
                    .rect()
                    .z_index(z_order::LEGEND_SWATCHES - 1)
                    .bounds(self.bounds(measurer))
                    .fill(bg.clone())
                    .build(),
            );
        }
        let x0 = self.x + self.padding;
        let mut y = self.y + self.padding;
        if let Some(title) = &self.title {
            out.push(
                Mark::builder(MarkId::from_raw(self.id_base + 1))
                    .text()
                    .z_index(z_order::LEGEND_LABELS)
                    .x(x0)
                    .y(y)
                    .content(title.clone())
                    .font_size(self.font_size)
                    .text_baseline(TextBaseline::Hanging)
                    .fill(self.text_fill.clone())
                    .build(),
            );
            y += self.title_height();
        }

        let row_height = self.row_height();
        for (i, item) in self.items.iter().enumerate() {
            let i = i as u64;
            let swatch_y = y + (row_height - self.swatch_size) * 0.5;
            let mut swatch = Mark::builder(MarkId::from_raw(self.id_base + 10 + i))
                .rect()
                .z_index(z_order::LEGEND_SWATCHES)
                .x(x0)
                .y(swatch_y)
                .w(self.swatch_size)
                .h(self.swatch_size)
                .fill(item.fill.clone());
            if let Some(stroke) = &item.stroke {
                swatch = swatch.stroke(stroke.clone()).stroke_width(1.0);
            }
            out.push(swatch.build());
            out.push(
                Mark::builder(MarkId::from_raw(self.id_base + 1_000 + i))
                    .text()
                    .z_index(z_order::LEGEND_LABELS)
                    .x(x0 + self.swatch_size + self.label_dx)
                    .y(y + row_height * 0.5)
                    .content(item.label.clone())
                    .font_size(self.font_size)
                    .text_baseline(TextBaseline::Middle)
                    .fill(self.text_fill.clone())
                    .build(),
            );
            y += row_height + self.row_gap;
        }
        out
    }
}
