// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area mark generation.

use kurbo::BezPath;
use peniko::{Brush, Color};
use vizlink_core::{Mark, MarkId};

use crate::scale::ScaleContinuous;

/// A filled area between a baseline and a series of points.
///
/// This generates one filled [`vizlink_core::MarkKind::Path`] mark. Points with a non-finite
/// coordinate are skipped.
#[derive(Clone, Debug)]
pub struct AreaMarkSpec {
    /// Stable-id for the mark emitted by this spec.
    pub id: MarkId,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleContinuous,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleContinuous,
    /// Baseline in scene coordinates. `None` uses the y scale's range start (the plot bottom).
    pub baseline_px: Option<f64>,
    /// Fill paint for the area.
    pub fill: Brush,
    /// Rendering order hint (`vizlink_core::Mark::z_index`).
    pub z_index: i32,
}

impl AreaMarkSpec {
    /// Creates an area mark spec filled black down to the plot bottom.
    pub fn new(id: MarkId, x_scale: ScaleContinuous, y_scale: ScaleContinuous) -> Self {
        Self {
            id,
            x_scale,
            y_scale,
            baseline_px: None,
            fill: Brush::Solid(Color::BLACK),
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline in scene coordinates.
    pub fn with_baseline_px(mut self, y: f64) -> Self {
        self.baseline_px = Some(y);
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the area under `points` (data units, in drawing order).
    pub fn mark(&self, points: impl IntoIterator<Item = (f64, f64)>) -> Mark {
        let y0 = self.baseline_px.unwrap_or(self.y_scale.range().0);
        let mut p = BezPath::new();
        let mut first_x = None;
        let mut last_x = 0.0;
        for (x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let pt = (self.x_scale.map(x), self.y_scale.map(y));
            if first_x.is_none() {
                p.move_to((pt.0, y0));
                first_x = Some(pt.0);
            }
            p.line_to(pt);
            last_x = pt.0;
        }
        if first_x.is_some() {
            p.line_to((last_x, y0));
            p.close_path();
        }
        Mark::builder(self.id)
            .path()
            .z_index(self.z_index)
            .geometry(p)
            .fill(self.fill.clone())
            .build()
    }
}
