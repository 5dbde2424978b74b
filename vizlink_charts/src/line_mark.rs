// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line mark generation.

use kurbo::BezPath;
use peniko::Color;
use vizlink_core::{Mark, MarkId};

use crate::axis::StrokeStyle;
use crate::scale::ScaleContinuous;

/// A polyline through a series of points.
///
/// This generates a single [`vizlink_core::MarkKind::Path`] mark. Points with a non-finite
/// coordinate are skipped.
#[derive(Clone, Debug)]
pub struct LineMarkSpec {
    /// Stable-id for the mark emitted by this spec.
    pub id: MarkId,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleContinuous,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleContinuous,
    /// Stroke style for the line.
    pub stroke: StrokeStyle,
    /// Rendering order hint (`vizlink_core::Mark::z_index`).
    pub z_index: i32,
}

impl LineMarkSpec {
    /// Creates a line mark spec with a black stroke at width 1.
    pub fn new(id: MarkId, x_scale: ScaleContinuous, y_scale: ScaleContinuous) -> Self {
        Self {
            id,
            x_scale,
            y_scale,
            stroke: StrokeStyle::default(),
            z_index: crate::z_order::SERIES_STROKE,
        }
    }

    /// Sets the stroke style.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the line through `points` (data units, in drawing order).
    pub fn mark(&self, points: impl IntoIterator<Item = (f64, f64)>) -> Mark {
        let mut p = BezPath::new();
        let mut started = false;
        for (x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let pt = (self.x_scale.map(x), self.y_scale.map(y));
            if started {
                p.line_to(pt);
            } else {
                p.move_to(pt);
                started = true;
            }
        }
        Mark::builder(self.id)
            .path()
            .z_index(self.z_index)
            .geometry(p)
            .fill(Color::TRANSPARENT)
            .stroke(self.stroke.brush.clone())
            .stroke_width(self.stroke.stroke_width)
            .build()
    }
}
