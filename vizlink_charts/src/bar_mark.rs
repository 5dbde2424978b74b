// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar mark generation.

extern crate alloc;

use alloc::string::String;

use peniko::{Brush, Color};
use vizlink_core::{Mark, MarkId};

use crate::scale::{ScaleBand, ScaleContinuous};

/// A vertical bar mark over a band scale.
///
/// Each bar is a [`vizlink_core::MarkKind::Rect`] spanning from the baseline to the value.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// Band scale used for bar positions along x.
    pub band: ScaleBand,
    /// Continuous scale used for bar extents along y.
    pub y_scale: ScaleContinuous,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Default fill paint for bars.
    pub fill: Brush,
    /// Rendering order hint (`vizlink_core::Mark::z_index`).
    pub z_index: i32,
}

impl BarMarkSpec {
    /// Creates a bar mark spec with `baseline = 0` and a black fill.
    pub fn new(band: ScaleBand, y_scale: ScaleContinuous) -> Self {
        Self {
            band,
            y_scale,
            baseline: 0.0,
            fill: Brush::Solid(Color::BLACK),
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline in data units.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the default fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the bar for `label` with height `value`.
    ///
    /// Returns `None` if `label` is not in the band domain. Non-finite values collapse to the
    /// baseline.
    pub fn mark(&self, id: MarkId, label: &str, value: f64, fill: Option<Brush>) -> Option<Mark> {
        let x = self.band.map(label)?;
        let value = if value.is_finite() {
            value
        } else {
            self.baseline
        };
        let y0 = self.y_scale.map(self.baseline);
        let y1 = self.y_scale.map(value);
        Some(
            Mark::builder(id)
                .rect()
                .z_index(self.z_index)
                .x(x)
                .y(y0.min(y1))
                .w(self.band.band_width())
                .h((y1 - y0).abs())
                .fill(fill.unwrap_or_else(|| self.fill.clone()))
                .tooltip(String::from(label))
                .build(),
        )
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;
    use crate::scale::ScaleLinear;

    #[test]
    fn bars_span_from_baseline_to_value() {
        let mut band = ScaleBand::new((0.0, 100.0));
        band.configure_domain(["a", "b"]);
        let y = ScaleContinuous::Linear(ScaleLinear::new((0.0, 10.0), (200.0, 0.0)));
        let spec = BarMarkSpec::new(band, y);

        let m = spec.mark(MarkId::from_raw(1), "b", 5.0, None).unwrap();
        assert_eq!(m.payload.bounds(), Some(Rect::new(50.0, 100.0, 100.0, 200.0)));
        assert!(spec.mark(MarkId::from_raw(2), "zzz", 5.0, None).is_none());
    }
}
