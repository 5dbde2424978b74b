// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-margin chart layout.
//!
//! Every view reserves a margin around its plot area for guides. Given either the container
//! size or the plot size, [`ChartLayout`] resolves the view and plot rectangles. Scale ranges
//! are then taken from the plot rectangle, so mark coordinates and pointer positions share the
//! view's coordinate system.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space reserved on each side of the plot area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Margin {
    /// Creates a margin in CSS order (top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates the same margin on every side.
    pub const fn uniform(m: f64) -> Self {
        Self::new(m, m, m, m)
    }
}

/// Resolved rectangles of one view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// The whole view, origin at `(0, 0)`.
    pub view: Rect,
    /// The plot area inside the margins.
    pub plot: Rect,
    /// The margin the layout was built with.
    pub margin: Margin,
}

impl ChartLayout {
    /// Lays out a view of the given container size; the plot gets what the margins leave.
    ///
    /// Plot extents never go negative.
    pub fn from_container(width: f64, height: f64, margin: Margin) -> Self {
        let plot_w = (width - margin.left - margin.right).max(0.0);
        let plot_h = (height - margin.top - margin.bottom).max(0.0);
        Self::from_plot(plot_w, plot_h, margin)
    }

    /// Lays out a view around a plot of the given size.
    pub fn from_plot(width: f64, height: f64, margin: Margin) -> Self {
        let plot = Rect::new(
            margin.left,
            margin.top,
            margin.left + width.max(0.0),
            margin.top + height.max(0.0),
        );
        let view = Rect::new(0.0, 0.0, plot.x1 + margin.right, plot.y1 + margin.bottom);
        Self { view, plot, margin }
    }

    /// Plot size.
    pub fn plot_size(&self) -> Size {
        Size::new(self.plot.width(), self.plot.height())
    }

    /// Horizontal range for an x scale: left to right.
    pub fn x_range(&self) -> (f64, f64) {
        (self.plot.x0, self.plot.x1)
    }

    /// Vertical range for a y scale: bottom to top, so larger values sit higher.
    pub fn y_range(&self) -> (f64, f64) {
        (self.plot.y1, self.plot.y0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_layout_subtracts_margins() {
        let l = ChartLayout::from_container(400.0, 300.0, Margin::new(20.0, 10.0, 30.0, 40.0));
        assert_eq!(l.plot, Rect::new(40.0, 20.0, 390.0, 270.0));
        assert_eq!(l.view, Rect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(l.y_range(), (270.0, 20.0));
    }

    #[test]
    fn tiny_containers_clamp_to_empty_plots() {
        let l = ChartLayout::from_container(10.0, 10.0, Margin::uniform(20.0));
        assert_eq!(l.plot_size(), Size::new(0.0, 0.0));
    }
}
