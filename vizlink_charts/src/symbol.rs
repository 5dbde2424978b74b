// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symbol helpers for point-like marks.

use kurbo::{BezPath, Circle, Shape};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

const TAN30: f64 = 0.577_350_269_189_625_8;

/// A small set of symbol shapes.
///
/// Sizes are areas in square pixels, so different shapes of the same size carry the same
/// visual weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A circle.
    Circle,
    /// A square (axis-aligned).
    Square,
    /// A diamond (a square rotated and stretched vertically).
    Diamond,
}

impl Symbol {
    /// The default symbol area.
    pub const DEFAULT_SIZE: f64 = 64.0;

    /// Returns a path for this symbol centered at `cx, cy` with the given area.
    pub fn path(self, cx: f64, cy: f64, size: f64) -> BezPath {
        let size = size.max(0.0);
        match self {
            Self::Circle => circle_path(cx, cy, (size / core::f64::consts::PI).sqrt()),
            Self::Square => square_path(cx, cy, size.sqrt() * 0.5),
            Self::Diamond => {
                let dy = (size / (2.0 * TAN30)).sqrt();
                diamond_path(cx, cy, dy * TAN30, dy)
            }
        }
    }
}

fn square_path(cx: f64, cy: f64, half: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((cx - half, cy - half));
    p.line_to((cx + half, cy - half));
    p.line_to((cx + half, cy + half));
    p.line_to((cx - half, cy + half));
    p.close_path();
    p
}

fn diamond_path(cx: f64, cy: f64, dx: f64, dy: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((cx, cy - dy));
    p.line_to((cx + dx, cy));
    p.line_to((cx, cy + dy));
    p.line_to((cx - dx, cy));
    p.close_path();
    p
}

fn circle_path(cx: f64, cy: f64, r: f64) -> BezPath {
    // Renderers targeting a real device would derive the tolerance from the pixel size.
    Circle::new((cx, cy), r).to_path(0.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_centered() {
        for s in [Symbol::Circle, Symbol::Square, Symbol::Diamond] {
            let b = s.path(50.0, 20.0, Symbol::DEFAULT_SIZE).bounding_box();
            assert!((b.center().x - 50.0).abs() < 1e-6, "{s:?}");
            assert!((b.center().y - 20.0).abs() < 1e-6, "{s:?}");
        }
    }

    #[test]
    fn square_side_follows_area() {
        let b = Symbol::Square.path(0.0, 0.0, 64.0).bounding_box();
        assert!((b.width() - 8.0).abs() < 1e-9);
    }
}
