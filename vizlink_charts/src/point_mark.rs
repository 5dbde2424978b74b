// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation.

extern crate alloc;

use alloc::string::String;

use peniko::{Brush, Color};
use vizlink_core::{Mark, MarkId};

use crate::scale::ScaleContinuous;
use crate::symbol::Symbol;

/// Per-record encoding for one point.
///
/// Unset fields fall back to the [`PointMarkSpec`] defaults.
#[derive(Clone, Debug, Default)]
pub struct PointDatum {
    /// X value in data units.
    pub x: f64,
    /// Y value in data units.
    pub y: f64,
    /// Horizontal offset in pixels applied after scaling.
    pub dx: f64,
    /// Symbol override.
    pub symbol: Option<Symbol>,
    /// Fill override.
    pub fill: Option<Brush>,
    /// Tooltip text.
    pub tooltip: Option<String>,
}

impl PointDatum {
    /// Creates a point at `(x, y)` in data units.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Sets the horizontal pixel offset.
    pub fn with_dx(mut self, dx: f64) -> Self {
        self.dx = dx;
        self
    }

    /// Sets the symbol.
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = Some(symbol);
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Sets the tooltip text.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// A point (symbol) mark over two continuous scales.
///
/// Each point is a [`vizlink_core::MarkKind::Path`] mark holding the symbol outline.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleContinuous,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleContinuous,
    /// Symbol area in square pixels.
    pub size: f64,
    /// Default symbol shape.
    pub symbol: Symbol,
    /// Default fill paint.
    pub fill: Brush,
    /// Rendering order hint (`vizlink_core::Mark::z_index`).
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates a point mark spec with circles of the default size and a black fill.
    pub fn new(x_scale: ScaleContinuous, y_scale: ScaleContinuous) -> Self {
        Self {
            x_scale,
            y_scale,
            size: Symbol::DEFAULT_SIZE,
            symbol: Symbol::Circle,
            fill: Brush::Solid(Color::BLACK),
            z_index: crate::z_order::SERIES_POINTS,
        }
    }

    /// Sets the symbol area.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Sets the default fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the default symbol shape.
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = symbol;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark for one point.
    pub fn mark(&self, id: MarkId, datum: &PointDatum) -> Mark {
        let cx = self.x_scale.map(datum.x) + datum.dx;
        let cy = self.y_scale.map(datum.y);
        let symbol = datum.symbol.unwrap_or(self.symbol);
        let mut b = Mark::builder(id)
            .path()
            .z_index(self.z_index)
            .geometry(symbol.path(cx, cy, self.size))
            .fill(datum.fill.clone().unwrap_or_else(|| self.fill.clone()));
        if let Some(t) = &datum.tooltip {
            b = b.tooltip(t.clone());
        }
        b.build()
    }
}
