// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Suggested z-order conventions for chart-generated marks.
//!
//! `vizlink_core` marks carry an explicit `z_index` for render ordering, and hit testing picks
//! the top-most mark. The chart layer sets z-indexes consistently so views don't have to
//! hand-tune paint order.
//!
//! These values are coarse. Renderers sort by `(z_index, MarkId)` for a deterministic
//! tie-break.

/// Gridlines drawn behind series.
pub const GRID_LINES: i32 = -50;

/// Filled series marks (bars, areas, map regions).
pub const SERIES_FILL: i32 = 0;
/// Stroked series marks (lines, rules).
pub const SERIES_STROKE: i32 = 10;
/// Point series marks drawn above lines.
pub const SERIES_POINTS: i32 = 20;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;

/// Legend swatches (and the legend background).
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
/// Chart-level titles and annotations.
pub const TITLES: i32 = 80;

/// Brush overlay and handles. Above the series so they receive pointer input first.
pub const BRUSH: i32 = 90;
/// Pointer tooltips.
pub const TOOLTIP: i32 = 100;
