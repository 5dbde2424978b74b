// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `vizlink_core` views.
//!
//! This crate is the layer between raw records and a [`vizlink_core::Scene`]:
//! - **Scales** map data values into scene coordinates and back.
//! - **Mark generators** (bars, points, lines, areas, rules, rects, text) turn records into
//!   stable-identity `vizlink_core::Mark`s.
//! - **Guides** (axes, legends) are generated as marks too.
//! - **Interactions** (pointer tracking, brushing, click toggles) translate pixels back into
//!   record indices, domains and selections.
//! - [`FocusContext`] links a brushed context view to a focus view.
//!
//! Text shaping and layout are out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;

mod area_mark;
mod axis;
mod bar_mark;
#[cfg(not(feature = "std"))]
mod float;
mod focus_context;
mod format;
mod interact;
mod layout;
mod legend;
mod line_mark;
#[cfg(test)]
mod linked_tests;
mod measure;
mod point_mark;
mod rect_mark;
mod rule_mark;
mod scale;
mod symbol;
mod text_mark;
mod time;
pub mod z_order;

pub use area_mark::AreaMarkSpec;
pub use axis::{
    AxisOrient, AxisScale, AxisSpec, AxisStyle, AxisTick, GridStyle, LabelFormatter,
    StrokeStyle, TickFormatter,
};
pub use bar_mark::BarMarkSpec;
pub use focus_context::FocusContext;
pub use format::{capitalize, format_tick_with_step};
pub use interact::{
    BrushEvent, BrushX, PointerTracker, TooltipAnchor, active_labels, bisect_left, click_toggle,
    nearest_index,
};
pub use layout::{ChartLayout, Margin, Size};
pub use legend::{LegendItem, LegendSwatches};
pub use line_mark::LineMarkSpec;
pub use measure::{HeuristicTextMeasurer, TextMeasurer, TextMetrics};
pub use point_mark::{PointDatum, PointMarkSpec};
pub use rect_mark::RectMarkSpec;
pub use rule_mark::RuleMarkSpec;
pub use scale::{
    ScaleBand, ScaleContinuous, ScaleLinear, ScaleOrdinal, ScaleThreshold, ScaleTime, domain_of,
};
pub use symbol::Symbol;
pub use text_mark::TextMarkSpec;
pub use time::{
    DAY, civil_from_days, civil_from_timestamp, days_from_civil, format_date,
    format_time_seconds, nice_time_ticks_seconds, timestamp,
};
pub use z_order::*;
