// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The concrete visualizations.
//!
//! Each view owns its layout, scales and [`vizlink_core::Scene`], follows the
//! `update_vis` (recompute scales) / `render_vis` (rebuild marks) split, and serializes its
//! current state with `to_svg`.

mod barchart;
mod choropleth;
mod force_graph;
mod scatterplot;
mod stock;

pub use barchart::Barchart;
pub use choropleth::{
    Choropleth, Filters, ScoreColors, filtered_stats, popup_text, weight_options, year_options,
};
pub use force_graph::{ForceGraph, ForceSimulation, SimNode};
pub use scatterplot::{Scatterplot, difficulty_symbol, jitter, trail_tooltip};
pub use stock::StockView;

/// Display order of trail difficulties.
pub const DIFFICULTIES: [&str; 3] = ["easy", "intermediate", "difficult"];
