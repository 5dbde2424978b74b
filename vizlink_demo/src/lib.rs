// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linked-view visualizations built on `vizlink_core` and `vizlink_charts`.
//!
//! - [`trails`]: a difficulty barchart whose bar clicks filter a sibling scatterplot through a
//!   [`vizlink_core::Dispatcher`].
//! - [`views::StockView`]: a price line (focus) driven by a brush over a price area (context).
//! - [`views::Choropleth`]: county scores with year/weight filters.
//! - [`views::ForceGraph`]: a force-directed node-link diagram.
//!
//! Views render into [`vizlink_core::Scene`]s and serialize to SVG ([`svg`]), which the binary
//! collects into an HTML report ([`html`]).

pub mod config;
pub mod data;
pub mod error;
pub mod html;
pub mod svg;
pub mod trails;
pub mod views;

pub use error::{Error, Result};
