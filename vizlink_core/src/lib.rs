// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal incremental rendering core for linked views.
//!
//! This crate provides the renderer-agnostic pieces every view is built from:
//! - **Tables**: per-view row identity (`row_keys`) derived from a keyed data bind.
//! - **Marks**: stable-identity visual elements (`Rect`, `Path`, `Text`).
//! - **Scene**: a render surface that joins a new mark list against the previous one and
//!   reports [`MarkDiff`]s (`Enter` / `Update` / `Exit`), carrying per-mark "active" state
//!   across frames.
//! - **Dispatcher**: a typed publish/subscribe bus for cross-view coordination.
//!
//! Scales, axes and chart-level mark generators live in `vizlink_charts`.

#![no_std]

extern crate alloc;

mod diff;
mod dispatch;
mod ids;
mod key;
mod mark;
mod scene;
mod table;

pub use diff::MarkDiff;
pub use dispatch::{Dispatcher, Event};
pub use ids::{MarkId, TableId};
pub use key::{KeyInterner, RowKey};
pub use mark::{
    Mark, MarkBuilder, MarkKind, MarkPayload, PathPayload, RectPayload, TextAnchor, TextBaseline,
    TextPayload,
};
pub use scene::{Scene, SceneError, SceneMark};
pub use table::Table;
