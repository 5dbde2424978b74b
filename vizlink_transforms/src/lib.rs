// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record-level transforms for linked views.
//!
//! This crate provides:
//! - selection predicates produced by interactions (category sets, numeric intervals),
//! - filters that turn a predicate into an **index subset** of a shared dataset, and
//! - small rollups (count by category, extents) used to configure scales.
//!
//! Filters never copy or mutate records: they return indices into the original slice, which
//! double as stable row keys for data-bound marks.

#![no_std]

extern crate alloc;

mod aggregate;
mod extent;
mod filter;
mod predicate;

pub use aggregate::{CategoryCount, count_by};
pub use extent::{extent, max};
pub use filter::{filter_categories, filter_interval};
pub use predicate::{CategorySet, Predicate};
