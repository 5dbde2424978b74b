// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filters producing index subsets of a shared dataset.

extern crate alloc;

use alloc::vec::Vec;

use crate::{CategorySet, Predicate};

/// Returns the indices of records whose category is in `selected`.
///
/// An empty selection is equivalent to no filtering: every index is returned.
pub fn filter_categories<R>(
    data: &[R],
    selected: &CategorySet,
    category: impl Fn(&R) -> &str,
) -> Vec<usize> {
    if selected.is_empty() {
        return (0..data.len()).collect();
    }
    let out: Vec<usize> = data
        .iter()
        .enumerate()
        .filter(|(_, r)| selected.contains(category(r)))
        .map(|(i, _)| i)
        .collect();
    tracing::trace!(
        selected = selected.len(),
        kept = out.len(),
        total = data.len(),
        "filter categories"
    );
    out
}

/// Returns the indices of records whose value lies in `[start, end]`.
pub fn filter_interval<R>(
    data: &[R],
    start: f64,
    end: f64,
    value: impl Fn(&R) -> f64,
) -> Vec<usize> {
    let p = Predicate::Interval { start, end };
    data.iter()
        .enumerate()
        .filter(|(_, r)| p.accepts_value(value(r)))
        .map(|(i, _)| i)
        .collect()
}
