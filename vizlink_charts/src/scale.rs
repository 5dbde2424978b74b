// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales.
//!
//! A scale maps a data-space **domain** into a pixel-space **range**. Views own their scales
//! and reconfigure the domain whenever the bound data subset changes; the range is fixed by
//! the view's layout. Continuous scales can also be inverted, turning a pointer or brush
//! position back into a data value.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::time;

/// Returns the `(min, max)` of the finite `values`.
///
/// An empty (or all non-finite) input yields the degenerate domain `(0, 0)`.
pub fn domain_of(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
        .unwrap_or((0.0, 0.0))
}

/// A continuous scale instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Time scale.
    Time(ScaleTime),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, px: f64) -> f64 {
        match self {
            Self::Linear(s) => s.invert(px),
            Self::Time(s) => s.invert(px),
        }
    }

    /// Returns tick values.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain(),
            Self::Time(s) => s.domain(),
        }
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Time(s) => s.range(),
        }
    }

    /// Replaces the domain.
    pub fn set_domain(&mut self, domain: (f64, f64)) {
        match self {
            Self::Linear(s) => s.set_domain(domain),
            Self::Time(s) => s.set_domain(domain),
        }
    }

    /// Sets the domain to the extent of `values` (see [`domain_of`]).
    pub fn configure_domain(&mut self, values: impl IntoIterator<Item = f64>) {
        self.set_domain(domain_of(values));
    }

    /// Returns `true` for time scales.
    pub fn is_time(&self) -> bool {
        matches!(self, Self::Time(_))
    }
}

impl From<ScaleLinear> for ScaleContinuous {
    fn from(value: ScaleLinear) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleTime> for ScaleContinuous {
    fn from(value: ScaleTime) -> Self {
        Self::Time(value)
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps everything to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    ///
    /// A degenerate range maps everything to the start of the domain.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (px - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Replaces the domain.
    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    /// Replaces the range.
    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    /// Sets the domain to the extent of `values` (see [`domain_of`]).
    pub fn configure_domain(&mut self, values: impl IntoIterator<Item = f64>) {
        self.domain = domain_of(values);
    }

    /// Returns "nice" tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        let eps = (hi - lo).abs() * 1.0e-9;
        nice_ticks(lo, hi, count)
            .into_iter()
            .filter(|t| *t >= lo - eps && *t <= hi + eps)
            .collect()
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    // Multiply rather than accumulate so ticks like 0.3 stay exact-ish.
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    #[allow(clippy::cast_possible_truncation, reason = "decimal exponents of f64 fit in i32")]
    let base = 10_f64.powi(power as i32);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A time scale: a linear scale over epoch seconds with calendar-aware ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp value into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Maps a range value back into a timestamp.
    pub fn invert(&self, px: f64) -> f64 {
        self.inner.invert(px)
    }

    /// Returns calendar-aligned tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.inner.domain();
        time::nice_time_ticks_seconds(d0, d1, count)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    /// Replaces the domain.
    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.inner.set_domain(domain);
    }

    /// Sets the domain to the extent of `values` (see [`domain_of`]).
    pub fn configure_domain(&mut self, values: impl IntoIterator<Item = f64>) {
        self.inner.configure_domain(values);
    }
}

/// A discrete band scale for categorical charts.
///
/// Padding follows the d3 convention: `padding_inner` is a fraction of the step between bands
/// and `padding_outer` a fraction of the step before the first and after the last band.
/// Bands are centered in the range.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand {
    labels: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a band scale with an empty domain and no padding.
    pub fn new(range: (f64, f64)) -> Self {
        Self {
            labels: Vec::new(),
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    /// Sets inner and outer padding.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Sets the inner padding.
    pub fn with_padding_inner(mut self, inner: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self
    }

    /// Replaces the domain with `labels`, keeping the first occurrence of duplicates.
    pub fn configure_domain<S: AsRef<str>>(&mut self, labels: impl IntoIterator<Item = S>) {
        self.labels.clear();
        for label in labels {
            let label = label.as_ref();
            if !self.labels.iter().any(|l| l == label) {
                self.labels.push(String::from(label));
            }
        }
    }

    /// Returns the domain labels in band order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the band index of `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Returns the start position of the band for `label`.
    pub fn map(&self, label: &str) -> Option<f64> {
        self.index_of(label).map(|i| self.x(i))
    }

    fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.labels.len() as f64;
        let denom = (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        (r1 - r0).abs() / denom
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the start position of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let lo = r0.min(r1);
        let n = self.labels.len() as f64;
        let step = self.step();
        let used = step * (n - self.padding_inner);
        let start = lo + ((r1 - r0).abs() - used) * 0.5;
        start + step * index as f64
    }
}

/// A categorical mapping from labels to output values (colors, symbols).
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOrdinal<T> {
    domain: Vec<String>,
    range: Vec<T>,
    unknown: T,
}

impl<T> ScaleOrdinal<T> {
    /// Creates an ordinal scale.
    ///
    /// Labels map to `range` by position, cycling if the range is shorter than the domain.
    /// Labels outside the domain map to `unknown`.
    pub fn new<S: Into<String>>(
        domain: impl IntoIterator<Item = S>,
        range: Vec<T>,
        unknown: T,
    ) -> Self {
        Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
            unknown,
        }
    }

    /// Returns the output for `label`.
    pub fn map(&self, label: &str) -> &T {
        match self.domain.iter().position(|d| d == label) {
            Some(i) if !self.range.is_empty() => &self.range[i % self.range.len()],
            _ => &self.unknown,
        }
    }

    /// Returns the domain labels.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// A threshold scale: `n` sorted thresholds split the number line into `n + 1` classes.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleThreshold<T> {
    thresholds: Vec<f64>,
    range: Vec<T>,
}

impl<T> ScaleThreshold<T> {
    /// Creates a threshold scale.
    ///
    /// Returns `None` unless `range` has exactly one more entry than `thresholds`.
    pub fn new(mut thresholds: Vec<f64>, range: Vec<T>) -> Option<Self> {
        if range.len() != thresholds.len() + 1 {
            return None;
        }
        thresholds.sort_by(f64::total_cmp);
        Some(Self { thresholds, range })
    }

    /// Returns the class of `v`. Values equal to a threshold fall in the upper class.
    ///
    /// `NaN` has no class.
    pub fn map(&self, v: f64) -> Option<&T> {
        if v.is_nan() {
            return None;
        }
        let i = self.thresholds.partition_point(|t| *t <= v);
        self.range.get(i)
    }

    /// Returns the output classes in ascending order.
    pub fn range(&self) -> &[T] {
        &self.range
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn empty_values_give_degenerate_domain() {
        assert_eq!(domain_of(core::iter::empty()), (0.0, 0.0));
        assert_eq!(domain_of([f64::NAN]), (0.0, 0.0));
        assert_eq!(domain_of([3.0, f64::NAN, -2.0]), (-2.0, 3.0));
    }

    #[test]
    fn linear_invert_is_inverse_of_map() {
        let s = ScaleLinear::new((10.0, 20.0), (0.0, 200.0));
        assert_eq!(s.map(15.0), 100.0);
        assert_eq!(s.invert(100.0), 15.0);
        let flipped = ScaleLinear::new((0.0, 50.0), (300.0, 0.0));
        assert!((flipped.invert(flipped.map(12.5)) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let s = ScaleLinear::new((0.0, 0.0), (5.0, 100.0));
        assert_eq!(s.map(42.0), 5.0);
    }

    #[test]
    fn band_scale_matches_inner_padding_layout() {
        let mut band = ScaleBand::new((0.0, 280.0)).with_padding_inner(0.2);
        band.configure_domain(["easy", "intermediate", "difficult", "easy"]);
        assert_eq!(band.count(), 3);
        // step = 280 / (3 - 0.2) = 100, bandwidth = 80
        assert!((band.band_width() - 80.0).abs() < 1e-9);
        assert_eq!(band.map("easy"), Some(0.0));
        assert_eq!(band.map("difficult"), Some(200.0));
        assert_eq!(band.map("extreme"), None);
    }

    #[test]
    fn ordinal_scale_falls_back_to_unknown() {
        let s = ScaleOrdinal::new(["easy", "difficult"], vec![1, 2], 0);
        assert_eq!(*s.map("difficult"), 2);
        assert_eq!(*s.map("extreme"), 0);
    }

    #[test]
    fn threshold_scale_buckets_values() {
        let s = ScaleThreshold::new(vec![0.5, 0.05], vec!["a", "b", "c"]).unwrap();
        assert_eq!(s.map(0.0), Some(&"a"));
        assert_eq!(s.map(0.05), Some(&"b"));
        assert_eq!(s.map(0.9), Some(&"c"));
        assert_eq!(s.map(f64::NAN), None);
        assert!(ScaleThreshold::new(vec![0.5], vec!["a"]).is_none());
    }
}
