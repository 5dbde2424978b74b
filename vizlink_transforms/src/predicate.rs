// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection predicates.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// An ordered set of category labels.
///
/// Order is the order in which labels were inserted; duplicates are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategorySet {
    labels: Vec<String>,
}

impl CategorySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `label`, returning `false` if it was already present.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.contains(&label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    /// Removes `label`, returning `true` if it was present.
    pub fn remove(&mut self, label: &str) -> bool {
        let before = self.labels.len();
        self.labels.retain(|l| l != label);
        self.labels.len() != before
    }

    /// Returns `true` if `label` is in the set.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns the labels in insertion order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl<S: Into<String>> FromIterator<S> for CategorySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

/// A filter predicate produced by one view's interaction and consumed by its siblings.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Keep records whose category is in the set. An empty set keeps everything.
    Categories(CategorySet),
    /// Keep records whose value lies in `[start, end]` (bounds in either order).
    Interval {
        /// One end of the interval.
        start: f64,
        /// The other end of the interval.
        end: f64,
    },
}

impl Predicate {
    /// Tests a category label.
    ///
    /// Interval predicates accept every category.
    pub fn accepts_category(&self, category: &str) -> bool {
        match self {
            Self::Categories(set) => set.is_empty() || set.contains(category),
            Self::Interval { .. } => true,
        }
    }

    /// Tests a numeric value.
    ///
    /// Category predicates accept every value. `NaN` never lies in an interval.
    pub fn accepts_value(&self, value: f64) -> bool {
        match *self {
            Self::Categories(_) => true,
            Self::Interval { start, end } => {
                let (lo, hi) = if start <= end {
                    (start, end)
                } else {
                    (end, start)
                };
                value >= lo && value <= hi
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_labels_keep_first_position() {
        let mut set: CategorySet = ["easy", "difficult", "easy"].into_iter().collect();
        assert_eq!(set.labels(), ["easy", "difficult"]);
        assert!(set.remove("easy"));
        assert!(!set.remove("easy"));
        assert!(set.insert("easy"));
        assert_eq!(set.labels(), ["difficult", "easy"]);
    }

    #[test]
    fn empty_category_predicate_accepts_anything() {
        let p = Predicate::Categories(CategorySet::new());
        assert!(p.accepts_category("anything"));
        assert!(p.accepts_value(f64::NAN));
    }

    #[test]
    fn interval_accepts_reversed_bounds_and_rejects_nan() {
        let p = Predicate::Interval {
            start: 10.0,
            end: 2.0,
        };
        assert!(p.accepts_value(5.0));
        assert!(!p.accepts_value(11.0));
        assert!(!p.accepts_value(f64::NAN));
    }
}
