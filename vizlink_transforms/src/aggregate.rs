// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Count rollups.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

/// The number of records sharing one category label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCount {
    /// Category label.
    pub key: String,
    /// Number of records with this label.
    pub count: usize,
}

/// Counts records by category.
///
/// Categories listed in `order` come first, in that order, when they occur in `data`.
/// Categories not listed follow in first-seen order. Categories with no records are omitted.
pub fn count_by<R>(data: &[R], key: impl Fn(&R) -> &str, order: &[&str]) -> Vec<CategoryCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<CategoryCount> = Vec::new();
    for r in data {
        let k = key(r);
        if let Some(&i) = index.get(k) {
            out[i].count += 1;
        } else {
            index.insert(k, out.len());
            out.push(CategoryCount {
                key: String::from(k),
                count: 1,
            });
        }
    }
    // Stable: unlisted categories keep first-seen order.
    out.sort_by_key(|c| {
        order
            .iter()
            .position(|o| *o == c.key)
            .unwrap_or(order.len())
    });
    out
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn count(key: &str, count: usize) -> CategoryCount {
        CategoryCount {
            key: String::from(key),
            count,
        }
    }

    #[test]
    fn counts_in_first_seen_order() {
        let data = ["easy", "easy", "difficult"];
        assert_eq!(
            count_by(&data, |d| d, &[]),
            vec![count("easy", 2), count("difficult", 1)]
        );
    }

    #[test]
    fn explicit_order_wins_and_unknown_categories_trail() {
        let data = ["extreme", "difficult", "easy", "intermediate", "easy"];
        let got = count_by(&data, |d| d, &["easy", "intermediate", "difficult"]);
        assert_eq!(
            got,
            vec![
                count("easy", 2),
                count("intermediate", 1),
                count("difficult", 1),
                count("extreme", 1),
            ]
        );
    }

    #[test]
    fn empty_input_has_no_counts() {
        let data: [&str; 0] = [];
        assert!(count_by(&data, |d| d, &["easy"]).is_empty());
    }
}
