// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value extents for scale domains.

/// Returns `(min, max)` over the finite values, or `None` if there are none.
pub fn extent<R>(data: &[R], value: impl Fn(&R) -> f64) -> Option<(f64, f64)> {
    data.iter()
        .map(value)
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Returns the largest finite value, or `None` if there are none.
pub fn max<R>(data: &[R], value: impl Fn(&R) -> f64) -> Option<f64> {
    extent(data, value).map(|(_, hi)| hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_skips_non_finite_values() {
        let data = [3.0, f64::NAN, -1.0, f64::INFINITY, 7.5];
        assert_eq!(extent(&data, |v| *v), Some((-1.0, 7.5)));
        assert_eq!(max(&data, |v| *v), Some(7.5));
    }

    #[test]
    fn extent_of_empty_is_none() {
        let data: [f64; 0] = [];
        assert_eq!(extent(&data, |v| *v), None);
    }
}
