// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time tick generation and formatting helpers.
//!
//! Time is a numeric value in **seconds since the Unix epoch (UTC)**. This module provides:
//! - "nice" tick steps from seconds up to years, with month and year ticks aligned to the
//!   calendar,
//! - formatting for tick labels (`1:05`, `Mar 04`, `Feb`, `2019`),
//! - proleptic Gregorian conversions between timestamps and civil dates.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
/// Seconds in one day.
pub const DAY: f64 = 24.0 * HOUR;
const MONTH_APPROX: f64 = 30.0 * DAY;
const YEAR_APPROX: f64 = 365.0 * DAY;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone, Copy, Debug, PartialEq)]
enum Step {
    Fixed(f64),
    Months(i64),
}

impl Step {
    fn approx_seconds(self) -> f64 {
        match self {
            Self::Fixed(s) => s,
            #[allow(clippy::cast_precision_loss, reason = "month counts are small")]
            Self::Months(m) => m as f64 * MONTH_APPROX,
        }
    }
}

const STEPS: &[Step] = &[
    Step::Fixed(1.0),
    Step::Fixed(5.0),
    Step::Fixed(15.0),
    Step::Fixed(30.0),
    Step::Fixed(MINUTE),
    Step::Fixed(5.0 * MINUTE),
    Step::Fixed(15.0 * MINUTE),
    Step::Fixed(30.0 * MINUTE),
    Step::Fixed(HOUR),
    Step::Fixed(3.0 * HOUR),
    Step::Fixed(6.0 * HOUR),
    Step::Fixed(12.0 * HOUR),
    Step::Fixed(DAY),
    Step::Fixed(2.0 * DAY),
    Step::Fixed(7.0 * DAY),
    Step::Months(1),
    Step::Months(3),
    Step::Months(6),
    Step::Months(12),
];

/// Returns "nice" tick values inside `[min, max]` for a domain in epoch seconds.
///
/// Month and year ticks fall on the first day of the month at 00:00 UTC.
pub fn nice_time_ticks_seconds(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }

    let target = (max - min) / count as f64;
    let step = STEPS
        .iter()
        .copied()
        .find(|s| s.approx_seconds() >= target)
        .unwrap_or_else(|| {
            let years = (target / YEAR_APPROX).ceil().max(1.0);
            #[allow(clippy::cast_possible_truncation, reason = "year spans are small")]
            let years = nice_years(years as i64);
            Step::Months(12 * years)
        });

    match step {
        Step::Fixed(s) => fixed_ticks(min, max, s),
        Step::Months(m) => month_ticks(min, max, m),
    }
}

fn nice_years(years: i64) -> i64 {
    let mut magnitude = 1;
    while magnitude * 10 < years {
        magnitude *= 10;
    }
    [1, 2, 5, 10]
        .into_iter()
        .map(|k| k * magnitude)
        .find(|&n| n >= years)
        .unwrap_or(10 * magnitude)
}

fn fixed_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    let start = (min / step).ceil() * step;
    let mut out = Vec::new();
    let mut i = 0_u32;
    loop {
        let t = start + step * f64::from(i);
        if t > max + 1.0e-9 || out.len() >= 10_000 {
            break;
        }
        out.push(t);
        i += 1;
    }
    out
}

fn month_ticks(min: f64, max: f64, months: i64) -> Vec<f64> {
    let (y, m, _) = civil_from_timestamp(min);
    // Months since year 0, aligned down to a multiple of `months`.
    let mut index = (y * 12 + i64::from(m) - 1).div_euclid(months) * months;
    let mut out = Vec::new();
    loop {
        let t = timestamp(index.div_euclid(12), month_of(index), 1);
        if t > max || out.len() >= 10_000 {
            break;
        }
        if t >= min {
            out.push(t);
        }
        index += months;
    }
    out
}

fn month_of(index: i64) -> u32 {
    #[allow(clippy::cast_possible_truncation, reason = "rem_euclid(12) is in 0..12")]
    {
        index.rem_euclid(12) as u32 + 1
    }
}

/// Formats a tick value (epoch seconds) given the tick step (seconds).
///
/// Sub-day steps format as clock time, day steps as `Mar 04`, month steps as the month name
/// (or the year in January), and year steps as the year.
pub fn format_time_seconds(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    let step = step.abs();
    if step >= DAY {
        let (y, m, d) = civil_from_timestamp(v);
        let name = MONTH_NAMES[(m - 1) as usize];
        return if step >= YEAR_APPROX * 0.9 || (step >= MONTH_APPROX * 0.9 && m == 1) {
            alloc::format!("{y}")
        } else if step >= MONTH_APPROX * 0.9 {
            String::from(name)
        } else {
            alloc::format!("{name} {d:02}")
        };
    }

    let sign = if v < 0.0 { "-" } else { "" };
    let secs = {
        let secs_f = v.abs().round() % DAY;
        #[allow(clippy::cast_possible_truncation, reason = "reduced modulo one day")]
        {
            secs_f as i64
        }
    };
    let h = secs / 3600;
    let m = (secs / 60) % 60;
    let s = secs % 60;

    if step >= HOUR || h > 0 {
        alloc::format!("{sign}{h}:{m:02}:{s:02}")
    } else if step >= MINUTE || m > 0 {
        alloc::format!("{sign}{m}:{s:02}")
    } else {
        alloc::format!("{sign}{s}")
    }
}

/// Formats a timestamp as `YYYY-MM-DD`.
pub fn format_date(v: f64) -> String {
    let (y, m, d) = civil_from_timestamp(v);
    alloc::format!("{y:04}-{m:02}-{d:02}")
}

/// Returns the epoch seconds of 00:00 UTC on the given civil date.
pub fn timestamp(year: i64, month: u32, day: u32) -> f64 {
    #[allow(clippy::cast_precision_loss, reason = "day counts are far below 2^52")]
    {
        days_from_civil(year, month, day) as f64 * DAY
    }
}

/// Returns the civil date `(year, month, day)` containing `t` (epoch seconds, UTC).
pub fn civil_from_timestamp(t: f64) -> (i64, u32, u32) {
    let days = (t / DAY).floor().clamp(-1.0e12, 1.0e12);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to a safe range")]
    {
        civil_from_days(days as i64)
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
pub fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let month = i64::from(month.clamp(1, 12));
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y.rem_euclid(400);
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Proleptic Gregorian date for a count of days since 1970-01-01.
pub fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i64::from(m <= 2);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "month is in 1..=12 and day in 1..=31"
    )]
    {
        (y, m as u32, d as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ticks_choose_minute_steps_for_minute_spans() {
        let ticks = nice_time_ticks_seconds(0.0, 300.0, 5);
        assert!(ticks.len() >= 2);
        let step = (ticks[1] - ticks[0]).abs();
        assert!(step >= 60.0);
    }

    #[test]
    fn time_format_seconds_minutes_hours() {
        assert_eq!(format_time_seconds(5.0, 1.0), "5");
        assert_eq!(format_time_seconds(65.0, 1.0), "1:05");
        assert_eq!(format_time_seconds(3723.0, 60.0), "1:02:03");
    }

    #[test]
    fn civil_round_trip_known_dates() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(2019, 1, 1), 17_897);
        assert_eq!(civil_from_days(17_897), (2019, 1, 1));
        assert_eq!(civil_from_days(days_from_civil(2000, 2, 29)), (2000, 2, 29));
        assert_eq!(format_date(timestamp(2016, 12, 31)), "2016-12-31");
    }

    #[test]
    fn multi_year_domains_tick_on_month_starts() {
        let min = timestamp(2018, 3, 15);
        let max = timestamp(2020, 6, 1);
        let ticks = nice_time_ticks_seconds(min, max, 10);
        assert!(!ticks.is_empty());
        for t in &ticks {
            let (_, m, d) = civil_from_timestamp(*t);
            assert_eq!(d, 1);
            assert_eq!((m - 1) % 3, 0);
            assert!(*t >= min && *t <= max);
        }
        assert_eq!(format_time_seconds(timestamp(2019, 1, 1), 90.0 * DAY), "2019");
        assert_eq!(format_time_seconds(timestamp(2019, 4, 1), 90.0 * DAY), "Apr");
    }
}
