// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An [`AxisSpec`] is a single axis type with an `orient` of `top`, `bottom`, `left` or
//! `right`. It reads its ticks from a configured scale (continuous or band) and emits rule and
//! text marks at the matching edge of the plot rectangle.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{BezPath, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use vizlink_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::format::format_tick_with_step;
use crate::measure::TextMeasurer;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleBand, ScaleContinuous};
use crate::time::format_time_seconds;
use crate::z_order;

/// Offset of tick rule ids from the axis id base.
const TICK_OFFSET: u64 = 1;
/// Offset of tick label ids from the axis id base.
const LABEL_OFFSET: u64 = 1_000;
/// Offset of gridline ids from the axis id base.
const GRID_OFFSET: u64 = 2_000;
/// Offset of the title id from the axis id base.
const TITLE_OFFSET: u64 = 9_000;

/// A paint + width pair for stroked paths (domain lines, ticks, gridlines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 10.0,
            title_fill: rule.brush,
            title_font_size: 11.0,
        }
    }
}

/// Gridline styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke style for gridlines.
    pub stroke: StrokeStyle,
    /// Distance the gridlines extend past the far edge of the plot.
    pub overshoot: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle {
                brush: Brush::Solid(css::BLACK.with_alpha(40.0 / 255.0)),
                stroke_width: 1.0,
            },
            overshoot: 0.0,
        }
    }
}

/// Axis orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed above the plot area.
    Top,
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
    /// A vertical axis placed to the right of the plot area.
    Right,
}

impl AxisOrient {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Sign of the outward normal (`+1` below/right of the plot, `-1` above/left).
    fn outward(self) -> f64 {
        match self {
            Self::Bottom | Self::Right => 1.0,
            Self::Top | Self::Left => -1.0,
        }
    }
}

/// The scale an axis reads its ticks from.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisScale {
    /// Numeric or time ticks.
    Continuous(ScaleContinuous),
    /// One tick per band, centered in the band.
    Band(ScaleBand),
}

impl From<ScaleContinuous> for AxisScale {
    fn from(value: ScaleContinuous) -> Self {
        Self::Continuous(value)
    }
}

impl From<ScaleBand> for AxisScale {
    fn from(value: ScaleBand) -> Self {
        Self::Band(value)
    }
}

impl AxisScale {
    fn range(&self) -> (f64, f64) {
        match self {
            Self::Continuous(s) => s.range(),
            Self::Band(s) => s.range(),
        }
    }
}

/// One resolved tick: its position along the axis and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Position along the axis, in scene coordinates.
    pub pos: f64,
    /// Formatted label.
    pub label: String,
}

/// Formatter for continuous tick labels: `(value, step) -> label`.
pub type TickFormatter = Arc<dyn Fn(f64, f64) -> String>;
/// Formatter for band tick labels.
pub type LabelFormatter = Arc<dyn Fn(&str) -> String>;

/// An axis specification (single type + `orient`).
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// The configured scale.
    pub scale: AxisScale,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks for continuous scales.
    pub tick_count: usize,
    /// Tick line length in pixels, pointing away from the plot.
    pub tick_size: f64,
    /// Gap between the tick end and the tick label.
    pub tick_padding: f64,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional gridline styling.
    ///
    /// If `Some`, gridline marks are generated across the plot area.
    pub grid: Option<GridStyle>,
    /// Optional axis title text.
    pub title: Option<String>,
    /// Distance from tick labels to the title.
    pub title_offset: f64,
    /// Optional continuous tick label formatter.
    ///
    /// The second argument is the tick step, which can be used for consistent decimals.
    pub tick_formatter: Option<TickFormatter>,
    /// Optional band label formatter.
    pub label_formatter: Option<LabelFormatter>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("show_domain", &self.show_domain)
            .field("style", &self.style)
            .field("grid", &self.grid)
            .field("title", &self.title)
            .field("title_offset", &self.title_offset)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .field("label_formatter", &self.label_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates a new axis specification.
    ///
    /// The returned axis has:
    /// - `tick_count = 10`
    /// - `tick_size = 6`
    /// - `tick_padding = 3`
    /// - a domain line, `style = AxisStyle::default()`
    /// - no title and no grid.
    pub fn new(id_base: u64, scale: impl Into<AxisScale>, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            show_domain: true,
            style: AxisStyle::default(),
            grid: None,
            title: None,
            title_offset: 10.0,
            tick_formatter: None,
            label_formatter: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `top` axis.
    pub fn top(id_base: u64, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale, AxisOrient::Top)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Convenience constructor for a `right` axis.
    pub fn right(id_base: u64, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale, AxisOrient::Right)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set tick size in scene coordinates.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Set tick padding in scene coordinates.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Enable or disable the axis domain line.
    pub fn with_domain(mut self, domain: bool) -> Self {
        self.show_domain = domain;
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable gridlines using the provided style.
    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title offset in scene coordinates.
    pub fn with_title_offset(mut self, title_offset: f64) -> Self {
        self.title_offset = title_offset;
        self
    }

    /// Set a custom continuous tick formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Set a custom band label formatter.
    pub fn with_label_formatter(mut self, f: impl Fn(&str) -> String + 'static) -> Self {
        self.label_formatter = Some(Arc::new(f));
        self
    }

    /// Replaces the scale, keeping every other setting.
    ///
    /// Views call this after reconfiguring a domain so the next [`AxisSpec::marks`] call
    /// reflects it.
    pub fn set_scale(&mut self, scale: impl Into<AxisScale>) {
        self.scale = scale.into();
    }

    /// Returns the resolved ticks in axis order.
    pub fn ticks(&self) -> Vec<AxisTick> {
        match &self.scale {
            AxisScale::Continuous(s) => {
                let values = s.ticks(self.tick_count);
                let step = tick_step(&values);
                values
                    .iter()
                    .map(|&v| AxisTick {
                        pos: s.map(v),
                        label: self.format_value(s, v, step),
                    })
                    .collect()
            }
            AxisScale::Band(s) => {
                let half = s.band_width() * 0.5;
                s.labels()
                    .iter()
                    .enumerate()
                    .map(|(i, l)| AxisTick {
                        pos: s.x(i) + half,
                        label: match &self.label_formatter {
                            Some(f) => f(l),
                            None => l.clone(),
                        },
                    })
                    .collect()
            }
        }
    }

    fn format_value(&self, scale: &ScaleContinuous, v: f64, step: f64) -> String {
        if let Some(f) = &self.tick_formatter {
            return f(v, step);
        }
        if scale.is_time() {
            format_time_seconds(v, step)
        } else {
            format_tick_with_step(v, step)
        }
    }

    /// Estimates the thickness this axis needs along its normal direction.
    ///
    /// Margins are usually fixed by the caller; this is for checking that labels fit.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let horizontal = self.orient.is_horizontal();
        let label_extent = self
            .ticks()
            .iter()
            .map(|t| {
                let m = measurer.measure(&t.label, self.style.label_font_size);
                if horizontal { m.height } else { m.width }
            })
            .fold(0.0_f64, f64::max);
        let mut out = self.tick_size.max(0.0) + self.tick_padding.max(0.0) + label_extent;
        if self.title.is_some() {
            out += self.title_offset.max(0.0) + self.style.title_font_size;
        }
        out
    }

    /// Generates axis marks along the matching edge of `plot`.
    ///
    /// Ids are `id_base` for the domain line, then fixed offsets for ticks, labels, gridlines
    /// and the title, so re-rendering after a domain change updates marks in place.
    pub fn marks(&self, plot: Rect) -> Vec<Mark> {
        let ticks = self.ticks();
        let horizontal = self.orient.is_horizontal();
        let out_sign = self.orient.outward();
        let edge = match self.orient {
            AxisOrient::Top => plot.y0,
            AxisOrient::Bottom => plot.y1,
            AxisOrient::Left => plot.x0,
            AxisOrient::Right => plot.x1,
        };
        let rule = &self.style.rule;
        let mut out = Vec::with_capacity(ticks.len() * 3 + 2);

        if self.show_domain {
            let (r0, r1) = self.scale.range();
            let outer = out_sign * self.tick_size;
            let mut p = BezPath::new();
            if horizontal {
                p.move_to((r0, edge + outer));
                p.line_to((r0, edge));
                p.line_to((r1, edge));
                p.line_to((r1, edge + outer));
            } else {
                p.move_to((edge + outer, r0));
                p.line_to((edge, r0));
                p.line_to((edge, r1));
                p.line_to((edge + outer, r1));
            }
            out.push(
                Mark::builder(MarkId::from_raw(self.id_base))
                    .path()
                    .z_index(z_order::AXIS_RULES)
                    .geometry(p)
                    .fill(peniko::Color::TRANSPARENT)
                    .stroke(rule.brush.clone())
                    .stroke_width(rule.stroke_width)
                    .build(),
            );
        }

        let tick_end = edge + out_sign * self.tick_size;
        let label_at = edge + out_sign * (self.tick_size.max(0.0) + self.tick_padding);
        for (i, tick) in ticks.iter().enumerate() {
            let i = i as u64;
            let tick_id = MarkId::from_raw(self.id_base + TICK_OFFSET + i);
            let rule_spec = if horizontal {
                RuleMarkSpec::vertical(tick_id, tick.pos, edge, tick_end)
            } else {
                RuleMarkSpec::horizontal(tick_id, tick.pos, edge, tick_end)
            };
            out.push(
                rule_spec
                    .with_stroke(rule.brush.clone(), rule.stroke_width)
                    .with_z_index(z_order::AXIS_RULES)
                    .mark(),
            );

            let (x, y, anchor, baseline) = match self.orient {
                AxisOrient::Bottom => {
                    (tick.pos, label_at, TextAnchor::Middle, TextBaseline::Hanging)
                }
                AxisOrient::Top => {
                    (tick.pos, label_at, TextAnchor::Middle, TextBaseline::Alphabetic)
                }
                AxisOrient::Left => (label_at, tick.pos, TextAnchor::End, TextBaseline::Middle),
                AxisOrient::Right => {
                    (label_at, tick.pos, TextAnchor::Start, TextBaseline::Middle)
                }
            };
            out.push(
                Mark::builder(MarkId::from_raw(self.id_base + LABEL_OFFSET + i))
                    .text()
                    .z_index(z_order::AXIS_LABELS)
                    .x(x)
                    .y(y)
                    .content(tick.label.clone())
                    .font_size(self.style.label_font_size)
                    .text_anchor(anchor)
                    .text_baseline(baseline)
                    .fill(self.style.label_fill.clone())
                    .build(),
            );

            if let Some(grid) = &self.grid {
                let grid_id = MarkId::from_raw(self.id_base + GRID_OFFSET + i);
                let (g0, g1) = match self.orient {
                    AxisOrient::Bottom => (plot.y1, plot.y0 - grid.overshoot),
                    AxisOrient::Top => (plot.y0, plot.y1 + grid.overshoot),
                    AxisOrient::Left => (plot.x0, plot.x1 + grid.overshoot),
                    AxisOrient::Right => (plot.x1, plot.x0 - grid.overshoot),
                };
                let spec = if horizontal {
                    RuleMarkSpec::vertical(grid_id, tick.pos, g0, g1)
                } else {
                    RuleMarkSpec::horizontal(grid_id, tick.pos, g0, g1)
                };
                out.push(
                    spec.with_stroke(grid.stroke.brush.clone(), grid.stroke.stroke_width)
                        .with_z_index(z_order::GRID_LINES)
                        .mark(),
                );
            }
        }

        if let Some(title) = &self.title {
            let off = label_at + out_sign * (self.style.label_font_size + self.title_offset);
            let (r0, r1) = self.scale.range();
            let mid = (r0 + r1) * 0.5;
            let builder = Mark::builder(MarkId::from_raw(self.id_base + TITLE_OFFSET))
                .text()
                .z_index(z_order::AXIS_TITLES)
                .content(title.clone())
                .font_size(self.style.title_font_size)
                .text_anchor_middle()
                .fill(self.style.title_fill.clone());
            let builder = if horizontal {
                builder.x(mid).y(off).text_baseline(if out_sign > 0.0 {
                    TextBaseline::Hanging
                } else {
                    TextBaseline::Alphabetic
                })
            } else {
                builder.x(off).y(mid).angle(-90.0)
            };
            out.push(builder.build());
        }

        out
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use vizlink_core::MarkPayload;

    use super::*;
    use crate::format::capitalize;
    use crate::scale::ScaleLinear;

    fn labels(marks: &[Mark]) -> Vec<String> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn band_axis_centers_ticks_and_formats_labels() {
        let mut band = ScaleBand::new((0.0, 280.0)).with_padding_inner(0.2);
        band.configure_domain(["easy", "intermediate", "difficult"]);
        let axis = AxisSpec::bottom(100, band).with_label_formatter(capitalize);

        let ticks = axis.ticks();
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[0].pos, 40.0);
        assert_eq!(ticks[2].pos, 240.0);

        let marks = axis.marks(Rect::new(0.0, 0.0, 280.0, 200.0));
        assert_eq!(labels(&marks), ["Easy", "Intermediate", "Difficult"]);
        assert!(marks.iter().any(|m| m.id == MarkId::from_raw(100)));
    }

    #[test]
    fn continuous_axis_ids_are_stable_across_domain_changes() {
        let plot = Rect::new(10.0, 10.0, 210.0, 110.0);
        let mut scale = ScaleContinuous::Linear(ScaleLinear::new((0.0, 10.0), (110.0, 10.0)));
        let mut axis = AxisSpec::left(0, scale.clone()).with_tick_count(6);
        let a = axis.marks(plot);

        scale.set_domain((0.0, 20.0));
        axis.set_scale(scale);
        let b = axis.marks(plot);

        assert!(a.iter().any(|m| m.id == MarkId::from_raw(LABEL_OFFSET)));
        assert!(b.iter().any(|m| m.id == MarkId::from_raw(LABEL_OFFSET)));
        assert_eq!(labels(&b).last().map(String::as_str), Some("20"));
    }

    #[test]
    fn grid_lines_span_the_plot() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let scale = ScaleContinuous::Linear(ScaleLinear::new((0.0, 10.0), (0.0, 100.0)));
        let grid = GridStyle {
            overshoot: 10.0,
            ..GridStyle::default()
        };
        let axis = AxisSpec::bottom(0, scale)
            .with_tick_count(2)
            .with_grid(grid)
            .with_domain(false);
        let marks = axis.marks(plot);
        let g = marks
            .iter()
            .find(|m| m.id == MarkId::from_raw(GRID_OFFSET))
            .unwrap();
        let b = g.payload.bounds().unwrap();
        assert_eq!((b.y0, b.y1), (-10.0, 50.0));
        assert!(!marks.iter().any(|m| m.id == MarkId::from_raw(0)));
    }
}
