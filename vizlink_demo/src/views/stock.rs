// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closing prices as a focus line above a brushable context area.
//!
//! Both plots live in one container coordinate system but render into separate scenes, so a
//! brush re-renders the focus scene while the context area stays untouched.

use std::rc::Rc;

use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;
use vizlink_charts::{
    AreaMarkSpec, AxisSpec, BrushEvent, FocusContext, LineMarkSpec, PointerTracker,
    ScaleContinuous, ScaleLinear, ScaleTime, StrokeStyle, TooltipAnchor, domain_of,
};
use vizlink_core::{MarkDiff, MarkId, Scene};
use vizlink_transforms::filter_interval;

use crate::config::StockConfig;
use crate::data::{StockRecord, parse_date};
use crate::error::Result;
use crate::svg::SvgScene;

const LINE: MarkId = MarkId::from_raw(1);
const AREA: MarkId = MarkId::from_raw(1);
const X_AXIS: u64 = 10_000;
const Y_AXIS: u64 = 20_000;
const TOOLTIP: u64 = 30_000;
const BRUSH: u64 = 40_000;

/// Focus+context view of a price series.
#[derive(Debug)]
pub struct StockView {
    config: StockConfig,
    data: Rc<[StockRecord]>,
    container: (f64, f64),
    focus_plot: Rect,
    context_plot: Rect,
    fc: FocusContext,
    y_focus: ScaleContinuous,
    y_context: ScaleContinuous,
    x_axis_focus: AxisSpec,
    y_axis_focus: AxisSpec,
    x_axis_context: AxisSpec,
    pointer: PointerTracker,
    default_start: f64,
    focus: Scene,
    context: Scene,
}

impl StockView {
    /// Lays out both plots; call [`StockView::update_vis`] to draw them.
    ///
    /// `config.view` holds the focus plot size; the container adds the focus margins.
    pub fn new(config: StockConfig, data: Rc<[StockRecord]>) -> Result<Self> {
        let default_start = parse_date(&config.default_start)?;
        let (w, h) = (config.view.width, config.view.height);
        let m = config.view.margin;
        let cm = config.context_margin;
        let container = (w + m.left + m.right, h + m.top + m.bottom);
        let focus_plot = Rect::new(m.left, m.top, m.left + w, m.top + h);
        let context_plot = Rect::new(cm.left, cm.top, cm.left + w, cm.top + config.context_height);

        let x_context = ScaleContinuous::Time(ScaleTime::new(
            (0.0, 1.0),
            (context_plot.x0, context_plot.x1),
        ));
        let x_focus = ScaleContinuous::Time(ScaleTime::new(
            (0.0, 1.0),
            (focus_plot.x0, focus_plot.x1),
        ));
        let fc = FocusContext::new(x_context, x_focus);
        let y_focus = ScaleContinuous::Linear(ScaleLinear::new(
            (0.0, 1.0),
            (focus_plot.y1, focus_plot.y0),
        ));
        let y_context = ScaleContinuous::Linear(ScaleLinear::new(
            (0.0, 1.0),
            (context_plot.y1, context_plot.y0),
        ));
        Ok(Self {
            x_axis_focus: AxisSpec::bottom(X_AXIS, *fc.focus_scale()),
            y_axis_focus: AxisSpec::left(Y_AXIS, y_focus),
            x_axis_context: AxisSpec::bottom(X_AXIS, *fc.context_scale()),
            config,
            data,
            container,
            focus_plot,
            context_plot,
            fc,
            y_focus,
            y_context,
            pointer: PointerTracker::new(),
            default_start,
            focus: Scene::new(),
            context: Scene::new(),
        })
    }

    /// Sets the domains from the data, draws both plots and applies the default brush
    /// selection (from the configured start date to the right edge of the context).
    pub fn update_vis(&mut self) -> Vec<BrushEvent> {
        let x = domain_of(self.data.iter().map(|d| d.date));
        let y = domain_of(self.data.iter().map(|d| d.close));
        self.fc.set_full_domain(x);
        self.y_focus.set_domain(y);
        self.y_context.set_domain(y);
        self.y_axis_focus.set_scale(self.y_focus);
        self.x_axis_context.set_scale(*self.fc.context_scale());
        self.render_context();
        self.render_focus();

        let start = self.fc.context_scale().map(self.default_start);
        let end = self.fc.context_scale().range().1;
        self.brush_to(Some((start, end)))
    }

    /// Moves the brush to a pixel selection of the context plot (`None` clears it).
    pub fn brush_to(&mut self, selection: Option<(f64, f64)>) -> Vec<BrushEvent> {
        let events = self.fc.brush_to(selection);
        self.render_focus();
        self.render_context();
        events
    }

    /// Clears the brush, restoring the full domain in the focus plot.
    pub fn clear_brush(&mut self) -> Vec<BrushEvent> {
        self.brush_to(None)
    }

    /// Tracks the pointer at container x `px` over the focus plot.
    ///
    /// Positions outside the plot count as leaving it.
    pub fn pointer_move(&mut self, px: f64) -> Option<TooltipAnchor> {
        if !(self.focus_plot.x0..=self.focus_plot.x1).contains(&px) {
            self.pointer_leave();
            return None;
        }
        self.pointer
            .track(px, self.fc.focus_scale(), &self.data[..], |d| d.date);
        self.render_focus();
        self.tooltip()
    }

    /// Hides the tooltip.
    pub fn pointer_leave(&mut self) {
        self.pointer.leave();
        self.render_focus();
    }

    /// Returns the tooltip for the record under the pointer.
    pub fn tooltip(&self) -> Option<TooltipAnchor> {
        let (x, y) = (self.fc.focus_scale(), &self.y_focus);
        self.pointer.anchor(
            &self.data[..],
            |d| Point::new(x.map(d.date), y.map(d.close)),
            |d| format!("{}", d.close.round()),
        )
    }

    /// Redraws the focus plot: clipped line, axes and tooltip.
    pub fn render_focus(&mut self) -> Vec<MarkDiff> {
        let x = *self.fc.focus_scale();
        self.x_axis_focus.set_scale(x);
        let line = LineMarkSpec::new(LINE, x, self.y_focus)
            .with_stroke(StrokeStyle::solid(css::STEEL_BLUE, 1.5))
            .mark(visible_points(&self.data, self.fc.focus_domain()));
        let mut marks = vec![line];
        marks.extend(self.x_axis_focus.marks(self.focus_plot));
        marks.extend(self.y_axis_focus.marks(self.focus_plot));
        if let Some(anchor) = self.tooltip() {
            marks.extend(anchor.marks(TOOLTIP));
        }
        self.focus.tick(marks)
    }

    /// Redraws the context plot: area, axis and brush.
    pub fn render_context(&mut self) -> Vec<MarkDiff> {
        let area = AreaMarkSpec::new(AREA, *self.fc.context_scale(), self.y_context)
            .with_baseline_px(self.context_plot.y1)
            .with_fill(Color::from_rgb8(0xc6, 0xdb, 0xef))
            .mark(self.data.iter().map(|d| (d.date, d.close)));
        let mut marks = vec![area];
        marks.extend(self.x_axis_context.marks(self.context_plot));
        marks.extend(
            self.fc
                .brush()
                .marks(BRUSH, self.context_plot.y0, self.context_plot.y1),
        );
        self.context.tick(marks)
    }

    /// Returns the focus+context controller.
    pub fn focus_context(&self) -> &FocusContext {
        &self.fc
    }

    /// Returns the focus scene.
    pub fn focus_scene(&self) -> &Scene {
        &self.focus
    }

    /// Returns the context scene.
    pub fn context_scene(&self) -> &Scene {
        &self.context
    }

    /// Returns the focus plot rectangle in container coordinates.
    pub fn focus_plot(&self) -> Rect {
        self.focus_plot
    }

    /// Returns the context plot rectangle in container coordinates.
    pub fn context_plot(&self) -> Rect {
        self.context_plot
    }

    /// Serializes both plots into one document; the focus line is clipped to its plot.
    pub fn to_svg(&self) -> String {
        let mut svg = SvgScene::new(
            &self.config.view.parent_element,
            self.container.0,
            self.container.1,
        );
        svg.push_scene_clipped(&self.focus, Some(self.focus_plot), |id| id == LINE)
            .push_scene(&self.context);
        svg.to_svg_string()
    }
}

/// Returns the points inside `domain` plus one neighbor on each side, so the clipped line
/// still reaches the plot edges.
fn visible_points(data: &[StockRecord], domain: (f64, f64)) -> Vec<(f64, f64)> {
    let inside = filter_interval(data, domain.0, domain.1, |d| d.date);
    let (lo, hi) = match (inside.first(), inside.last()) {
        (Some(&first), Some(&last)) => (first.saturating_sub(1), last + 2),
        // No record inside: keep the pair straddling the domain.
        _ => {
            let before = data.iter().take_while(|d| d.date < domain.0).count();
            (before.saturating_sub(1), before + 1)
        }
    };
    let hi = hi.min(data.len());
    data[lo.min(hi)..hi]
        .iter()
        .map(|d| (d.date, d.close))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarginConfig;

    fn records() -> Vec<StockRecord> {
        (0..10)
            .map(|i| StockRecord {
                date: f64::from(i) * 10.0,
                close: f64::from(i),
            })
            .collect()
    }

    #[test]
    fn context_follows_its_own_margins() {
        let config = StockConfig {
            context_margin: MarginConfig::new(280.0, 10.0, 20.0, 145.0),
            ..StockConfig::default()
        };
        let mut view = StockView::new(config, records().into()).unwrap();
        view.update_vis();

        let plot = view.context_plot();
        assert_eq!(plot.x0, 145.0);
        let fc = view.focus_context();
        assert_eq!(fc.context_scale().range(), (plot.x0, plot.x1));
        assert_eq!(fc.brush().extent(), (plot.x0, plot.x1));
        assert_eq!(fc.focus_scale().range(), (45.0, 845.0));

        let area = view.context_scene().get(AREA).and_then(|m| m.payload.bounds());
        let area = area.expect("area drawn");
        assert!((area.x0 - plot.x0).abs() < 1e-9, "{area:?}");
        assert!((area.x1 - plot.x1).abs() < 1e-9, "{area:?}");
    }

    #[test]
    fn visible_points_keep_one_neighbor() {
        let data = records();
        let pts = visible_points(&data, (25.0, 45.0));
        assert_eq!(pts.first().map(|p| p.0), Some(20.0));
        assert_eq!(pts.last().map(|p| p.0), Some(50.0));
        assert_eq!(visible_points(&data, (0.0, 90.0)).len(), 10);
        assert!(visible_points(&[], (0.0, 1.0)).is_empty());
    }

    #[test]
    fn domain_between_records_keeps_the_straddling_pair() {
        let data = records();
        let pts = visible_points(&data, (33.0, 37.0));
        assert_eq!(pts, vec![(30.0, 3.0), (40.0, 4.0)]);
        let before = visible_points(&data, (-20.0, -10.0));
        assert_eq!(before, vec![(0.0, 0.0)]);
        let after = visible_points(&data, (120.0, 130.0));
        assert_eq!(after, vec![(90.0, 9.0)]);
    }
}
