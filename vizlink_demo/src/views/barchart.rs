// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trail counts per difficulty. Clicking a bar toggles it; the active bars form the category
//! selection broadcast to sibling views.

use std::rc::Rc;

use kurbo::Point;
use peniko::Color;
use vizlink_charts::{
    AxisSpec, BarMarkSpec, ChartLayout, ScaleBand, ScaleContinuous, ScaleLinear, ScaleOrdinal,
    TextMarkSpec, active_labels, capitalize,
};
use vizlink_core::{Mark, MarkDiff, MarkId, Scene, TableId};
use vizlink_transforms::{CategoryCount, count_by};

use crate::config::ViewConfig;
use crate::data::Trail;
use crate::svg::SvgScene;
use crate::views::DIFFICULTIES;

const BARS: TableId = TableId(1);
const X_AXIS: u64 = 10_000;
const Y_AXIS: u64 = 20_000;
const TITLE: u64 = 30_000;

/// Bar chart of trail counts per difficulty.
#[derive(Debug)]
pub struct Barchart {
    config: ViewConfig,
    layout: ChartLayout,
    colors: ScaleOrdinal<Color>,
    data: Rc<[Trail]>,
    counts: Vec<CategoryCount>,
    x: ScaleBand,
    y: ScaleContinuous,
    x_axis: AxisSpec,
    y_axis: AxisSpec,
    scene: Scene,
}

impl Barchart {
    /// Creates the view; call [`Barchart::update_vis`] to draw it.
    pub fn new(config: ViewConfig, colors: ScaleOrdinal<Color>, data: Rc<[Trail]>) -> Self {
        let layout = config.layout();
        let x = ScaleBand::new(layout.x_range()).with_padding_inner(0.2);
        let y = ScaleContinuous::Linear(ScaleLinear::new((0.0, 1.0), layout.y_range()));
        let x_axis = AxisSpec::bottom(X_AXIS, x.clone()).with_label_formatter(capitalize);
        let y_axis = AxisSpec::left(Y_AXIS, y).with_tick_count(6);
        Self {
            config,
            layout,
            colors,
            data,
            counts: Vec::new(),
            x,
            y,
            x_axis,
            y_axis,
            scene: Scene::new(),
        }
    }

    /// Re-aggregates the data and redraws.
    pub fn update_vis(&mut self) -> Vec<MarkDiff> {
        self.counts = count_by(&self.data[..], |t| t.difficulty.as_str(), &DIFFICULTIES);
        self.x.configure_domain(self.counts.iter().map(|c| c.key.as_str()));
        #[allow(clippy::cast_precision_loss, reason = "row counts are small")]
        let max = self.counts.iter().map(|c| c.count).max().unwrap_or(0) as f64;
        self.y.set_domain((0.0, max));
        self.x_axis.set_scale(self.x.clone());
        self.y_axis.set_scale(self.y);
        self.render_vis()
    }

    /// Rebuilds the marks from the current aggregation.
    pub fn render_vis(&mut self) -> Vec<MarkDiff> {
        self.scene.bind(BARS, &self.counts, |c| c.key.as_str());
        let spec = BarMarkSpec::new(self.x.clone(), self.y).with_baseline(0.0);
        let counts = &self.counts;
        let colors = &self.colors;
        let mut marks = match self.scene.row_marks(BARS, |id, _, row| {
            let c = &counts[row];
            #[allow(clippy::cast_precision_loss, reason = "row counts are small")]
            let value = c.count as f64;
            spec.mark(id, &c.key, value, Some((*colors.map(&c.key)).into()))
                .unwrap_or_else(|| Mark::builder(id).rect().build())
        }) {
            Ok(marks) => marks,
            Err(err) => {
                tracing::error!(%err, "barchart render");
                Vec::new()
            }
        };
        marks.extend(self.x_axis.marks(self.layout.plot));
        marks.extend(self.y_axis.marks(self.layout.plot));
        marks.push(TextMarkSpec::title(MarkId::from_raw(TITLE), Point::ZERO, "Trails").mark());
        self.scene.tick(marks)
    }

    /// Handles a click at `point`.
    ///
    /// Toggles the bar under the pointer and returns the new selection, or `None` if the click
    /// missed every bar. Axes and titles drawn over a bar do not intercept the click.
    pub fn click(&mut self, point: Point) -> Option<Vec<String>> {
        let id = self.scene.hit_test_rows(point, BARS)?;
        self.toggle(id)
    }

    /// Toggles the bar of `label`, however short it is drawn.
    ///
    /// Returns `None` for a label without a bar.
    pub fn click_category(&mut self, label: &str) -> Option<Vec<String>> {
        let key = self.scene.label_key(label)?;
        self.toggle(MarkId::for_row(BARS, key))
    }

    fn toggle(&mut self, id: MarkId) -> Option<Vec<String>> {
        let active = self.scene.toggle_active(id)?;
        let selected = self.selected();
        tracing::debug!(?selected, active, "bar click");
        Some(selected)
    }

    /// Returns the active categories in display order.
    pub fn selected(&self) -> Vec<String> {
        active_labels(&self.scene, BARS)
    }

    /// Returns the aggregation shown by the bars.
    pub fn counts(&self) -> &[CategoryCount] {
        &self.counts
    }

    /// Returns the render surface.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Serializes the current state.
    pub fn to_svg(&self) -> String {
        let config = &self.config;
        let mut svg = SvgScene::new(&config.parent_element, config.width, config.height);
        svg.push_scene(&self.scene);
        svg.to_svg_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TrailsConfig, trail_colors};

    fn trail(difficulty: &str) -> Trail {
        Trail {
            trail: format!("{difficulty} trail"),
            region: "North Shore".into(),
            difficulty: difficulty.into(),
            distance: 5.0,
            time: 2.0,
            season: "Year-round".into(),
        }
    }

    fn barchart(data: Vec<Trail>) -> Barchart {
        let colors = trail_colors().build().unwrap();
        let mut chart = Barchart::new(TrailsConfig::default().barchart, colors, data.into());
        chart.update_vis();
        chart
    }

    #[test]
    fn sub_pixel_bars_are_selectable_by_label() {
        let mut data = vec![trail("easy")];
        data.extend((0..2000).map(|_| trail("difficult")));
        let mut chart = barchart(data);
        assert_eq!(chart.click_category("easy"), Some(vec!["easy".to_owned()]));
        assert_eq!(chart.click_category("easy"), Some(Vec::new()));
        assert_eq!(chart.click_category("nonexistent"), None);
    }

    #[test]
    fn only_bars_respond_to_clicks() {
        let mut chart = barchart(vec![trail("easy"), trail("easy"), trail("difficult")]);
        let plot = chart.layout.plot;
        let x = chart.x.map("easy").unwrap() + chart.x.band_width() * 0.5;
        assert_eq!(
            chart.click(Point::new(x, plot.y1 - 1.0)),
            Some(vec!["easy".to_owned()])
        );
        // The title and the axis labels sit outside every bar.
        assert_eq!(chart.click(Point::new(5.0, 5.0)), None);
        assert_eq!(chart.click(Point::new(x, plot.y1 + 10.0)), None);
        assert_eq!(chart.selected(), vec!["easy".to_owned()]);
    }
}
