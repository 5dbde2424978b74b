// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trail distance vs. time, one symbol per trail.

use std::rc::Rc;

use kurbo::Point;
use peniko::Color;
use vizlink_charts::{
    AxisSpec, ChartLayout, GridStyle, PointDatum, PointMarkSpec, ScaleContinuous, ScaleLinear,
    ScaleOrdinal, Symbol, TextMarkSpec, z_order,
};
use vizlink_core::{MarkDiff, MarkId, Scene, TableId, TextAnchor};
use vizlink_transforms::{CategorySet, filter_categories, max};

use crate::config::ViewConfig;
use crate::data::Trail;
use crate::svg::SvgScene;

const POINTS: TableId = TableId(2);
const X_AXIS: u64 = 10_000;
const Y_AXIS: u64 = 20_000;
const X_TITLE: u64 = 30_000;
const Y_TITLE: u64 = 30_001;

/// Returns the symbol drawn for a difficulty.
pub fn difficulty_symbol(difficulty: &str) -> Symbol {
    match difficulty {
        "intermediate" => Symbol::Square,
        "difficult" => Symbol::Diamond,
        _ => Symbol::Circle,
    }
}

/// Horizontal jitter of 1 to 5 pixels in either direction, fixed per row key.
pub fn jitter(key: u64) -> f64 {
    let h = key.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let magnitude = ((h >> 32) % 5 + 1) as f64;
    if (h >> 40) & 1 == 0 {
        magnitude
    } else {
        -magnitude
    }
}

/// Tooltip text of a trail.
pub fn trail_tooltip(t: &Trail) -> String {
    format!(
        "{}\n{}\n{} km, ~{} hours\n{}\n{}",
        t.trail, t.region, t.distance, t.time, t.difficulty, t.season
    )
}

/// Scatterplot of the (filtered) trails.
///
/// The view binds indices into the shared dataset. Marks are keyed by the dataset index, so a
/// trail keeps its identity and jitter while filters come and go.
#[derive(Debug)]
pub struct Scatterplot {
    config: ViewConfig,
    layout: ChartLayout,
    colors: ScaleOrdinal<Color>,
    data: Rc<[Trail]>,
    bound: Vec<usize>,
    x: ScaleContinuous,
    y: ScaleContinuous,
    x_axis: AxisSpec,
    y_axis: AxisSpec,
    scene: Scene,
}

impl Scatterplot {
    /// Creates the view over the full dataset; call [`Scatterplot::update_vis`] to draw it.
    pub fn new(config: ViewConfig, colors: ScaleOrdinal<Color>, data: Rc<[Trail]>) -> Self {
        let layout = config.layout();
        let x = ScaleContinuous::Linear(ScaleLinear::new((0.0, 1.0), layout.x_range()));
        let y = ScaleContinuous::Linear(ScaleLinear::new((0.0, 1.0), layout.y_range()));
        let grid = GridStyle {
            overshoot: 10.0,
            ..GridStyle::default()
        };
        let x_axis = AxisSpec::bottom(X_AXIS, x)
            .with_tick_count(6)
            .with_tick_size(0.0)
            .with_tick_padding(10.0)
            .with_domain(false)
            .with_grid(grid.clone())
            .with_tick_formatter(|v, _| format!("{v} km"));
        let y_axis = AxisSpec::left(Y_AXIS, y)
            .with_tick_count(6)
            .with_tick_size(0.0)
            .with_tick_padding(10.0)
            .with_domain(false)
            .with_grid(grid);
        let bound = (0..data.len()).collect();
        Self {
            config,
            layout,
            colors,
            data,
            bound,
            x,
            y,
            x_axis,
            y_axis,
            scene: Scene::new(),
        }
    }

    /// Restricts the view to trails whose difficulty is in `labels`; empty means all trails.
    pub fn filter(&mut self, labels: &[String]) -> Vec<MarkDiff> {
        let selected: CategorySet = labels.iter().cloned().collect();
        self.bound = filter_categories(&self.data[..], &selected, |t| t.difficulty.as_str());
        tracing::debug!(rows = self.bound.len(), ?labels, "scatterplot filter");
        self.update_vis()
    }

    /// Recomputes the domains from the bound trails and redraws.
    pub fn update_vis(&mut self) -> Vec<MarkDiff> {
        let rows: Vec<&Trail> = self.bound.iter().map(|&i| &self.data[i]).collect();
        let max_x = max(&rows, |t| t.distance).unwrap_or(0.0);
        let max_y = max(&rows, |t| t.time).unwrap_or(0.0);
        self.x.set_domain((0.0, max_x));
        self.y.set_domain((0.0, max_y));
        self.x_axis.set_scale(self.x);
        self.y_axis.set_scale(self.y);
        self.render_vis()
    }

    /// Rebuilds the marks for the bound trails.
    pub fn render_vis(&mut self) -> Vec<MarkDiff> {
        let keys: Vec<u64> = self.bound.iter().map(|&i| i as u64).collect();
        self.scene.bind(POINTS, &keys, |k| *k);
        let spec = PointMarkSpec::new(self.x, self.y).with_z_index(z_order::SERIES_POINTS);
        let (data, bound, colors) = (&self.data, &self.bound, &self.colors);
        let mut marks = match self.scene.row_marks(POINTS, |id, key, row| {
            let t = &data[bound[row]];
            let datum = PointDatum::new(t.distance, t.time)
                .with_dx(jitter(key))
                .with_symbol(difficulty_symbol(&t.difficulty))
                .with_fill(*colors.map(&t.difficulty))
                .with_tooltip(trail_tooltip(t));
            spec.mark(id, &datum)
        }) {
            Ok(marks) => marks,
            Err(err) => {
                tracing::error!(%err, "scatterplot render");
                Vec::new()
            }
        };
        let plot = self.layout.plot;
        marks.extend(self.x_axis.marks(plot));
        marks.extend(self.y_axis.marks(plot));
        marks.push(
            TextMarkSpec::title(
                MarkId::from_raw(X_TITLE),
                Point::new(plot.x1 + 10.0, plot.y1 - 15.0),
                "Distance",
            )
            .with_anchor(TextAnchor::End)
            .with_z_index(z_order::AXIS_TITLES)
            .mark(),
        );
        marks.push(
            TextMarkSpec::title(MarkId::from_raw(Y_TITLE), Point::ZERO, "Hours")
                .with_z_index(z_order::AXIS_TITLES)
                .mark(),
        );
        self.scene.tick(marks)
    }

    /// Returns the dataset indices currently drawn.
    pub fn bound(&self) -> &[usize] {
        &self.bound
    }

    /// Returns the bound trails.
    pub fn bound_trails(&self) -> impl Iterator<Item = &Trail> {
        self.bound.iter().map(|&i| &self.data[i])
    }

    /// Returns the x (distance) scale.
    pub fn x_scale(&self) -> &ScaleContinuous {
        &self.x
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

    #[test]
    fn jitter_is_bounded_and_stable() {
        for key in 0..200 {
            let j = jitter(key);
            assert!((1.0..=5.0).contains(&j.abs()), "{j}");
            assert_eq!(j, jitter(key));
        }
        assert!((0..200).any(|k| jitter(k) < 0.0));
        assert!((0..200).any(|k| jitter(k) > 0.0));
    }

    #[test]
    fn symbols_follow_difficulty() {
        assert_eq!(difficulty_symbol("easy"), Symbol::Circle);
        assert_eq!(difficulty_symbol("intermediate"), Symbol::Square);
        assert_eq!(difficulty_symbol("difficult"), Symbol::Diamond);
        assert_eq!(difficulty_symbol("unknown"), Symbol::Circle);
    }
}
