// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! County choropleth of wrestling scores with year and weight filters.

use std::collections::{BTreeMap, BTreeSet};

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use peniko::color::palette::css;
use vizlink_charts::{
    ChartLayout, HeuristicTextMeasurer, LegendItem, LegendSwatches, ScaleThreshold, TextMarkSpec,
    TextMeasurer, z_order,
};
use vizlink_core::{Mark, MarkDiff, MarkId, Scene, TableId, TextAnchor, TextBaseline};

use crate::config::MapConfig;
use crate::data::{CountyStats, Feature, FeatureCollection, Ring, Scores};
use crate::svg::SvgScene;

const COUNTIES: TableId = TableId(3);
const LABELS: u64 = 10_000;
const LEGEND: u64 = 50_000;

const THRESHOLDS: [f64; 7] = [0.05, 0.2, 0.35, 0.5, 0.65, 0.8, 0.95];
const BLUES: [[u8; 3]; 8] = [
    [0xf7, 0xfb, 0xff],
    [0xc6, 0xdb, 0xef],
    [0x9e, 0xca, 0xe1],
    [0x6b, 0xae, 0xd6],
    [0x42, 0x92, 0xc6],
    [0x21, 0x71, 0xb5],
    [0x08, 0x51, 0x9c],
    [0x08, 0x30, 0x6b],
];

fn blue(i: usize) -> Color {
    let [r, g, b] = BLUES[i.min(BLUES.len() - 1)];
    Color::from_rgb8(r, g, b)
}

/// The year/weight selection. `None` means all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filters {
    /// Selected year.
    pub year: Option<String>,
    /// Selected weight class.
    pub weight: Option<String>,
}

impl Filters {
    /// Every year and weight.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds filters from selector values, where `"all"` selects everything.
    pub fn from_selection(year: &str, weight: &str) -> Self {
        let pick = |v: &str| (v != "all").then(|| v.to_owned());
        Self {
            year: pick(year),
            weight: pick(weight),
        }
    }
}

/// Sums the stats of `county` over the years and weights matching `filters`.
///
/// Unknown counties, years and weights contribute zero.
pub fn filtered_stats(scores: &Scores, county: &str, filters: &Filters) -> CountyStats {
    let mut total = CountyStats::default();
    let Some(years) = scores.get(county) else {
        return total;
    };
    for (year, weights) in years {
        if filters.year.as_ref().is_some_and(|y| y != year) {
            continue;
        }
        for (weight, stats) in weights {
            if filters.weight.as_ref().is_some_and(|w| w != weight) {
                continue;
            }
            total += *stats;
        }
    }
    total
}

/// Returns every year present in the scores, sorted lexicographically.
pub fn year_options(scores: &Scores) -> Vec<String> {
    let years: BTreeSet<&String> = scores.values().flat_map(BTreeMap::keys).collect();
    years.into_iter().cloned().collect()
}

/// Returns every weight class present in the scores, sorted by leading integer.
///
/// Weights without a leading integer go last, in lexicographic order.
pub fn weight_options(scores: &Scores) -> Vec<String> {
    let weights: BTreeSet<&String> = scores
        .values()
        .flat_map(BTreeMap::values)
        .flat_map(BTreeMap::keys)
        .collect();
    let mut out: Vec<String> = weights.into_iter().cloned().collect();
    out.sort_by_key(|w| {
        let digits: String = w.chars().take_while(char::is_ascii_digit).collect();
        let n = digits.parse::<u64>().ok();
        (n.is_none(), n)
    });
    out
}

/// Maps a score to its fill class relative to the largest visible score.
#[derive(Clone, Debug)]
pub struct ScoreColors {
    scale: Option<ScaleThreshold<Color>>,
}

impl Default for ScoreColors {
    fn default() -> Self {
        Self {
            scale: ScaleThreshold::new(THRESHOLDS.to_vec(), (0..BLUES.len()).map(blue).collect()),
        }
    }
}

impl ScoreColors {
    /// Returns the fill of `score` when the largest visible score is `max`.
    ///
    /// A non-positive `max` maps everything to the lightest class.
    pub fn color(&self, score: f64, max: f64) -> Color {
        let ratio = if max > 0.0 { score / max } else { 0.0 };
        self.scale
            .as_ref()
            .and_then(|s| s.map(ratio))
            .copied()
            .unwrap_or_else(|| blue(0))
    }
}

/// Web Mercator fitted into a rectangle, keeping the aspect ratio and centering the result.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Projection {
    bounds: Rect,
    target: Rect,
    k: f64,
}

fn mercator(lon: f64, lat: f64) -> Point {
    let lat = lat.clamp(-85.0, 85.0).to_radians();
    Point::new(
        lon.to_radians(),
        (core::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln(),
    )
}

impl Projection {
    fn fit<'a>(rings: impl IntoIterator<Item = &'a Ring>, target: Rect) -> Self {
        let mut bounds: Option<Rect> = None;
        for ring in rings {
            for pos in ring {
                if let [lon, lat, ..] = pos[..] {
                    let p = mercator(lon, lat);
                    let r = Rect::from_points(p, p);
                    bounds = Some(bounds.map_or(r, |b| b.union(r)));
                }
            }
        }
        let bounds = bounds.unwrap_or(Rect::new(0.0, 0.0, 1.0, 1.0));
        let (bw, bh) = (bounds.width(), bounds.height());
        let k = match (bw > 0.0, bh > 0.0) {
            (true, true) => (target.width() / bw).min(target.height() / bh),
            (true, false) => target.width() / bw,
            (false, true) => target.height() / bh,
            (false, false) => 1.0,
        };
        Self { bounds, target, k }
    }

    fn project(&self, lon: f64, lat: f64) -> Point {
        let p = mercator(lon, lat);
        let dx = (self.target.width() - self.bounds.width() * self.k) * 0.5;
        let dy = (self.target.height() - self.bounds.height() * self.k) * 0.5;
        Point::new(
            self.target.x0 + dx + (p.x - self.bounds.x0) * self.k,
            self.target.y0 + dy + (self.bounds.y1 - p.y) * self.k,
        )
    }

    fn path(&self, polygons: &[&[Ring]]) -> BezPath {
        let mut path = BezPath::new();
        for rings in polygons {
            for ring in *rings {
                let mut points = ring.iter().filter_map(|pos| match pos[..] {
                    [lon, lat, ..] => Some(self.project(lon, lat)),
                    _ => None,
                });
                let Some(first) = points.next() else {
                    continue;
                };
                path.move_to(first);
                for p in points {
                    path.line_to(p);
                }
                path.close_path();
            }
        }
        path
    }
}

/// Popup text of a county.
pub fn popup_text(name: &str, stats: &CountyStats) -> String {
    format!(
        "{name} County\nTotal Score: {}\n1st Placers: {}\n2nd Placers: {}\n3rd Placers: {}\nMost Outstanding Wrestlers: {}",
        stats.score, stats.first, stats.second, stats.third, stats.mow
    )
}

/// The choropleth controller.
///
/// Holds the scores and the boundaries of one state, and re-renders through one scene on every
/// [`Choropleth::update`].
#[derive(Debug)]
pub struct Choropleth {
    config: MapConfig,
    layout: ChartLayout,
    scores: Scores,
    features: Vec<Feature>,
    projection: Projection,
    paths: Vec<BezPath>,
    centers: Vec<(String, String, Point)>,
    colors: ScoreColors,
    filters: Filters,
    scene: Scene,
}

impl Choropleth {
    /// Keeps the features of the configured state and fits the projection to them.
    pub fn new(config: MapConfig, scores: Scores, counties: &FeatureCollection) -> Self {
        let layout = config.view.layout();
        let features: Vec<Feature> = counties
            .features
            .iter()
            .filter(|f| f.properties.state == config.state)
            .cloned()
            .collect();
        let projection = Projection::fit(
            features
                .iter()
                .flat_map(Feature::polygons)
                .flat_map(|rings| rings.iter()),
            layout.plot,
        );
        let paths: Vec<BezPath> = features
            .iter()
            .map(|f| projection.path(&f.polygons()))
            .collect();
        let centers = county_centers(&features, &paths);
        tracing::debug!(
            state = %config.state,
            features = features.len(),
            counties = centers.len(),
            "choropleth fitted"
        );
        Self {
            config,
            layout,
            scores,
            features,
            projection,
            paths,
            centers,
            colors: ScoreColors::default(),
            filters: Filters::all(),
            scene: Scene::new(),
        }
    }

    /// Returns the year selector options (after `"all"`).
    pub fn year_options(&self) -> Vec<String> {
        year_options(&self.scores)
    }

    /// Returns the weight selector options (after `"all"`).
    pub fn weight_options(&self) -> Vec<String> {
        weight_options(&self.scores)
    }

    /// Returns the stats of `county` (normalized key) under `filters`.
    pub fn filtered_stats(&self, county: &str, filters: &Filters) -> CountyStats {
        filtered_stats(&self.scores, county, filters)
    }

    /// Returns the largest score of a drawn feature under `filters`.
    pub fn max_score(&self, filters: &Filters) -> f64 {
        self.features
            .iter()
            .map(|f| self.filtered_stats(&f.county_key(), filters).score)
            .fold(0.0, f64::max)
    }

    /// Applies new filters and re-renders.
    pub fn update(&mut self, filters: Filters) -> Vec<MarkDiff> {
        tracing::debug!(?filters, "choropleth update");
        self.filters = filters;
        self.render()
    }

    fn render(&mut self) -> Vec<MarkDiff> {
        let filters = &self.filters;
        let max = self.max_score(filters);
        let keys: Vec<u64> = (0..self.features.len() as u64).collect();
        self.scene.bind(COUNTIES, &keys, |k| *k);

        let mut marks = Vec::with_capacity(self.features.len() + self.centers.len() + 10);
        for (i, feature) in self.features.iter().enumerate() {
            let stats = filtered_stats(&self.scores, &feature.county_key(), filters);
            let fill = self.colors.color(stats.score, max).with_alpha(0.8);
            marks.push(
                Mark::builder(MarkId::for_row(COUNTIES, i as u64))
                    .path()
                    .z_index(z_order::SERIES_FILL)
                    .geometry(self.paths[i].clone())
                    .fill(fill)
                    .stroke(css::BLACK)
                    .stroke_width(1.5)
                    .tooltip(popup_text(feature.display_name(), &stats))
                    .build(),
            );
        }
        for (j, (_, name, center)) in self.centers.iter().enumerate() {
            marks.push(
                TextMarkSpec::new(MarkId::from_raw(LABELS + j as u64), *center, name.clone())
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Middle)
                    .with_font_size(9.0)
                    .with_z_index(z_order::TITLES)
                    .mark(),
            );
        }
        marks.extend(self.legend().marks(&HeuristicTextMeasurer));
        self.scene.tick(marks)
    }

    fn legend(&self) -> LegendSwatches {
        let measurer: &dyn TextMeasurer = &HeuristicTextMeasurer;
        let legend = LegendSwatches::new(LEGEND, 0.0, 0.0)
            .with_title("Wrestling Performance")
            .with_background(css::WHITE.with_alpha(0.8), 6.0)
            .with_item(LegendItem::solid("High", blue(7)))
            .with_item(LegendItem::solid("Medium", blue(5)))
            .with_item(LegendItem::solid("Low", blue(1)))
            .with_item(
                LegendItem::solid("No Score", css::WHITE)
                    .with_stroke(Color::from_rgb8(0xcc, 0xcc, 0xcc)),
            );
        let h = legend.bounds(measurer).height();
        let plot = self.layout.plot;
        LegendSwatches {
            x: plot.x0 + 10.0,
            y: plot.y1 - h - 10.0,
            ..legend
        }
    }

    /// Returns the drawn features (those of the configured state).
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Returns `(county key, display name, label position)` per county, one entry per county.
    pub fn county_centers(&self) -> &[(String, String, Point)] {
        &self.centers
    }

    /// Returns the screen position of a longitude/latitude pair.
    pub fn project(&self, lon: f64, lat: f64) -> Point {
        self.projection.project(lon, lat)
    }

    /// Returns the current filters.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Returns the render surface.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the mark id of feature `index`.
    pub fn feature_mark(index: usize) -> MarkId {
        MarkId::for_row(COUNTIES, index as u64)
    }

    /// Serializes the current state.
    pub fn to_svg(&self) -> String {
        let view = &self.config.view;
        let mut svg = SvgScene::new(&view.parent_element, view.width, view.height);
        svg.push_scene(&self.scene);
        svg.to_svg_string()
    }
}

/// Averages the bounding-box centers of each county's features.
fn county_centers(features: &[Feature], paths: &[BezPath]) -> Vec<(String, String, Point)> {
    let mut grouped: Vec<(String, String, Vec<Point>)> = Vec::new();
    for (feature, path) in features.iter().zip(paths) {
        if path.elements().is_empty() {
            continue;
        }
        let center = kurbo::Shape::bounding_box(path).center();
        let key = feature.county_key();
        match grouped.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, _, centers)) => centers.push(center),
            None => grouped.push((key, feature.display_name().to_owned(), vec![center])),
        }
    }
    grouped
        .into_iter()
        .map(|(key, name, centers)| {
            let n = centers.len() as f64;
            let sum = centers
                .iter()
                .fold(Point::ZERO, |acc, c| Point::new(acc.x + c.x, acc.y + c.y));
            (key, name, Point::new(sum.x / n, sum.y / n))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> Scores {
        serde_json::from_str(
            r#"{
              "wake": {
                "2019": {"106": {"first":1,"second":0,"third":0,"mow":0,"score":10},
                         "HWT": {"first":0,"second":1,"third":0,"mow":0,"score":6}},
                "2020": {"106": {"first":0,"second":0,"third":1,"mow":1,"score":4}}
              },
              "dare": { "2020": {"113": {"first":1,"second":0,"third":0,"mow":0,"score":12}} }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn stats_sum_over_matching_entries() {
        let s = scores();
        let all = filtered_stats(&s, "wake", &Filters::all());
        assert_eq!(all.score, 20.0);
        assert_eq!(all.mow, 1.0);
        let y2019 = filtered_stats(&s, "wake", &Filters::from_selection("2019", "all"));
        assert_eq!(y2019.score, 16.0);
        let w106 = filtered_stats(&s, "wake", &Filters::from_selection("all", "106"));
        assert_eq!(w106.score, 14.0);
        assert_eq!(
            filtered_stats(&s, "nowhere", &Filters::all()),
            CountyStats::default()
        );
        assert_eq!(
            filtered_stats(&s, "dare", &Filters::from_selection("2019", "all")).score,
            0.0
        );
    }

    #[test]
    fn options_are_sorted() {
        let s = scores();
        assert_eq!(year_options(&s), ["2019", "2020"]);
        assert_eq!(weight_options(&s), ["106", "113", "HWT"]);
    }

    #[test]
    fn colors_follow_ratio_thresholds() {
        let c = ScoreColors::default();
        assert_eq!(c.color(0.0, 10.0), blue(0));
        assert_eq!(c.color(0.5, 10.0), blue(1));
        assert_eq!(c.color(9.5, 10.0), blue(7));
        assert_eq!(c.color(10.0, 10.0), blue(7));
        assert_eq!(c.color(5.0, 0.0), blue(0));
        assert_eq!(c.color(f64::NAN, 10.0), blue(0));
    }

    #[test]
    fn projection_fits_and_centers() {
        let ring: Ring = vec![
            vec![-80.0, 35.0],
            vec![-78.0, 35.0],
            vec![-78.0, 36.0],
            vec![-80.0, 35.0],
        ];
        let target = Rect::new(0.0, 0.0, 200.0, 200.0);
        let p = Projection::fit([&ring], target);
        let a = p.project(-80.0, 35.0);
        let b = p.project(-78.0, 36.0);
        assert!((a.x - 0.0).abs() < 1e-9);
        assert!((b.x - 200.0).abs() < 1e-9);
        // Wider than tall: centered vertically, north up.
        assert!(a.y > b.y);
        assert!(((a.y + b.y) * 0.5 - 100.0).abs() < 1e-9);
    }
}
