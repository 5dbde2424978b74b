// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demo configuration.
//!
//! Every field has a default, so a configuration file is optional and may be partial. Field
//! names are camelCase (`parentElement`, `colorScale`, ...).

use std::path::{Path, PathBuf};

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};
use vizlink_charts::{ChartLayout, Margin, ScaleOrdinal};

use crate::error::{Error, Result};

/// Top-level configuration of the demo.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DemoConfig {
    /// Dataset locations.
    pub data: DataPaths,
    /// Linked trails views.
    pub trails: TrailsConfig,
    /// Stock focus+context view.
    pub stock: StockConfig,
    /// County choropleth.
    pub map: MapConfig,
    /// Force-directed graph.
    pub graph: ViewConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl DemoConfig {
    /// Loads a configuration file. Relative data paths resolve against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config: Self = serde_json::from_str(&text)?;
        if let Some(dir) = path.parent() {
            config.data = config.data.resolved_against(dir);
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks sizes and colors.
    pub fn validate(&self) -> Result<()> {
        let views = [
            &self.trails.barchart,
            &self.trails.scatterplot,
            &self.stock.view,
            &self.map.view,
            &self.graph,
        ];
        for view in views {
            if !(view.width > 0.0 && view.height > 0.0) {
                return Err(Error::config(format!(
                    "{}: width and height must be positive",
                    view.parent_element
                )));
            }
            if let Some(colors) = &view.color_scale {
                colors.build()?;
            }
        }
        if self.stock.context_height <= 0.0 {
            return Err(Error::config("stock.contextHeight must be positive"));
        }
        Ok(())
    }
}

/// Where the datasets live.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataPaths {
    /// Daily closing prices (`date,close`).
    pub stock: PathBuf,
    /// Trails table.
    pub trails: PathBuf,
    /// County scores (county -> year -> weight -> stats).
    pub scores: PathBuf,
    /// County boundaries (GeoJSON).
    pub counties: PathBuf,
    /// Graph nodes and links.
    pub graph: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        Self {
            stock: dir.join("sp_500_index.csv"),
            trails: dir.join("vancouver_trails.csv"),
            scores: dir.join("nc_county_scores_by_year_and_weight.json"),
            counties: dir.join("nc_county_boundaries.geojson"),
            graph: dir.join("miserables.json"),
        }
    }
}

impl DataPaths {
    fn resolved_against(self, dir: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { dir.join(p) };
        Self {
            stock: resolve(self.stock),
            trails: resolve(self.trails),
            scores: resolve(self.scores),
            counties: resolve(self.counties),
            graph: resolve(self.graph),
        }
    }
}

/// Margins around a plot, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarginConfig {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl MarginConfig {
    /// Creates a margin in CSS order.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl From<MarginConfig> for Margin {
    fn from(m: MarginConfig) -> Self {
        Self::new(m.top, m.right, m.bottom, m.left)
    }
}

/// An ordinal color scale: `domain[i] -> range[i]`, cycling through `range`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorScaleConfig {
    /// Category labels.
    pub domain: Vec<String>,
    /// CSS colors (names or hex).
    pub range: Vec<String>,
}

impl ColorScaleConfig {
    /// Parses the colors into an ordinal scale with black for unknown categories.
    pub fn build(&self) -> Result<ScaleOrdinal<Color>> {
        let range = self
            .range
            .iter()
            .map(|c| css_color(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(ScaleOrdinal::new(
            self.domain.iter().cloned(),
            range,
            Color::BLACK,
        ))
    }
}

/// Parses a CSS color string.
pub fn css_color(s: &str) -> Result<Color> {
    parse_color(s)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|e| Error::config(format!("invalid color {s:?}: {e}")))
}

/// A rendering target: container id, container size, margins and an optional color scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    /// Id of the element the view renders into.
    pub parent_element: String,
    /// Container width.
    pub width: f64,
    /// Container height.
    pub height: f64,
    /// Margins around the plot.
    #[serde(default)]
    pub margin: MarginConfig,
    /// Category colors.
    #[serde(default)]
    pub color_scale: Option<ColorScaleConfig>,
}

impl ViewConfig {
    /// Creates a view config without a color scale.
    pub fn new(parent_element: &str, width: f64, height: f64, margin: MarginConfig) -> Self {
        Self {
            parent_element: parent_element.to_owned(),
            width,
            height,
            margin,
            color_scale: None,
        }
    }

    /// Sets the color scale.
    pub fn with_color_scale(mut self, domain: &[&str], range: &[&str]) -> Self {
        self.color_scale = Some(ColorScaleConfig {
            domain: domain.iter().map(|s| (*s).to_owned()).collect(),
            range: range.iter().map(|s| (*s).to_owned()).collect(),
        });
        self
    }

    /// Lays out the container.
    pub fn layout(&self) -> ChartLayout {
        ChartLayout::from_container(self.width, self.height, self.margin.into())
    }

    /// Builds the configured color scale, falling back to `fallback`.
    pub fn colors(&self, fallback: &ColorScaleConfig) -> Result<ScaleOrdinal<Color>> {
        self.color_scale.as_ref().unwrap_or(fallback).build()
    }
}

/// Difficulty colors shared by the trails views.
pub fn trail_colors() -> ColorScaleConfig {
    ColorScaleConfig {
        domain: vec!["easy".into(), "intermediate".into(), "difficult".into()],
        range: vec!["#a1d99b".into(), "green".into(), "darkgreen".into()],
    }
}

/// Trails views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrailsConfig {
    /// Counts per difficulty.
    pub barchart: ViewConfig,
    /// Distance vs. time.
    pub scatterplot: ViewConfig,
}

impl Default for TrailsConfig {
    fn default() -> Self {
        Self {
            barchart: ViewConfig::new(
                "barchart",
                260.0,
                300.0,
                MarginConfig::new(25.0, 20.0, 20.0, 40.0),
            ),
            scatterplot: ViewConfig::new(
                "scatterplot",
                500.0,
                300.0,
                MarginConfig::new(25.0, 20.0, 20.0, 35.0),
            ),
        }
    }
}

/// Stock focus+context view.
///
/// `view.width`/`view.height` are the focus *plot* size; the container adds the margins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StockConfig {
    /// Focus plot size and margins.
    pub view: ViewConfig,
    /// Height of the context plot.
    pub context_height: f64,
    /// Margins placing the context plot in the container.
    pub context_margin: MarginConfig,
    /// Start of the initial brush selection (`YYYY-MM-DD`).
    pub default_start: String,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::new(
                "chart",
                800.0,
                240.0,
                MarginConfig::new(10.0, 10.0, 100.0, 45.0),
            ),
            context_height: 50.0,
            context_margin: MarginConfig::new(280.0, 10.0, 20.0, 45.0),
            default_start: "2019-01-01".into(),
        }
    }
}

/// County choropleth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// Container.
    pub view: ViewConfig,
    /// State code the boundaries are filtered to.
    pub state: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::new("map", 960.0, 480.0, MarginConfig::new(10.0, 10.0, 10.0, 10.0)),
            state: "NC".into(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new("force-directed-graph", 600.0, 600.0, MarginConfig::default())
    }
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_exercises() {
        let config = DemoConfig::default();
        assert_eq!(config.trails.barchart.width, 260.0);
        assert_eq!(config.trails.scatterplot.margin.left, 35.0);
        assert_eq!(config.stock.context_margin.top, 280.0);
        assert_eq!(config.stock.default_start, "2019-01-01");
        config.validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "trails": { "barchart": { "parentElement": "bars", "width": 300, "height": 200,
                "colorScale": { "domain": ["easy"], "range": ["red"] } } },
            "logging": { "level": "debug" }
        }"#;
        let config: DemoConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.trails.barchart.parent_element, "bars");
        assert_eq!(config.trails.barchart.margin, MarginConfig::default());
        assert_eq!(config.trails.scatterplot.width, 500.0);
        assert_eq!(config.logging.level, "debug");
        let colors = config.trails.barchart.colors(&trail_colors()).unwrap();
        assert_eq!(*colors.map("easy"), css_color("red").unwrap());
    }

    #[test]
    fn invalid_colors_and_sizes_are_rejected() {
        let mut config = DemoConfig::default();
        config.graph.width = 0.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let bad = ColorScaleConfig {
            domain: vec!["a".into()],
            range: vec!["not-a-color".into()],
        };
        assert!(bad.build().is_err());
    }
}
