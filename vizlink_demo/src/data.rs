// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset records and loaders.
//!
//! Every loader has a reader-based `parse_*` variant (used by tests) and a path-based `load_*`
//! variant. Numeric fields are parsed best-effort: anything that is not a number becomes `NaN`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::config::DataPaths;
use crate::error::{Error, Result};

/// One daily closing price.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StockRecord {
    /// Midnight UTC of the trading day, in seconds since the Unix epoch.
    pub date: f64,
    /// Closing price.
    pub close: f64,
}

/// One hiking trail.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    /// Trail name.
    pub trail: String,
    /// Region name.
    pub region: String,
    /// Lower-cased difficulty (`easy`, `intermediate`, `difficult`).
    pub difficulty: String,
    /// Distance in kilometres.
    pub distance: f64,
    /// Estimated time in hours.
    pub time: f64,
    /// Season description.
    pub season: String,
}

/// Per-weight tournament results of one county.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CountyStats {
    /// First places.
    pub first: f64,
    /// Second places.
    pub second: f64,
    /// Third places.
    pub third: f64,
    /// Most outstanding wrestler awards.
    pub mow: f64,
    /// Total score.
    pub score: f64,
}

impl std::ops::AddAssign for CountyStats {
    fn add_assign(&mut self, rhs: Self) {
        self.first += rhs.first;
        self.second += rhs.second;
        self.third += rhs.third;
        self.mow += rhs.mow;
        self.score += rhs.score;
    }
}

/// County (lower-cased, without the `" County"` suffix) -> year -> weight -> stats.
pub type Scores = BTreeMap<String, BTreeMap<String, BTreeMap<String, CountyStats>>>;

/// A GeoJSON feature collection of county boundaries.
#[derive(Clone, Debug, Deserialize)]
pub struct FeatureCollection {
    /// Features in file order.
    pub features: Vec<Feature>,
}

/// One county boundary.
#[derive(Clone, Debug, Deserialize)]
pub struct Feature {
    /// County attributes.
    pub properties: CountyProperties,
    /// Boundary geometry; `null` in the file becomes `None`.
    pub geometry: Option<Geometry>,
}

/// The attributes of a county feature used by the map.
#[derive(Clone, Debug, Deserialize)]
pub struct CountyProperties {
    /// County name, e.g. `"Wake County"`.
    #[serde(default)]
    pub county: String,
    /// Two-letter state code.
    #[serde(default)]
    pub state: String,
}

impl Feature {
    /// Returns the normalized county name used as the score key.
    pub fn county_key(&self) -> String {
        county_key(&self.properties.county)
    }

    /// Returns the county name without its `" County"` suffix.
    pub fn display_name(&self) -> &str {
        let name = &self.properties.county;
        name.strip_suffix(" County").unwrap_or(name)
    }

    /// Returns the polygons of this feature; each polygon is a list of rings.
    pub fn polygons(&self) -> Vec<&[Ring]> {
        match &self.geometry {
            Some(Geometry::Polygon { coordinates }) => vec![coordinates.as_slice()],
            Some(Geometry::MultiPolygon { coordinates }) => {
                coordinates.iter().map(Vec::as_slice).collect()
            }
            Some(Geometry::Other) | None => Vec::new(),
        }
    }
}

/// Normalizes a county name: drops `" County"` and lower-cases.
pub fn county_key(name: &str) -> String {
    name.replacen(" County", "", 1).to_lowercase()
}

/// A linear ring of `[longitude, latitude, ..]` positions.
pub type Ring = Vec<Vec<f64>>;

/// Supported GeoJSON geometries. Other geometry types are kept but not drawn.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A polygon: exterior ring followed by holes.
    Polygon {
        /// Rings.
        coordinates: Vec<Ring>,
    },
    /// Several polygons.
    MultiPolygon {
        /// Polygons.
        coordinates: Vec<Vec<Ring>>,
    },
    /// Any other geometry type.
    #[serde(other)]
    Other,
}

/// A graph node.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Node {
    /// Unique node id.
    pub id: String,
    /// Group used for coloring.
    #[serde(default)]
    pub group: u32,
}

#[derive(Deserialize)]
struct RawLink {
    source: String,
    target: String,
    #[serde(default = "default_link_value")]
    value: f64,
}

fn default_link_value() -> f64 {
    1.0
}

#[derive(Deserialize)]
struct RawGraph {
    nodes: Vec<Node>,
    #[serde(default)]
    links: Vec<RawLink>,
}

/// A link between two nodes, by node index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    /// Source node index.
    pub source: usize,
    /// Target node index.
    pub target: usize,
    /// Link weight.
    pub value: f64,
}

/// A node-link graph with resolved link endpoints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    /// Nodes in file order.
    pub nodes: Vec<Node>,
    /// Links whose endpoints both exist.
    pub links: Vec<Link>,
}

/// Parses a number, mapping anything else to `NaN`.
pub fn parse_number(s: &str) -> f64 {
    s.trim().parse().unwrap_or(f64::NAN)
}

/// Parses a `YYYY-MM-DD` date into seconds since the Unix epoch (midnight UTC).
pub fn parse_date(s: &str) -> Result<f64> {
    let s = s.trim();
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|source| Error::Date {
        value: s.to_owned(),
        source,
    })?;
    let seconds = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    #[allow(clippy::cast_precision_loss, reason = "calendar timestamps are far below 2^52")]
    Ok(seconds as f64)
}

#[derive(Deserialize)]
struct RawStock {
    date: String,
    #[serde(default)]
    close: String,
}

/// Parses `date,close` rows, sorted by date.
pub fn parse_stock(reader: impl Read) -> Result<Vec<StockRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut out = Vec::new();
    for row in rdr.deserialize() {
        let row: RawStock = row?;
        out.push(StockRecord {
            date: parse_date(&row.date)?,
            close: parse_number(&row.close),
        });
    }
    out.sort_by(|a, b| a.date.total_cmp(&b.date));
    tracing::debug!(rows = out.len(), "parsed stock prices");
    Ok(out)
}

#[derive(Deserialize)]
struct RawTrail {
    #[serde(default)]
    trail: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    distance: String,
    #[serde(default)]
    time: String,
    #[serde(default)]
    season: String,
}

/// Parses the trails table.
pub fn parse_trails(reader: impl Read) -> Result<Vec<Trail>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let mut out = Vec::new();
    for row in rdr.deserialize() {
        let row: RawTrail = row?;
        out.push(Trail {
            trail: row.trail,
            region: row.region,
            difficulty: row.difficulty.trim().to_lowercase(),
            distance: parse_number(&row.distance),
            time: parse_number(&row.time),
            season: row.season,
        });
    }
    tracing::debug!(rows = out.len(), "parsed trails");
    Ok(out)
}

/// Parses the nested county score document.
pub fn parse_scores(reader: impl Read) -> Result<Scores> {
    let scores: Scores = serde_json::from_reader(reader)?;
    tracing::debug!(counties = scores.len(), "parsed county scores");
    Ok(scores)
}

/// Parses a GeoJSON feature collection.
pub fn parse_counties(reader: impl Read) -> Result<FeatureCollection> {
    let fc: FeatureCollection = serde_json::from_reader(reader)?;
    tracing::debug!(features = fc.features.len(), "parsed county boundaries");
    Ok(fc)
}

/// Parses a node-link graph, dropping links to unknown nodes.
pub fn parse_graph(reader: impl Read) -> Result<Graph> {
    let raw: RawGraph = serde_json::from_reader(reader)?;
    let index: BTreeMap<&str, usize> = raw
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();
    let mut links = Vec::with_capacity(raw.links.len());
    for l in &raw.links {
        match (index.get(l.source.as_str()), index.get(l.target.as_str())) {
            (Some(&source), Some(&target)) => links.push(Link {
                source,
                target,
                value: l.value,
            }),
            _ => tracing::warn!(
                source = %l.source,
                target = %l.target,
                "dropping link to unknown node"
            ),
        }
    }
    tracing::debug!(nodes = raw.nodes.len(), links = links.len(), "parsed graph");
    Ok(Graph {
        nodes: raw.nodes,
        links,
    })
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::io(path, e))
}

/// Loads daily closing prices.
pub fn load_stock(path: &Path) -> Result<Vec<StockRecord>> {
    parse_stock(open(path)?)
}

/// Loads the trails table.
pub fn load_trails(path: &Path) -> Result<Vec<Trail>> {
    parse_trails(open(path)?)
}

/// Loads county scores.
pub fn load_scores(path: &Path) -> Result<Scores> {
    parse_scores(open(path)?)
}

/// Loads county boundaries.
pub fn load_counties(path: &Path) -> Result<FeatureCollection> {
    parse_counties(open(path)?)
}

/// Loads the graph.
pub fn load_graph(path: &Path) -> Result<Graph> {
    parse_graph(open(path)?)
}

/// All datasets of the demo, owned by the top-level controller.
#[derive(Clone, Debug)]
pub struct Datasets {
    /// Daily closing prices sorted by date.
    pub stock: Rc<[StockRecord]>,
    /// Trails.
    pub trails: Rc<[Trail]>,
    /// County scores.
    pub scores: Scores,
    /// County boundaries (all states).
    pub counties: FeatureCollection,
    /// Graph.
    pub graph: Graph,
}

impl Datasets {
    /// Loads every dataset; the first failure aborts the load.
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let _span = tracing::info_span!("load").entered();
        let out = Self {
            stock: load_stock(&paths.stock)?.into(),
            trails: load_trails(&paths.trails)?.into(),
            scores: load_scores(&paths.scores)?,
            counties: load_counties(&paths.counties)?,
            graph: load_graph(&paths.graph)?,
        };
        tracing::info!(
            stock = out.stock.len(),
            trails = out.trails.len(),
            counties = out.scores.len(),
            features = out.counties.features.len(),
            nodes = out.graph.nodes.len(),
            "datasets loaded"
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_dates_become_sorted_epoch_seconds() {
        let csv = "date,close\n2020-01-02,3257.85\n1970-01-02,92.06\n2020-01-03,oops\n";
        let rows = parse_stock(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].date, 86_400.0);
        assert_eq!(rows[1].close, 3257.85);
        assert!(rows[2].close.is_nan());
        assert!(rows[1].date < rows[2].date);
    }

    #[test]
    fn bad_dates_are_errors() {
        let err = parse_stock("date,close\n01/02/2020,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Date { ref value, .. } if value == "01/02/2020"));
    }

    #[test]
    fn trails_normalize_difficulty() {
        let csv = "trail,region,difficulty,distance,time,season\n\
                   Lynn Loop,North Shore, Intermediate ,5.1,2,year-round\n\
                   Odd,North Shore,easy,n/a,1.5,summer\n";
        let rows = parse_trails(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].difficulty, "intermediate");
        assert_eq!(rows[0].distance, 5.1);
        assert!(rows[1].distance.is_nan());
        assert_eq!(rows[1].time, 1.5);
    }

    #[test]
    fn graph_drops_dangling_links() {
        let json = r#"{"nodes":[{"id":"a","group":1},{"id":"b","group":2}],
            "links":[{"source":"a","target":"b","value":3},{"source":"a","target":"zz","value":1}]}"#;
        let g = parse_graph(json.as_bytes()).unwrap();
        assert_eq!(g.nodes.len(), 2);
        assert_eq!(
            g.links,
            [Link {
                source: 0,
                target: 1,
                value: 3.0
            }]
        );
    }

    #[test]
    fn geojson_keeps_polygons_and_skips_other_geometries() {
        let json = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"county":"Wake County","state":"NC"},
             "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}},
            {"type":"Feature","properties":{"county":"Dare County","state":"NC"},
             "geometry":{"type":"MultiPolygon","coordinates":[[[[0,0],[1,0],[0,1],[0,0]]],[[[2,2],[3,2],[2,3],[2,2]]]]}},
            {"type":"Feature","properties":{"county":"Pin","state":"NC"},
             "geometry":{"type":"Point","coordinates":[0,0]}}]}"#;
        let fc = parse_counties(json.as_bytes()).unwrap();
        assert_eq!(fc.features[0].county_key(), "wake");
        assert_eq!(fc.features[0].display_name(), "Wake");
        assert_eq!(fc.features[1].polygons().len(), 2);
        assert!(fc.features[2].polygons().is_empty());
    }

    #[test]
    fn scores_nest_county_year_weight() {
        let json = r#"{"wake":{"2020":{"106":{"first":1,"second":0,"third":2,"mow":0,"score":20}}}}"#;
        let scores = parse_scores(json.as_bytes()).unwrap();
        assert_eq!(scores["wake"]["2020"]["106"].score, 20.0);
    }
}
