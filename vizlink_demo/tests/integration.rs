// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integration tests for the linked views over the bundled fixture datasets.

use std::collections::BTreeSet;

use vizlink_charts::z_order;
use vizlink_demo::config::{DataPaths, DemoConfig};
use vizlink_demo::data::{Datasets, parse_date};
use vizlink_demo::html::{HtmlSection, render_report};
use vizlink_demo::trails::{AppEvent, TrailsApp};
use vizlink_demo::views::{Choropleth, Filters, ForceGraph, StockView};

fn datasets() -> Datasets {
    Datasets::load(&DataPaths::default()).expect("fixture datasets load")
}

fn sorted(labels: Vec<String>) -> Vec<String> {
    let set: BTreeSet<String> = labels.into_iter().collect();
    set.into_iter().collect()
}

/// Every fixture loads with the expected shape.
#[test]
fn test_fixtures_load() {
    let data = datasets();
    assert_eq!(data.trails.len(), 8);
    assert_eq!(data.stock.len(), 64);
    assert!(data.stock.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(data.scores.len(), 3);
    assert_eq!(data.counties.features.len(), 5);
    assert_eq!(data.graph.nodes.len(), 6);
    // The link to an unknown node is dropped; a missing value defaults to 1.
    assert_eq!(data.graph.links.len(), 6);
    assert_eq!(data.graph.links.last().map(|l| l.value), Some(1.0));
}

/// A missing dataset is an error naming the file.
#[test]
fn test_missing_dataset_is_reported() {
    let paths = DataPaths {
        trails: "does/not/exist.csv".into(),
        ..DataPaths::default()
    };
    let err = Datasets::load(&paths).expect_err("missing file must fail");
    assert!(err.to_string().contains("exist.csv"), "{err}");
}

/// Bar clicks toggle categories and filter the sibling scatterplot.
#[test]
fn test_trails_linking() {
    let data = datasets();
    let mut app = TrailsApp::new(&DemoConfig::default().trails, data.trails.clone())
        .expect("default trails config");

    let counts: Vec<(String, usize)> = app
        .barchart()
        .counts()
        .iter()
        .map(|c| (c.key.clone(), c.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("easy".into(), 3),
            ("intermediate".into(), 3),
            ("difficult".into(), 2)
        ]
    );
    assert_eq!(app.scatterplot().borrow().bound().len(), 8);

    assert_eq!(app.click_category("easy"), Some(vec!["easy".to_owned()]));
    assert_eq!(app.scatterplot().borrow().bound(), &[0, 1, 2]);

    let both = app.click_category("intermediate").expect("bar hit");
    assert_eq!(sorted(both), vec!["easy".to_owned(), "intermediate".to_owned()]);
    assert_eq!(app.scatterplot().borrow().bound().len(), 6);

    assert_eq!(app.click_category("easy"), Some(vec!["intermediate".to_owned()]));
    assert_eq!(app.scatterplot().borrow().bound(), &[3, 4, 5]);

    // Deselecting the last category means no filter.
    assert_eq!(app.click_category("intermediate"), Some(Vec::new()));
    assert_eq!(app.scatterplot().borrow().bound().len(), 8);

    assert_eq!(app.click_category("unknown"), None);
}

/// Trail points draw above the series fill and below the axes.
#[test]
fn test_scatter_points_use_series_layer() {
    let data = datasets();
    let app = TrailsApp::new(&DemoConfig::default().trails, data.trails.clone())
        .expect("default trails config");
    let view = app.scatterplot().borrow();
    let points: Vec<i32> = view
        .scene()
        .sorted()
        .into_iter()
        .filter(|(id, _)| id.table_row().is_some())
        .map(|(_, m)| m.z_index)
        .collect();
    assert_eq!(points.len(), view.bound().len());
    assert!(points.iter().all(|z| *z == z_order::SERIES_POINTS));
    assert!(z_order::SERIES_FILL < z_order::SERIES_POINTS);
    assert!(z_order::SERIES_POINTS < z_order::AXIS_RULES);
}

/// The scatterplot domains follow the filtered rows.
#[test]
fn test_scatter_domain_follows_filter() {
    let data = datasets();
    let mut app = TrailsApp::new(&DemoConfig::default().trails, data.trails.clone())
        .expect("default trails config");
    assert_eq!(app.scatterplot().borrow().x_scale().domain(), (0.0, 29.0));
    app.click_category("easy");
    assert_eq!(app.scatterplot().borrow().x_scale().domain(), (0.0, 10.0));
    let svgs = app.to_svgs();
    assert_eq!(svgs.len(), 2);
    assert!(svgs[0].contains(r#"class="active""#));
    assert!(svgs[1].contains("Stanley Park Seawall"));
    assert!(!svgs[1].contains("Black Tusk"));
}

#[test]
fn test_app_event_name() {
    use vizlink_core::Event;
    assert_eq!(AppEvent::FilterCategories(Vec::new()).name(), "filterCategories");
}

/// The default brush starts at the configured date and clearing restores the full domain.
#[test]
fn test_stock_brush_and_pointer() {
    let data = datasets();
    let config = DemoConfig::default().stock;
    let mut view = StockView::new(config, data.stock.clone()).expect("valid default start");
    view.update_vis();

    let fc = view.focus_context();
    let full = fc.full_domain();
    let focus = fc.focus_domain();
    let start = parse_date("2019-01-01").expect("valid date");
    assert!((focus.0 - start).abs() < 1.0, "{focus:?}");
    assert!((focus.1 - full.1).abs() < 1.0, "{focus:?}");
    assert!(focus.0 >= full.0 && focus.1 <= full.1);
    assert!(view.focus_context().brush().selection().is_some());

    let plot = view.focus_plot();
    let tip = view.pointer_move(plot.center().x).expect("pointer inside plot");
    let record = data.stock[tip.index];
    assert_eq!(tip.label, format!("{}", record.close.round()));
    assert!(view.pointer_move(plot.x0 - 5.0).is_none());
    assert!(view.tooltip().is_none());

    view.clear_brush();
    assert_eq!(view.focus_context().focus_domain(), full);

    let svg = view.to_svg();
    assert!(svg.contains("clip-path"));
}

/// Filters change the fills in place, keyed by feature.
#[test]
fn test_choropleth_update() {
    let data = datasets();
    let mut map = Choropleth::new(
        DemoConfig::default().map,
        data.scores.clone(),
        &data.counties,
    );
    // Only NC features are drawn; Hyde has no geometry and gets no label.
    assert_eq!(map.features().len(), 4);
    assert_eq!(map.county_centers().len(), 3);
    assert_eq!(map.year_options(), vec!["2018", "2019"]);
    assert_eq!(map.weight_options(), vec!["106", "113", "285"]);

    let diffs = map.update(Filters::all());
    assert!(diffs.iter().all(|d| d.is_enter()));
    assert_eq!(map.max_score(&Filters::all()), 82.5);
    assert_eq!(map.filtered_stats("durham", &Filters::all()).score, 40.0);

    let year = Filters::from_selection("2019", "all");
    let diffs = map.update(year.clone());
    assert!(diffs.iter().all(|d| !d.is_enter() && !d.is_exit()));
    assert_eq!(map.max_score(&year), 46.0);
    assert_eq!(map.filtered_stats("dare", &year).score, 0.0);

    let wake = map.features().iter().position(|f| f.county_key() == "wake");
    let wake = Choropleth::feature_mark(wake.expect("wake drawn"));
    let tooltip = map.scene().get(wake).and_then(|m| m.tooltip.clone());
    assert!(tooltip.is_some_and(|t| t.starts_with("Wake")));
}

/// The graph settles and renders one mark per node and link.
#[test]
fn test_force_graph() {
    let data = datasets();
    let config = DemoConfig::default().graph;
    let (w, h) = (config.width, config.height);
    let mut graph = ForceGraph::new(config, data.graph.clone());
    let diffs = graph.update_vis();
    assert_eq!(diffs.iter().filter(|d| d.is_enter()).count(), 12);
    assert!(graph.simulation().alpha() < 0.001);
    for node in graph.simulation().nodes() {
        assert!(node.x > 0.0 && node.x < w && node.y > 0.0 && node.y < h);
    }
    assert!(graph.to_svg().contains("<title>Valjean</title>"));
}

#[test]
fn test_report_contains_every_view() {
    let data = datasets();
    let mut graph = ForceGraph::new(DemoConfig::default().graph, data.graph.clone());
    graph.update_vis();
    let section = HtmlSection::new("Graph", "settled").with_svg(graph.to_svg());
    let html = render_report("demo", &[section]);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<g id="force-directed-graph">"#));
}
