// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders the linked-view demos into one HTML report.
//!
//! Each section replays a short interaction script (clicks, brushes, pointer moves, filter
//! changes) and snapshots the views after every step.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vizlink_demo::config::DemoConfig;
use vizlink_demo::data::Datasets;
use vizlink_demo::html::{HtmlSection, render_report};
use vizlink_demo::trails::TrailsApp;
use vizlink_demo::views::{Choropleth, Filters, ForceGraph, StockView};

/// Linked-view visualization demos.
#[derive(Parser, Debug)]
#[command(name = "vizlink-demo")]
#[command(about = "Render the linked-view demos to an HTML report")]
#[command(version)]
struct Args {
    /// Path to a JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output HTML file.
    #[arg(short, long, default_value = "vizlink_demo.html")]
    out: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the configuration.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(config = ?args.config, "starting vizlink demo");

    let data = match Datasets::load(&config.data) {
        Ok(data) => data,
        Err(err) => {
            tracing::error!(%err, "failed to load datasets; no view initialized");
            return Ok(());
        }
    };

    let sections = vec![
        trails_demo(&config, &data)?,
        stock_demo(&config, &data)?,
        map_demo(&config, &data),
        graph_demo(&config, &data),
    ];
    let html = render_report("vizlink linked views", &sections);
    std::fs::write(&args.out, html)?;
    tracing::info!(out = %args.out.display(), sections = sections.len(), "report written");
    Ok(())
}

fn trails_demo(config: &DemoConfig, data: &Datasets) -> anyhow::Result<HtmlSection> {
    let mut app = TrailsApp::new(&config.trails, data.trails.clone())?;
    let mut section = HtmlSection::new(
        "Trails",
        "Initial state, then clicks on Easy, Intermediate and Easy again. \
         Active bars filter the scatterplot; no active bar means no filter.",
    );
    section.svgs.extend(app.to_svgs());
    for label in ["easy", "intermediate", "easy"] {
        let selected = app.click_category(label);
        tracing::info!(label, ?selected, "clicked bar");
        section.svgs.extend(app.to_svgs());
    }
    Ok(section)
}

fn stock_demo(config: &DemoConfig, data: &Datasets) -> anyhow::Result<HtmlSection> {
    let mut view = StockView::new(config.stock.clone(), data.stock.clone())?;
    let mut section = HtmlSection::new(
        "S&P 500",
        "Default brush, pointer over the middle of the focus plot, brush cleared.",
    );
    let events = view.update_vis();
    tracing::info!(?events, "default brush");
    section.svgs.push(view.to_svg());

    let plot = view.focus_plot();
    let tooltip = view.pointer_move(plot.center().x);
    tracing::info!(label = ?tooltip.map(|t| t.label), "pointer moved");
    section.svgs.push(view.to_svg());

    view.pointer_leave();
    let events = view.clear_brush();
    tracing::info!(?events, "brush cleared");
    section.svgs.push(view.to_svg());
    Ok(section)
}

fn map_demo(config: &DemoConfig, data: &Datasets) -> HtmlSection {
    let mut map = Choropleth::new(config.map.clone(), data.scores.clone(), &data.counties);
    let mut section = HtmlSection::new(
        "NC wrestling",
        "All years and weights, then the first year, then the first year and weight class.",
    );
    map.update(Filters::all());
    section.svgs.push(map.to_svg());

    let year = map.year_options().into_iter().next();
    let weight = map.weight_options().into_iter().next();
    if let Some(year) = &year {
        map.update(Filters::from_selection(year, "all"));
        section.svgs.push(map.to_svg());
        if let Some(weight) = &weight {
            map.update(Filters::from_selection(year, weight));
            section.svgs.push(map.to_svg());
        }
    }
    section
}

fn graph_demo(config: &DemoConfig, data: &Datasets) -> HtmlSection {
    let mut graph = ForceGraph::new(config.graph.clone(), data.graph.clone());
    graph.update_vis();
    HtmlSection::new("Force-directed graph", "Layout after the simulation settles.")
        .with_svg(graph.to_svg())
}
