// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The linked trails views: bar clicks filter the scatterplot through a dispatcher.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use vizlink_core::{Dispatcher, Event};

use crate::config::{TrailsConfig, trail_colors};
use crate::data::Trail;
use crate::error::Result;
use crate::views::{Barchart, Scatterplot};

/// Events exchanged between the trails views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// The active categories changed; empty means no filter.
    FilterCategories(Vec<String>),
}

impl Event for AppEvent {
    type Name = &'static str;

    fn name(&self) -> Self::Name {
        match self {
            Self::FilterCategories(_) => "filterCategories",
        }
    }
}

/// Top-level controller of the trails page.
///
/// Owns the dataset and the dispatcher; the scatterplot is shared with its
/// `filterCategories` handler.
#[derive(Debug)]
pub struct TrailsApp {
    data: Rc<[Trail]>,
    barchart: Barchart,
    scatterplot: Rc<RefCell<Scatterplot>>,
    dispatcher: Dispatcher<AppEvent>,
}

impl TrailsApp {
    /// Builds both views, subscribes the scatterplot and draws everything.
    pub fn new(config: &TrailsConfig, data: Rc<[Trail]>) -> Result<Self> {
        let fallback = trail_colors();
        let bar_colors = config.barchart.colors(&fallback)?;
        let point_colors = config.scatterplot.colors(&fallback)?;

        let scatterplot = Rc::new(RefCell::new(Scatterplot::new(
            config.scatterplot.clone(),
            point_colors,
            data.clone(),
        )));
        scatterplot.borrow_mut().update_vis();

        let mut barchart = Barchart::new(config.barchart.clone(), bar_colors, data.clone());
        barchart.update_vis();

        let mut dispatcher = Dispatcher::new();
        let target = scatterplot.clone();
        dispatcher.on("filterCategories", move |event: &AppEvent| {
            let AppEvent::FilterCategories(labels) = event;
            tracing::info!(?labels, "filterCategories");
            target.borrow_mut().filter(labels);
        });

        Ok(Self {
            data,
            barchart,
            scatterplot,
            dispatcher,
        })
    }

    /// Forwards a click on the barchart; returns the broadcast selection if a bar was hit.
    pub fn click_bar(&mut self, point: Point) -> Option<Vec<String>> {
        let selected = self.barchart.click(point)?;
        self.broadcast(selected)
    }

    /// Clicks the bar of `label`.
    pub fn click_category(&mut self, label: &str) -> Option<Vec<String>> {
        let selected = self.barchart.click_category(label)?;
        self.broadcast(selected)
    }

    fn broadcast(&mut self, selected: Vec<String>) -> Option<Vec<String>> {
        let event = AppEvent::FilterCategories(selected);
        let handled = self.dispatcher.emit(&event);
        tracing::debug!(handled, "broadcast selection");
        let AppEvent::FilterCategories(selected) = event;
        Some(selected)
    }

    /// Returns the shared dataset.
    pub fn data(&self) -> &Rc<[Trail]> {
        &self.data
    }

    /// Returns the barchart.
    pub fn barchart(&self) -> &Barchart {
        &self.barchart
    }

    /// Returns the scatterplot.
    pub fn scatterplot(&self) -> &Rc<RefCell<Scatterplot>> {
        &self.scatterplot
    }

    /// Serializes both views.
    pub fn to_svgs(&self) -> Vec<String> {
        vec![self.barchart.to_svg(), self.scatterplot.borrow().to_svg()]
    }
}
