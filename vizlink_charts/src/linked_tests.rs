// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests of two linked views: a bar chart of counts per category whose clicks
//! filter a sibling point view through a [`Dispatcher`].

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Point;
use vizlink_core::{Dispatcher, Event, Mark, MarkDiff, MarkId, Scene, TableId};
use vizlink_transforms::{CategoryCount, CategorySet, count_by, filter_categories};

use crate::{
    BarMarkSpec, BrushEvent, FocusContext, LineMarkSpec, PointDatum, PointMarkSpec, ScaleBand,
    ScaleContinuous, ScaleLinear, active_labels, click_toggle,
};

const BARS: TableId = TableId(1);
const POINTS: TableId = TableId(2);
const ORDER: [&str; 3] = ["easy", "intermediate", "difficult"];

#[derive(Clone, Debug)]
struct Hike {
    name: &'static str,
    difficulty: &'static str,
    distance: f64,
    hours: f64,
}

fn hikes() -> Rc<[Hike]> {
    Rc::from(vec![
        Hike {
            name: "a",
            difficulty: "easy",
            distance: 3.0,
            hours: 1.0,
        },
        Hike {
            name: "b",
            difficulty: "easy",
            distance: 5.0,
            hours: 2.0,
        },
        Hike {
            name: "c",
            difficulty: "difficult",
            distance: 12.0,
            hours: 6.0,
        },
    ])
}

#[derive(Clone, Debug, PartialEq)]
enum Linked {
    Filter(Vec<String>),
}

impl Event for Linked {
    type Name = &'static str;

    fn name(&self) -> Self::Name {
        match self {
            Self::Filter(_) => "filterCategories",
        }
    }
}

struct Bars {
    scene: Scene,
    counts: Vec<CategoryCount>,
    spec: BarMarkSpec,
}

impl Bars {
    fn new(data: &[Hike]) -> Self {
        let counts = count_by(data, |h| h.difficulty, &ORDER);
        let mut band = ScaleBand::new((0.0, 280.0)).with_padding_inner(0.2);
        band.configure_domain(counts.iter().map(|c| c.key.as_str()));
        let max = counts.iter().map(|c| c.count).max().unwrap_or(0) as f64;
        let y = ScaleContinuous::Linear(ScaleLinear::new((0.0, max), (200.0, 0.0)));
        Self {
            scene: Scene::new(),
            counts,
            spec: BarMarkSpec::new(band, y),
        }
    }

    fn render(&mut self) -> Vec<MarkDiff> {
        self.scene.bind(BARS, &self.counts, |c| c.key.as_str());
        let counts = &self.counts;
        let spec = &self.spec;
        self.scene
            .tick_table_rows(BARS, |id, _, row| {
                let c = &counts[row];
                spec.mark(id, &c.key, c.count as f64, None)
                    .unwrap_or_else(|| Mark::builder(id).rect().build())
            })
            .unwrap()
    }

    fn center_of(&self, label: &str) -> Point {
        let x = self.spec.band.map(label).unwrap() + self.spec.band.band_width() * 0.5;
        Point::new(x, 199.0)
    }
}

struct Points {
    full: Rc<[Hike]>,
    bound: Vec<usize>,
    scene: Scene,
}

impl Points {
    fn new(full: Rc<[Hike]>) -> Self {
        let bound = (0..full.len()).collect();
        Self {
            full,
            bound,
            scene: Scene::new(),
        }
    }

    fn update(&mut self, labels: &[String]) -> Vec<MarkDiff> {
        let selected: CategorySet = labels.iter().cloned().collect();
        self.bound = filter_categories(&self.full[..], &selected, |h| h.difficulty);
        self.render()
    }

    fn render(&mut self) -> Vec<MarkDiff> {
        let rows: Vec<&Hike> = self.bound.iter().map(|&i| &self.full[i]).collect();
        let max_x = rows.iter().map(|h| h.distance).fold(0.0, f64::max);
        let max_y = rows.iter().map(|h| h.hours).fold(0.0, f64::max);
        let spec = PointMarkSpec::new(
            ScaleContinuous::Linear(ScaleLinear::new((0.0, max_x), (0.0, 500.0))),
            ScaleContinuous::Linear(ScaleLinear::new((0.0, max_y), (300.0, 0.0))),
        );
        self.scene.bind(POINTS, &rows, |h| h.name);
        self.scene
            .tick_table_rows(POINTS, |id, _, row| {
                spec.mark(id, &PointDatum::new(rows[row].distance, rows[row].hours))
            })
            .unwrap()
    }

    fn bound_names(&self) -> Vec<&'static str> {
        self.bound.iter().map(|&i| self.full[i].name).collect()
    }
}

#[test]
fn rebinding_same_data_only_updates() {
    let data = hikes();
    let mut bars = Bars::new(&data);
    assert!(bars.render().iter().all(MarkDiff::is_enter));
    let again = bars.render();
    assert_eq!(again.len(), 2);
    assert!(again.iter().all(MarkDiff::is_update));
}

#[test]
fn empty_category_set_is_no_filter() {
    let data = hikes();
    let mut points = Points::new(data.clone());
    points.render();
    let diffs = points.update(&[]);
    assert!(diffs.iter().all(MarkDiff::is_update));
    assert_eq!(points.bound_names(), ["a", "b", "c"]);
}

#[test]
fn clicking_a_bar_filters_the_sibling_view() {
    let data = hikes();
    let mut bars = Bars::new(&data);
    assert_eq!(
        bars.counts,
        [
            CategoryCount {
                key: "easy".into(),
                count: 2
            },
            CategoryCount {
                key: "difficult".into(),
                count: 1
            },
        ]
    );
    bars.render();

    let points = Rc::new(RefCell::new(Points::new(data)));
    points.borrow_mut().render();
    let seen: Rc<RefCell<Vec<Vec<String>>>> = Rc::default();

    let mut dispatch: Dispatcher<Linked> = Dispatcher::new();
    {
        let points = points.clone();
        let seen = seen.clone();
        dispatch.on("filterCategories", move |Linked::Filter(labels)| {
            seen.borrow_mut().push(labels.clone());
            points.borrow_mut().update(labels);
        });
    }

    let p = bars.center_of("easy");
    let hit = click_toggle(&mut bars.scene, p);
    assert!(hit.is_some_and(|(_, active)| active));
    dispatch.emit(&Linked::Filter(active_labels(&bars.scene, BARS)));

    assert_eq!(seen.borrow().last().unwrap(), &["easy"]);
    assert_eq!(points.borrow().bound_names(), ["a", "b"]);
    assert_eq!(points.borrow().scene.len(), 2);

    // Toggling again restores the empty selection and the full dataset.
    let p = bars.center_of("easy");
    click_toggle(&mut bars.scene, p);
    dispatch.emit(&Linked::Filter(active_labels(&bars.scene, BARS)));
    assert!(seen.borrow().last().unwrap().is_empty());
    assert_eq!(points.borrow().bound_names(), ["a", "b", "c"]);
}

#[test]
fn active_state_survives_rerender() {
    let data = hikes();
    let mut bars = Bars::new(&data);
    bars.render();
    let p = bars.center_of("difficult");
    click_toggle(&mut bars.scene, p);
    bars.render();
    assert_eq!(active_labels(&bars.scene, BARS), ["difficult"]);
}

#[test]
fn brushing_rerenders_focus_without_touching_context() {
    let series: Vec<(f64, f64)> = (0..50).map(|i| (f64::from(i), f64::from(i % 7))).collect();
    let x = ScaleContinuous::Linear(ScaleLinear::new((0.0, 49.0), (0.0, 490.0)));
    let y = ScaleContinuous::Linear(ScaleLinear::new((0.0, 6.0), (100.0, 0.0)));
    let mut fc = FocusContext::new(x, x);

    let mut focus = Scene::new();
    let mut context = Scene::new();
    let line = |fc: &FocusContext| {
        LineMarkSpec::new(MarkId::from_raw(1), *fc.focus_scale(), y)
            .mark(series.iter().copied())
    };
    context.tick([LineMarkSpec::new(MarkId::from_raw(1), x, y)
        .mark(series.iter().copied())]);
    focus.tick([line(&fc)]);
    let before = focus.get(MarkId::from_raw(1)).cloned();

    let events = fc.brush_to(Some((100.0, 200.0)));
    assert!(matches!(events[0], BrushEvent::Brush(..)));
    let diffs = focus.tick([line(&fc)]);
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].is_update() && !diffs[0].is_unchanged());
    assert_ne!(focus.get(MarkId::from_raw(1)).cloned(), before);
    assert_eq!(context.len(), 1);

    fc.brush_to(None);
    assert_eq!(fc.focus_domain(), (0.0, 49.0));
}
