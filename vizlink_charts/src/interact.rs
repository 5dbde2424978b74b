// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer, brush and click interactions.
//!
//! Interactions work in pixel space and translate back into data space through scale
//! inversion. None of them own data or marks: they produce indices, domains, or selections that
//! a view turns into a re-render (or a dispatcher event).

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Circle, Point, Shape};
use peniko::Brush;
use peniko::color::palette::css;
use vizlink_core::{Mark, MarkId, Scene, TableId};

use crate::scale::ScaleContinuous;
use crate::z_order;

/// Returns the first index `i >= lo` with `values[i] >= target` (ascending `values`).
///
/// If every value from `lo` on is smaller, returns `values.len()`.
pub fn bisect_left(values: &[f64], target: f64, lo: usize) -> usize {
    bisect_by(values, |v| *v, target, lo)
}

fn bisect_by<R>(data: &[R], key: impl Fn(&R) -> f64, target: f64, lo: usize) -> usize {
    let lo = lo.min(data.len());
    lo + data[lo..].partition_point(|r| key(r) < target)
}

/// Returns the index of the record whose `key` is closest to `target`.
///
/// `data` must be sorted ascending by `key`. The search starts at index 1 and compares the two
/// records adjacent to the insertion point; equal distances resolve to the earlier record.
/// Targets outside the data clamp to the first or last record. Empty data has no nearest
/// record.
pub fn nearest_index<R>(data: &[R], key: impl Fn(&R) -> f64, target: f64) -> Option<usize> {
    if data.is_empty() {
        return None;
    }
    let index = bisect_by(data, &key, target, 1);
    let a = index - 1;
    if index >= data.len() {
        return Some(a);
    }
    let da = target - key(&data[a]);
    let db = key(&data[index]) - target;
    Some(if da > db { index } else { a })
}

/// Where and what to show for the record under the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipAnchor {
    /// Index of the record in the tracked data.
    pub index: usize,
    /// Position of the record in scene coordinates.
    pub pos: Point,
    /// Label text.
    pub label: String,
}

impl TooltipAnchor {
    /// Generates a ring at the record and the label 15px above it.
    pub fn marks(&self, id_base: u64) -> Vec<Mark> {
        let ring = Circle::new(self.pos, 4.0).to_path(0.1);
        alloc::vec![
            Mark::builder(MarkId::from_raw(id_base))
                .path()
                .z_index(z_order::TOOLTIP)
                .geometry(ring)
                .fill(Brush::Solid(css::WHITE.with_alpha(0.0)))
                .stroke(css::BLACK)
                .stroke_width(1.0)
                .build(),
            Mark::builder(MarkId::from_raw(id_base + 1))
                .text()
                .z_index(z_order::TOOLTIP)
                .x(self.pos.x)
                .y(self.pos.y - 15.0)
                .content(self.label.clone())
                .text_anchor_middle()
                .font_size(11.0)
                .build(),
        ]
    }
}

/// Tracks the record nearest to the pointer inside a plot.
///
/// The tracker is visible between [`PointerTracker::enter`] and [`PointerTracker::leave`];
/// [`PointerTracker::track`] implies entering.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    visible: bool,
    current: Option<usize>,
}

impl PointerTracker {
    /// Creates a hidden tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the tracker.
    pub fn enter(&mut self) {
        self.visible = true;
    }

    /// Hides the tracker and forgets the current record.
    pub fn leave(&mut self) {
        self.visible = false;
        self.current = None;
    }

    /// Returns `true` while the pointer is inside the tracked area.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the index of the record last found under the pointer.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Inverts the pointer's x through `x_scale` and selects the nearest record.
    pub fn track<R>(
        &mut self,
        px: f64,
        x_scale: &ScaleContinuous,
        data: &[R],
        key: impl Fn(&R) -> f64,
    ) -> Option<usize> {
        self.visible = true;
        let target = x_scale.invert(px);
        self.current = nearest_index(data, key, target);
        tracing::trace!(px, target, index = ?self.current, "pointer track");
        self.current
    }

    /// Builds the tooltip anchor for the current record.
    ///
    /// Returns `None` while hidden or when no record is selected.
    pub fn anchor<R>(
        &self,
        data: &[R],
        pos: impl Fn(&R) -> Point,
        label: impl Fn(&R) -> String,
    ) -> Option<TooltipAnchor> {
        if !self.visible {
            return None;
        }
        let index = self.current?;
        let record = data.get(index)?;
        Some(TooltipAnchor {
            index,
            pos: pos(record),
            label: label(record),
        })
    }
}

/// A change in a brush's selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BrushEvent {
    /// The brush selects `[x0, x1]` in pixels, `x0 < x1`.
    Brush(f64, f64),
    /// The gesture ended. `None` means the selection was cleared.
    End(Option<(f64, f64)>),
}

/// A one-dimensional (horizontal) brush over a pixel extent.
#[derive(Clone, Debug, PartialEq)]
pub struct BrushX {
    extent: (f64, f64),
    selection: Option<(f64, f64)>,
}

impl BrushX {
    /// Creates a brush over `[x0, x1]` with no selection.
    pub fn new(extent: (f64, f64)) -> Self {
        let (a, b) = extent;
        Self {
            extent: (a.min(b), a.max(b)),
            selection: None,
        }
    }

    /// Returns the pixel extent of the brush.
    pub fn extent(&self) -> (f64, f64) {
        self.extent
    }

    /// Returns the current selection in pixels.
    pub fn selection(&self) -> Option<(f64, f64)> {
        self.selection
    }

    /// Moves the brush programmatically (or as the result of a drag).
    ///
    /// The endpoints are ordered and clamped to the extent. A zero-width selection is treated as
    /// cleared. Returns the events a drag ending at this selection would emit.
    pub fn move_to(&mut self, selection: Option<(f64, f64)>) -> Vec<BrushEvent> {
        let (lo, hi) = self.extent;
        let normalized = selection.and_then(|(a, b)| {
            let (a, b) = (a.min(b).clamp(lo, hi), a.max(b).clamp(lo, hi));
            (b > a).then_some((a, b))
        });
        self.selection = normalized;
        tracing::debug!(?normalized, "brush move");
        match normalized {
            Some((a, b)) => alloc::vec![BrushEvent::Brush(a, b), BrushEvent::End(Some((a, b)))],
            None => alloc::vec![BrushEvent::End(None)],
        }
    }

    /// Clears the selection.
    pub fn clear(&mut self) -> Vec<BrushEvent> {
        self.move_to(None)
    }

    /// Returns the selection inverted through `scale`, if any.
    pub fn invert(&self, scale: &ScaleContinuous) -> Option<(f64, f64)> {
        let (a, b) = self.selection?;
        let (da, db) = (scale.invert(a), scale.invert(b));
        Some((da.min(db), da.max(db)))
    }

    /// Generates the selection overlay and the two handles.
    ///
    /// Without a selection only the (invisible) overlay spanning the extent is emitted, so the
    /// mark set shrinks and grows with the selection.
    pub fn marks(&self, id_base: u64, y0: f64, y1: f64) -> Vec<Mark> {
        let (lo, hi) = self.extent;
        let mut out = alloc::vec![
            Mark::builder(MarkId::from_raw(id_base))
                .rect()
                .z_index(z_order::BRUSH)
                .x(lo)
                .y(y0)
                .w(hi - lo)
                .h(y1 - y0)
                .fill(css::WHITE.with_alpha(0.0))
                .build(),
        ];
        if let Some((a, b)) = self.selection {
            out.push(
                Mark::builder(MarkId::from_raw(id_base + 1))
                    .rect()
                    .z_index(z_order::BRUSH)
                    .x(a)
                    .y(y0)
                    .w(b - a)
                    .h(y1 - y0)
                    .fill(css::GRAY.with_alpha(0.3))
                    .stroke(css::WHITE)
                    .stroke_width(1.0)
                    .build(),
            );
            for (i, x) in [a, b].into_iter().enumerate() {
                out.push(
                    Mark::builder(MarkId::from_raw(id_base + 2 + i as u64))
                        .rect()
                        .z_index(z_order::BRUSH)
                        .x(x - 3.0)
                        .y(y0)
                        .w(6.0)
                        .h(y1 - y0)
                        .fill(css::WHITE.with_alpha(0.0))
                        .build(),
                );
            }
        }
        out
    }
}

/// Toggles the active flag of the mark under `point`.
///
/// Returns the clicked mark and its new state, or `None` if nothing was hit.
pub fn click_toggle(scene: &mut Scene, point: Point) -> Option<(MarkId, bool)> {
    let id = scene.hit_test(point)?;
    let active = scene.toggle_active(id)?;
    Some((id, active))
}

/// Returns the labels of the active row marks of `table`, in display order.
///
/// The table must have been bound with label keys (see [`Scene::bind`]).
pub fn active_labels(scene: &Scene, table: TableId) -> Vec<String> {
    scene
        .active_ids()
        .into_iter()
        .filter_map(|id| id.table_row())
        .filter(|(t, _)| *t == table)
        .filter_map(|(_, key)| scene.keys().label(key))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::scale::ScaleLinear;

    #[test]
    fn bisect_left_finds_insertion_point() {
        let v = [1.0, 2.0, 2.0, 5.0];
        assert_eq!(bisect_left(&v, 2.0, 0), 1);
        assert_eq!(bisect_left(&v, 3.0, 0), 3);
        assert_eq!(bisect_left(&v, 0.0, 1), 1);
        assert_eq!(bisect_left(&v, 9.0, 0), 4);
        assert_eq!(bisect_left(&v, 9.0, 10), 4);
    }

    #[test]
    fn nearest_prefers_closer_and_earlier_on_ties() {
        let data = [0.0, 10.0, 20.0];
        assert_eq!(nearest_index(&data, |v| *v, 4.0), Some(0));
        assert_eq!(nearest_index(&data, |v| *v, 6.0), Some(1));
        assert_eq!(nearest_index(&data, |v| *v, 5.0), Some(0));
    }

    #[test]
    fn nearest_clamps_and_handles_tiny_inputs() {
        let data = [0.0, 10.0, 20.0];
        assert_eq!(nearest_index(&data, |v| *v, -100.0), Some(0));
        assert_eq!(nearest_index(&data, |v| *v, 100.0), Some(2));
        let empty: [f64; 0] = [];
        assert_eq!(nearest_index(&empty, |v| *v, 1.0), None);
        assert_eq!(nearest_index(&[7.0], |v| *v, 100.0), Some(0));
    }

    #[test]
    fn pointer_tracker_inverts_through_scale() {
        let x = ScaleContinuous::Linear(ScaleLinear::new((0.0, 20.0), (0.0, 200.0)));
        let data = [0.0, 10.0, 20.0];
        let mut t = PointerTracker::new();
        assert_eq!(t.track(160.0, &x, &data, |v| *v), Some(2));
        let anchor = t
            .anchor(&data, |v| Point::new(x.map(*v), 50.0), |v| alloc::format!("{v}"))
            .unwrap();
        assert_eq!(anchor.pos, Point::new(200.0, 50.0));
        assert_eq!(anchor.label, "20");
        t.leave();
        assert!(t.anchor(&data, |_| Point::ORIGIN, |_| String::new()).is_none());
    }

    #[test]
    fn brush_normalizes_and_clears_zero_width() {
        let mut b = BrushX::new((0.0, 100.0));
        assert_eq!(
            b.move_to(Some((80.0, 20.0))),
            vec![BrushEvent::Brush(20.0, 80.0), BrushEvent::End(Some((20.0, 80.0)))]
        );
        assert_eq!(b.move_to(Some((-50.0, 500.0)))[0], BrushEvent::Brush(0.0, 100.0));
        assert_eq!(b.move_to(Some((30.0, 30.0))), vec![BrushEvent::End(None)]);
        assert_eq!(b.selection(), None);
    }

    #[test]
    fn brush_overlay_marks_follow_selection() {
        let mut b = BrushX::new((0.0, 100.0));
        assert_eq!(b.marks(1, 0.0, 50.0).len(), 1);
        b.move_to(Some((10.0, 40.0)));
        assert_eq!(b.marks(1, 0.0, 50.0).len(), 4);
    }

    #[test]
    fn click_toggle_reports_full_active_set() {
        let table = TableId(3);
        let labels = ["easy", "intermediate", "difficult"];
        let mut scene = Scene::new();
        scene.bind(table, &labels, |l| *l);
        scene
            .tick_table_rows(table, |id, _, row| {
                Mark::builder(id)
                    .rect()
                    .x(row as f64 * 10.0)
                    .y(0.0)
                    .w(8.0)
                    .h(10.0)
                    .build()
            })
            .unwrap();

        assert!(click_toggle(&mut scene, Point::new(24.0, 5.0)).is_some());
        assert!(click_toggle(&mut scene, Point::new(4.0, 5.0)).is_some());
        assert_eq!(active_labels(&scene, table), vec!["easy", "difficult"]);

        assert_eq!(click_toggle(&mut scene, Point::new(24.0, 5.0)).map(|r| r.1), Some(false));
        assert_eq!(active_labels(&scene, table), vec!["easy"]);
        assert!(click_toggle(&mut scene, Point::new(9.0, 5.0)).is_none());
    }
}
