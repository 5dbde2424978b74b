// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render surface: a keyed mark set diffed frame to frame.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::Point;

use crate::{KeyInterner, Mark, MarkDiff, MarkId, MarkPayload, RowKey, Table, TableId};

/// Errors returned by [`Scene`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The referenced table was never bound.
    #[error("table {0:?} is not bound in this scene")]
    MissingTable(TableId),
}

/// A mark as currently held by a [`Scene`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneMark {
    /// Render order hint.
    pub z_index: i32,
    /// Resolved attributes.
    pub payload: MarkPayload,
    /// Hover text.
    pub tooltip: Option<String>,
    /// Interaction state toggled by clicks; survives updates, dropped on exit.
    pub active: bool,
}

/// One drawing region: bound tables plus the marks of the last frame.
///
/// Each [`Scene::tick`] receives the *complete* mark list of the region and joins it against
/// the previous one by [`MarkId`]:
/// - ids seen before are updated in place (keeping their `active` flag),
/// - new ids enter,
/// - ids missing from the new list exit.
#[derive(Debug, Default)]
pub struct Scene {
    /// Bound tables, by id.
    pub tables: HashMap<TableId, Table>,
    marks: HashMap<MarkId, SceneMark>,
    order: Vec<MarkId>,
    keys: KeyInterner,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row keys of `table`, creating the table if needed, and bumps its version.
    pub fn set_table_row_keys(&mut self, table: TableId, row_keys: Vec<u64>) {
        let t = self
            .tables
            .entry(table)
            .or_insert_with(|| Table::new(table));
        t.row_keys = row_keys;
        t.bump();
    }

    /// Binds `data` to `table`, deriving one row key per record with `key_fn`.
    ///
    /// Label keys are interned per scene, so the same label always yields the same row key (and
    /// thus the same [`MarkId::for_row`]) across binds.
    pub fn bind<'a, R, K>(&mut self, table: TableId, data: &'a [R], key_fn: impl Fn(&'a R) -> K)
    where
        K: RowKey,
    {
        let keys = &mut self.keys;
        let row_keys: Vec<u64> = data.iter().map(|r| key_fn(r).row_key(keys)).collect();
        tracing::trace!(table = table.0, rows = row_keys.len(), "bind");
        self.set_table_row_keys(table, row_keys);
    }

    /// Returns the bound row keys of `table`.
    pub fn row_keys(&self, table: TableId) -> Option<&[u64]> {
        self.tables.get(&table).map(|t| t.row_keys.as_slice())
    }

    /// Returns the interner used for label keys.
    pub fn keys(&self) -> &KeyInterner {
        &self.keys
    }

    /// Returns the row key of `label` if it has been bound before.
    pub fn label_key(&self, label: &str) -> Option<u64> {
        self.keys.get(label)
    }

    /// Replaces the mark set with `marks`, returning the join result.
    ///
    /// Diffs are ordered as: enters/updates in input order, then exits by ascending id.
    /// If an id appears more than once, the last occurrence wins.
    pub fn tick(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let mut diffs = Vec::new();
        let mut next: HashMap<MarkId, SceneMark> = HashMap::new();
        let mut order = Vec::new();

        for mark in marks {
            let Mark {
                id,
                z_index,
                payload,
                tooltip,
            } = mark;
            if next.contains_key(&id) {
                tracing::warn!(id = id.0, "duplicate mark id in one tick; last one wins");
                order.retain(|o| *o != id);
                diffs.retain(|d: &MarkDiff| d.id() != id);
            }
            let kind = payload.kind();
            let bounds = payload.bounds();
            match self.marks.get(&id) {
                Some(prev) => {
                    diffs.push(MarkDiff::Update {
                        id,
                        kind,
                        old_z_index: prev.z_index,
                        new_z_index: z_index,
                        old_bounds: prev.payload.bounds(),
                        new_bounds: bounds,
                        old: Box::new(prev.payload.clone()),
                        new: Box::new(payload.clone()),
                        active: prev.active,
                        tooltip: tooltip.clone(),
                    });
                    next.insert(
                        id,
                        SceneMark {
                            z_index,
                            payload,
                            tooltip,
                            active: prev.active,
                        },
                    );
                }
                None => {
                    diffs.push(MarkDiff::Enter {
                        id,
                        kind,
                        z_index,
                        bounds,
                        new: Box::new(payload.clone()),
                        tooltip: tooltip.clone(),
                    });
                    next.insert(
                        id,
                        SceneMark {
                            z_index,
                            payload,
                            tooltip,
                            active: false,
                        },
                    );
                }
            }
            order.push(id);
        }

        let seen: HashSet<MarkId> = next.keys().copied().collect();
        let mut exits: Vec<(MarkId, SceneMark)> = self
            .marks
            .drain()
            .filter(|(id, _)| !seen.contains(id))
            .collect();
        exits.sort_by_key(|(id, _)| *id);
        for (id, old) in exits {
            diffs.push(MarkDiff::Exit {
                id,
                kind: old.payload.kind(),
                bounds: old.payload.bounds(),
                old: Box::new(old.payload),
            });
        }

        self.marks = next;
        self.order = order;

        tracing::debug!(
            marks = self.marks.len(),
            enter = diffs.iter().filter(|d| d.is_enter()).count(),
            exit = diffs.iter().filter(|d| d.is_exit()).count(),
            "scene tick"
        );
        diffs
    }

    /// Rebuilds one mark per bound row of `table` and ticks the scene with them.
    ///
    /// `f` receives the row mark id, the row key and the row index.
    pub fn tick_table_rows(
        &mut self,
        table: TableId,
        f: impl FnMut(MarkId, u64, usize) -> Mark,
    ) -> Result<Vec<MarkDiff>, SceneError> {
        let marks = self.row_marks(table, f)?;
        Ok(self.tick(marks))
    }

    /// Builds one mark per bound row of `table` without ticking.
    ///
    /// Use this to combine data marks with guide marks into a single [`Scene::tick`].
    pub fn row_marks(
        &self,
        table: TableId,
        mut f: impl FnMut(MarkId, u64, usize) -> Mark,
    ) -> Result<Vec<Mark>, SceneError> {
        let t = self
            .tables
            .get(&table)
            .ok_or(SceneError::MissingTable(table))?;
        Ok(t.row_keys
            .iter()
            .enumerate()
            .map(|(row, &key)| f(MarkId::for_row(table, key), key, row))
            .collect())
    }

    /// Returns the current mark with `id`.
    pub fn get(&self, id: MarkId) -> Option<&SceneMark> {
        self.marks.get(&id)
    }

    /// Returns the number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene has no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Returns the marks sorted by `(z_index, id)` (paint order).
    pub fn sorted(&self) -> Vec<(MarkId, &SceneMark)> {
        let mut out: Vec<(MarkId, &SceneMark)> = self.marks.iter().map(|(k, v)| (*k, v)).collect();
        out.sort_by_key(|(id, m)| (m.z_index, *id));
        out
    }

    /// Returns whether the mark is active. Unknown marks are inactive.
    pub fn is_active(&self, id: MarkId) -> bool {
        self.marks.get(&id).is_some_and(|m| m.active)
    }

    /// Sets the active flag of a mark, returning `false` if the mark does not exist.
    pub fn set_active(&mut self, id: MarkId, active: bool) -> bool {
        match self.marks.get_mut(&id) {
            Some(m) => {
                m.active = active;
                true
            }
            None => false,
        }
    }

    /// Flips the active flag of a mark, returning the new state.
    pub fn toggle_active(&mut self, id: MarkId) -> Option<bool> {
        let m = self.marks.get_mut(&id)?;
        m.active = !m.active;
        tracing::debug!(id = id.0, active = m.active, "toggle");
        Some(m.active)
    }

    /// Returns the ids of all active marks in the order of the last tick.
    pub fn active_ids(&self) -> Vec<MarkId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.is_active(*id))
            .collect()
    }

    /// Returns the top-most mark (in paint order) whose bounds contain `point`.
    pub fn hit_test(&self, point: Point) -> Option<MarkId> {
        self.top_most(point, |_| true)
    }

    /// Like [`Scene::hit_test`], restricted to the row marks of `table`.
    ///
    /// Marks of other tables and guide marks never shadow a row underneath them.
    pub fn hit_test_rows(&self, point: Point, table: TableId) -> Option<MarkId> {
        self.top_most(point, |id| id.table_row().is_some_and(|(t, _)| t == table))
    }

    fn top_most(&self, point: Point, accept: impl Fn(MarkId) -> bool) -> Option<MarkId> {
        self.marks
            .iter()
            .filter(|(id, _)| accept(**id))
            .filter(|(_, m)| m.payload.bounds().is_some_and(|b| b.contains(point)))
            .max_by_key(|(id, m)| (m.z_index, **id))
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn bar(id: MarkId, x: f64) -> Mark {
        Mark::builder(id).rect().x(x).y(0.0).w(10.0).h(10.0).build()
    }

    #[test]
    fn rebinding_same_data_only_updates() {
        let table = TableId(1);
        let data = ["easy", "intermediate", "difficult"];
        let mut scene = Scene::new();

        scene.bind(table, &data, |d| *d);
        let first = scene
            .tick_table_rows(table, |id, _, row| bar(id, row as f64 * 20.0))
            .unwrap();
        assert!(first.iter().all(MarkDiff::is_enter));

        scene.bind(table, &data, |d| *d);
        let second = scene
            .tick_table_rows(table, |id, _, row| bar(id, row as f64 * 20.0))
            .unwrap();
        assert_eq!(second.len(), 3);
        assert!(second.iter().all(MarkDiff::is_update));
        assert!(second.iter().all(MarkDiff::is_unchanged));
    }

    #[test]
    fn join_enters_updates_and_exits_by_key() {
        let table = TableId(1);
        let mut scene = Scene::new();
        scene.bind(table, &[10_u64, 11, 12], |k| *k);
        scene
            .tick_table_rows(table, |id, key, _| bar(id, key as f64))
            .unwrap();

        scene.bind(table, &[11_u64, 12, 13], |k| *k);
        let diffs = scene
            .tick_table_rows(table, |id, key, _| bar(id, key as f64))
            .unwrap();

        let enters: Vec<_> = diffs.iter().filter(|d| d.is_enter()).map(MarkDiff::id).collect();
        let exits: Vec<_> = diffs.iter().filter(|d| d.is_exit()).map(MarkDiff::id).collect();
        assert_eq!(enters, vec![MarkId::for_row(table, 13)]);
        assert_eq!(exits, vec![MarkId::for_row(table, 10)]);
        assert_eq!(diffs.iter().filter(|d| d.is_update()).count(), 2);
    }

    #[test]
    fn active_state_survives_update_and_is_dropped_on_exit() {
        let a = MarkId::from_raw(1);
        let b = MarkId::from_raw(2);
        let mut scene = Scene::new();
        scene.tick([bar(a, 0.0), bar(b, 20.0)]);

        assert_eq!(scene.toggle_active(a), Some(true));
        let diffs = scene.tick([bar(a, 5.0), bar(b, 20.0)]);
        assert!(matches!(diffs[0], MarkDiff::Update { active: true, .. }));
        assert_eq!(scene.active_ids(), vec![a]);

        scene.tick([bar(b, 20.0)]);
        scene.tick([bar(a, 0.0), bar(b, 20.0)]);
        assert!(!scene.is_active(a));
    }

    #[test]
    fn toggling_twice_restores_active_set() {
        let a = MarkId::from_raw(1);
        let mut scene = Scene::new();
        scene.tick([bar(a, 0.0)]);
        let before = scene.active_ids();
        scene.toggle_active(a);
        scene.toggle_active(a);
        assert_eq!(scene.active_ids(), before);
    }

    #[test]
    fn hit_test_prefers_top_most_mark() {
        let back = MarkId::from_raw(1);
        let front = MarkId::from_raw(2);
        let mut scene = Scene::new();
        scene.tick([
            Mark::builder(back).rect().w(100.0).h(100.0).z_index(-10).build(),
            Mark::builder(front).rect().x(10.0).y(10.0).w(10.0).h(10.0).build(),
        ]);
        assert_eq!(scene.hit_test(Point::new(15.0, 15.0)), Some(front));
        assert_eq!(scene.hit_test(Point::new(50.0, 50.0)), Some(back));
        assert_eq!(scene.hit_test(Point::new(500.0, 50.0)), None);
    }

    #[test]
    fn row_hit_test_ignores_marks_above_the_rows() {
        let table = TableId(1);
        let mut scene = Scene::new();
        scene.bind(table, &["easy"], |d| *d);
        let row = MarkId::for_row(table, scene.label_key("easy").unwrap());
        let guide = MarkId::from_raw(10_000);
        scene.tick([
            bar(row, 0.0),
            Mark::builder(guide).rect().w(100.0).h(100.0).z_index(40).build(),
        ]);
        let p = Point::new(5.0, 5.0);
        assert_eq!(scene.hit_test(p), Some(guide));
        assert_eq!(scene.hit_test_rows(p, table), Some(row));
        assert_eq!(scene.hit_test_rows(p, TableId(2)), None);
        assert_eq!(scene.hit_test_rows(Point::new(50.0, 50.0), table), None);
    }

    #[test]
    fn rows_of_unknown_table_are_an_error() {
        let mut scene = Scene::new();
        let err = scene
            .tick_table_rows(TableId(9), |id, _, _| bar(id, 0.0))
            .unwrap_err();
        assert_eq!(err, SceneError::MissingTable(TableId(9)));
    }
}
