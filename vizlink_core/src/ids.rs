// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity types.

/// Identifies a bound table (one keyed data array per view).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub u32);

/// Stable identity of a mark across frames.
///
/// Ids come in two flavors:
/// - raw ids (`from_raw`) for guides and other singleton marks, and
/// - row ids (`for_row`) derived from `(table, row_key)` for data-bound marks.
///
/// Row ids set the top bit so they never collide with raw ids below `2^63`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

const ROW_FLAG: u64 = 1 << 63;
const ROW_KEY_BITS: u32 = 40;
const ROW_KEY_MASK: u64 = (1 << ROW_KEY_BITS) - 1;
const TABLE_MASK: u64 = (1 << (63 - ROW_KEY_BITS)) - 1;

impl MarkId {
    /// Creates an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw & !ROW_FLAG)
    }

    /// Creates the id of the mark bound to `row_key` in `table`.
    ///
    /// Row keys are truncated to 40 bits and table ids to 23 bits.
    pub fn for_row(table: TableId, row_key: u64) -> Self {
        let table_bits = u64::from(table.0) & TABLE_MASK;
        Self(ROW_FLAG | (table_bits << ROW_KEY_BITS) | (row_key & ROW_KEY_MASK))
    }

    /// Returns `(table, row_key)` if this id was created with [`MarkId::for_row`].
    pub fn table_row(self) -> Option<(TableId, u64)> {
        if self.0 & ROW_FLAG == 0 {
            return None;
        }
        let table_bits = (self.0 >> ROW_KEY_BITS) & TABLE_MASK;
        #[allow(clippy::cast_possible_truncation, reason = "masked to 23 bits")]
        let table = TableId(table_bits as u32);
        Some((table, self.0 & ROW_KEY_MASK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_ids_round_trip_and_do_not_collide_with_raw_ids() {
        let id = MarkId::for_row(TableId(7), 42);
        assert_eq!(id.table_row(), Some((TableId(7), 42)));
        assert_ne!(id, MarkId::from_raw(42));
        assert_eq!(MarkId::from_raw(42).table_row(), None);
    }
}
