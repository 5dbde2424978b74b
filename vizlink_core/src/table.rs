// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::vec::Vec;

use crate::TableId;

/// Row identity for one bound data array.
///
/// A table does not own records: views keep their records (typically a shared dataset plus an
/// index subset) and bind them here by key. `row_keys[i]` is the stable key of the `i`-th bound
/// record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    /// Table id.
    pub id: TableId,
    /// Monotonic version, bumped on every rebind.
    pub version: u64,
    /// Stable keys for each bound row, in bind order.
    pub row_keys: Vec<u64>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(id: TableId) -> Self {
        Self {
            id,
            version: 1,
            row_keys: Vec::new(),
        }
    }

    /// Bumps the table version.
    pub fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Returns the number of bound rows.
    pub fn row_count(&self) -> usize {
        self.row_keys.len()
    }
}
