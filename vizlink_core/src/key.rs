// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row keys for data binding.
//!
//! A bind needs a `u64` per record. Integer keys (indices, ids) are used as-is; label keys are
//! interned so the same label maps to the same row key for the lifetime of the interner.

extern crate alloc;

use alloc::string::String;

use hashbrown::HashMap;

/// Assigns stable `u64` keys to string labels in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct KeyInterner {
    labels: HashMap<String, u64>,
}

impl KeyInterner {
    /// Creates an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the key for `label`, assigning the next free key on first use.
    pub fn intern(&mut self, label: &str) -> u64 {
        if let Some(&key) = self.labels.get(label) {
            return key;
        }
        let key = self.labels.len() as u64;
        self.labels.insert(String::from(label), key);
        key
    }

    /// Returns the key for `label` if it was interned before.
    pub fn get(&self, label: &str) -> Option<u64> {
        self.labels.get(label).copied()
    }

    /// Returns the label interned under `key`.
    pub fn label(&self, key: u64) -> Option<&str> {
        self.labels
            .iter()
            .find_map(|(label, &k)| (k == key).then_some(label.as_str()))
    }
}

/// A value usable as the identity key of a bound record.
///
/// Do not mix integer and label keys within one table: integer keys are not interned and may
/// collide with interned label keys.
pub trait RowKey {
    /// Resolves this value to a row key.
    fn row_key(&self, interner: &mut KeyInterner) -> u64;
}

impl RowKey for u64 {
    fn row_key(&self, _interner: &mut KeyInterner) -> u64 {
        *self
    }
}

impl RowKey for u32 {
    fn row_key(&self, _interner: &mut KeyInterner) -> u64 {
        u64::from(*self)
    }
}

impl RowKey for usize {
    fn row_key(&self, _interner: &mut KeyInterner) -> u64 {
        *self as u64
    }
}

impl RowKey for str {
    fn row_key(&self, interner: &mut KeyInterner) -> u64 {
        interner.intern(self)
    }
}

impl RowKey for String {
    fn row_key(&self, interner: &mut KeyInterner) -> u64 {
        interner.intern(self)
    }
}

impl<T: RowKey + ?Sized> RowKey for &T {
    fn row_key(&self, interner: &mut KeyInterner) -> u64 {
        (**self).row_key(interner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_keep_their_first_assigned_key() {
        let mut keys = KeyInterner::new();
        let easy = "easy".row_key(&mut keys);
        let hard = "difficult".row_key(&mut keys);
        assert_ne!(easy, hard);
        assert_eq!("easy".row_key(&mut keys), easy);
        assert_eq!(keys.label(hard), Some("difficult"));
    }
}
