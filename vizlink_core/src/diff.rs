// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;

use kurbo::Rect;

use crate::{MarkId, MarkKind, MarkPayload};

/// A change to the mark set of a [`crate::Scene`] produced by one tick.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark whose key was not present in the previous frame.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Render order hint.
        z_index: i32,
        /// Bounds of the new payload.
        bounds: Option<Rect>,
        /// New payload.
        new: Box<MarkPayload>,
        /// Hover text.
        tooltip: Option<String>,
    },
    /// A mark present in both frames; attributes were recomputed.
    Update {
        /// Mark id.
        id: MarkId,
        /// Mark kind (of the new payload).
        kind: MarkKind,
        /// Previous render order hint.
        old_z_index: i32,
        /// New render order hint.
        new_z_index: i32,
        /// Previous bounds.
        old_bounds: Option<Rect>,
        /// New bounds.
        new_bounds: Option<Rect>,
        /// Previous payload.
        old: Box<MarkPayload>,
        /// New payload.
        new: Box<MarkPayload>,
        /// Active (selected) state carried over from the previous frame.
        active: bool,
        /// Hover text.
        tooltip: Option<String>,
    },
    /// A mark whose key disappeared.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Bounds of the removed payload.
        bounds: Option<Rect>,
        /// Removed payload.
        old: Box<MarkPayload>,
    },
}

impl MarkDiff {
    /// Returns the id of the affected mark.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }

    /// Returns `true` for [`MarkDiff::Enter`].
    pub fn is_enter(&self) -> bool {
        matches!(self, Self::Enter { .. })
    }

    /// Returns `true` for [`MarkDiff::Update`].
    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }

    /// Returns `true` for [`MarkDiff::Exit`].
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }

    /// Returns `true` if this is an update whose attributes did not change.
    pub fn is_unchanged(&self) -> bool {
        match self {
            Self::Update {
                old_z_index,
                new_z_index,
                old,
                new,
                ..
            } => old_z_index == new_z_index && old == new,
            _ => false,
        }
    }
}
