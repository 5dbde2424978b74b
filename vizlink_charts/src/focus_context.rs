// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus+context coordination.
//!
//! A context view shows the full domain and carries a horizontal brush; a focus view shows the
//! brushed sub-interval. [`FocusContext`] owns both x scales and the brush and keeps them
//! consistent:
//! - a brush selection `[a, b]` sets the focus domain to `[invert(a), invert(b)]` through the
//!   context scale,
//! - clearing the brush restores the full domain.

extern crate alloc;

use alloc::vec::Vec;

use crate::interact::{BrushEvent, BrushX};
use crate::scale::ScaleContinuous;

/// Linked x scales of a focus view and its context view.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusContext {
    context: ScaleContinuous,
    focus: ScaleContinuous,
    brush: BrushX,
}

impl FocusContext {
    /// Creates the controller from the two x scales.
    ///
    /// The focus domain starts as the context (full) domain; the brush spans the context range
    /// with no selection.
    pub fn new(context: ScaleContinuous, mut focus: ScaleContinuous) -> Self {
        focus.set_domain(context.domain());
        let brush = BrushX::new(context.range());
        Self {
            context,
            focus,
            brush,
        }
    }

    /// Returns the full domain shown by the context view.
    pub fn full_domain(&self) -> (f64, f64) {
        self.context.domain()
    }

    /// Returns the domain currently shown by the focus view.
    pub fn focus_domain(&self) -> (f64, f64) {
        self.focus.domain()
    }

    /// Returns the focus x scale.
    pub fn focus_scale(&self) -> &ScaleContinuous {
        &self.focus
    }

    /// Returns the context x scale.
    pub fn context_scale(&self) -> &ScaleContinuous {
        &self.context
    }

    /// Returns the brush.
    pub fn brush(&self) -> &BrushX {
        &self.brush
    }

    /// Replaces the full domain (after a reload), clearing the brush.
    pub fn set_full_domain(&mut self, domain: (f64, f64)) {
        self.context.set_domain(domain);
        self.brush.clear();
        self.focus.set_domain(domain);
    }

    /// Moves the brush to a pixel selection in the context view and applies the result.
    ///
    /// Returns the brush events, in the order a drag would emit them.
    pub fn brush_to(&mut self, selection: Option<(f64, f64)>) -> Vec<BrushEvent> {
        let events = self.brush.move_to(selection);
        for event in &events {
            self.apply(*event);
        }
        events
    }

    /// Brushes the context view over the data interval `[start, end]`.
    pub fn select_domain(&mut self, start: f64, end: f64) -> Vec<BrushEvent> {
        let a = self.context.map(start);
        let b = self.context.map(end);
        self.brush_to(Some((a, b)))
    }

    fn apply(&mut self, event: BrushEvent) {
        match event {
            BrushEvent::Brush(a, b) => {
                let (d0, d1) = (self.context.invert(a), self.context.invert(b));
                self.focus.set_domain((d0.min(d1), d0.max(d1)));
            }
            BrushEvent::End(None) => {
                self.focus.set_domain(self.context.domain());
            }
            BrushEvent::End(Some(_)) => {}
        }
        tracing::debug!(focus = ?self.focus.domain(), "focus domain");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleTime;
    use crate::time::timestamp;

    fn controller() -> FocusContext {
        let full = (timestamp(2016, 1, 1), timestamp(2020, 1, 1));
        let context = ScaleContinuous::Time(ScaleTime::new(full, (45.0, 845.0)));
        let focus = ScaleContinuous::Time(ScaleTime::new(full, (45.0, 845.0)));
        FocusContext::new(context, focus)
    }

    #[test]
    fn brush_narrows_focus_within_context() {
        let mut fc = controller();
        let events = fc.brush_to(Some((445.0, 245.0)));
        assert_eq!(
            events,
            [
                BrushEvent::Brush(245.0, 445.0),
                BrushEvent::End(Some((245.0, 445.0)))
            ]
        );
        let (f0, f1) = fc.focus_domain();
        let (c0, c1) = fc.full_domain();
        assert!(f0 < f1);
        assert!(c0 <= f0 && f1 <= c1);
        assert!((f0 - fc.context_scale().invert(245.0)).abs() < 1.0e-6);
    }

    #[test]
    fn clearing_restores_full_domain() {
        let mut fc = controller();
        fc.select_domain(timestamp(2019, 1, 1), fc.full_domain().1);
        assert_ne!(fc.focus_domain(), fc.full_domain());
        assert_eq!(fc.brush_to(None), [BrushEvent::End(None)]);
        assert_eq!(fc.focus_domain(), fc.full_domain());

        // Zero-width counts as cleared too.
        fc.brush_to(Some((300.0, 300.0)));
        assert_eq!(fc.focus_domain(), fc.full_domain());
        assert_eq!(fc.brush().selection(), None);
    }

    #[test]
    fn default_selection_starts_at_given_date() {
        let mut fc = controller();
        let start = timestamp(2019, 1, 1);
        fc.select_domain(start, fc.full_domain().1);
        let (f0, f1) = fc.focus_domain();
        assert!((f0 - start).abs() < 1.0);
        assert!((f1 - fc.full_domain().1).abs() < 1.0);
    }
}
