// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-view coordination.
//!
//! A [`Dispatcher`] is a synchronous publish/subscribe bus keyed by event name. Payloads are
//! typed: an application defines one enum of events and implements [`Event`] for it, so a
//! handler can never receive a payload shaped for another event.

extern crate alloc;

use alloc::boxed::Box;

use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// An event payload routed by name.
pub trait Event {
    /// The channel an event is delivered on.
    type Name: Copy + Eq + Hash + fmt::Debug;

    /// Returns the channel of this event.
    fn name(&self) -> Self::Name;
}

type Handler<E> = Box<dyn FnMut(&E)>;

/// Synchronous named-event bus.
///
/// - Several handlers may be registered per name; they run in registration order.
/// - [`Dispatcher::emit`] runs every handler to completion before returning.
/// - Nothing is buffered: a handler registered after an emit never sees that event.
pub struct Dispatcher<E: Event> {
    handlers: HashMap<E::Name, SmallVec<[Handler<E>; 2]>>,
}

impl<E: Event> Dispatcher<E> {
    /// Creates a dispatcher with no handlers.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` for events named `name`.
    pub fn on(&mut self, name: E::Name, handler: impl FnMut(&E) + 'static) {
        self.handlers
            .entry(name)
            .or_default()
            .push(Box::new(handler));
    }

    /// Delivers `event` to every handler registered for its name.
    ///
    /// Returns the number of handlers invoked.
    pub fn emit(&mut self, event: &E) -> usize {
        let name = event.name();
        let Some(handlers) = self.handlers.get_mut(&name) else {
            tracing::trace!(?name, "emit with no subscribers");
            return 0;
        };
        for handler in handlers.iter_mut() {
            handler(event);
        }
        tracing::debug!(?name, handlers = handlers.len(), "emit");
        handlers.len()
    }

    /// Returns the number of handlers registered for `name`.
    pub fn handler_count(&self, name: E::Name) -> usize {
        self.handlers.get(&name).map_or(0, |h| h.len())
    }
}

impl<E: Event> Default for Dispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, handlers) in &self.handlers {
            map.entry(name, &handlers.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Name {
        Filter,
        Hover,
    }

    enum TestEvent {
        Filter(Vec<String>),
        Hover(usize),
    }

    impl Event for TestEvent {
        type Name = Name;

        fn name(&self) -> Name {
            match self {
                Self::Filter(_) => Name::Filter,
                Self::Hover(_) => Name::Hover,
            }
        }
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut d = Dispatcher::new();
        for tag in 0..3 {
            let log = Rc::clone(&log);
            d.on(Name::Filter, move |e: &TestEvent| {
                if let TestEvent::Filter(labels) = e {
                    log.borrow_mut().push((tag, labels.len()));
                }
            });
        }
        assert_eq!(d.emit(&TestEvent::Filter(vec![String::from("easy")])), 3);
        assert_eq!(*log.borrow(), vec![(0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn events_are_routed_by_name_and_not_replayed() {
        let hovers = Rc::new(RefCell::new(Vec::new()));
        let mut d = Dispatcher::new();
        d.emit(&TestEvent::Hover(1));

        let sink = Rc::clone(&hovers);
        d.on(Name::Hover, move |e: &TestEvent| {
            if let TestEvent::Hover(i) = e {
                sink.borrow_mut().push(*i);
            }
        });
        assert_eq!(d.emit(&TestEvent::Filter(Vec::new())), 0);
        d.emit(&TestEvent::Hover(2));

        assert_eq!(*hovers.borrow(), vec![2]);
        assert_eq!(d.handler_count(Name::Hover), 1);
        assert_eq!(d.handler_count(Name::Filter), 0);
    }
}
