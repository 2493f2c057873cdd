//! Drag and drop coordination.
//!
//! A [`Coordinator`] is the rendezvous point between the drag sources and
//! the drop targets of one drag and drop context. Create one per context,
//! share it with [`Rc`], and hand it to every source and target.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use icy_dnd_runtime::dnd::Coordinator;
//! use icy_dnd_runtime::core::{Payload, Scope};
//!
//! let coordinator = Rc::new(Coordinator::new());
//!
//! let target = Rc::downgrade(&coordinator);
//! let _ = coordinator.on_drag_start().subscribe(move |_| {
//!     let Some(active) = target.upgrade().and_then(|c| c.read_active()) else {
//!         return;
//!     };
//!
//!     assert!(active.scope.contains("cards"));
//! });
//!
//! coordinator.set_active(Payload::new(7), Scope::from("cards"));
//! coordinator.drag_started();
//! ```
use crate::core::dnd::{Payload, Scope};
use crate::signal::Signal;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The data of the drag operation most recently started in a context.
#[derive(Debug, Clone)]
pub struct Active {
    /// The payload published by the drag source.
    pub payload: Payload,
    /// The scope published by the drag source.
    pub scope: Scope,
}

/// The shared state of a drag and drop context.
///
/// The active data is overwritten when a drag starts and is __not__
/// cleared when it ends. Between a start and an end notification it
/// describes the drag in progress; outside of that window it still holds
/// the data of the previous drag.
#[derive(Default)]
pub struct Coordinator {
    active: RefCell<Option<Active>>,
    on_drag_start: Signal,
    on_drag_end: Signal,
}

impl Coordinator {
    /// Creates a new [`Coordinator`] with no active data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`Coordinator`] ready to be shared.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Overwrites the active payload and scope.
    pub fn set_active(&self, payload: Payload, scope: Scope) {
        log::debug!("DnD active scope set to {scope}");

        *self.active.borrow_mut() = Some(Active { payload, scope });
    }

    /// Returns the active payload and scope.
    ///
    /// Returns `None` only if no drag has ever started in this context.
    pub fn read_active(&self) -> Option<Active> {
        self.active.borrow().clone()
    }

    /// Returns the active payload, if any.
    pub fn payload(&self) -> Option<Payload> {
        self.active
            .borrow()
            .as_ref()
            .map(|active| active.payload.clone())
    }

    /// Returns the active scope, if any.
    pub fn scope(&self) -> Option<Scope> {
        self.active
            .borrow()
            .as_ref()
            .map(|active| active.scope.clone())
    }

    /// The [`Signal`] notified whenever a drag starts.
    ///
    /// The notification carries no data; call [`read_active`] to obtain it.
    ///
    /// [`read_active`]: Self::read_active
    pub fn on_drag_start(&self) -> &Signal {
        &self.on_drag_start
    }

    /// The [`Signal`] notified whenever a drag ends.
    pub fn on_drag_end(&self) -> &Signal {
        &self.on_drag_end
    }

    /// Notifies the start subscribers that a drag has started.
    pub fn drag_started(&self) {
        log::debug!(
            "DnD drag started, notifying {} subscribers",
            self.on_drag_start.len()
        );

        self.on_drag_start.notify();
    }

    /// Notifies the end subscribers that a drag has ended.
    pub fn drag_ended(&self) {
        log::debug!(
            "DnD drag ended, notifying {} subscribers",
            self.on_drag_end.len()
        );

        self.on_drag_end.notify();
    }
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("active", &self.active.borrow())
            .field("on_drag_start", &self.on_drag_start)
            .field("on_drag_end", &self.on_drag_end)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    #[test]
    fn test_nothing_active_initially() {
        let coordinator = Coordinator::new();

        assert!(coordinator.read_active().is_none());
        assert!(coordinator.payload().is_none());
        assert!(coordinator.scope().is_none());
    }

    #[test]
    fn test_set_active_overwrites() {
        let coordinator = Coordinator::new();

        coordinator.set_active(Payload::new(1), Scope::from("a"));
        coordinator.set_active(Payload::new(2), Scope::from(["b", "c"]));

        let active = coordinator.read_active().expect("active data");
        assert_eq!(active.payload.downcast_ref::<i32>(), Some(&2));
        assert_eq!(active.scope, Scope::from(["b", "c"]));
    }

    #[test]
    fn test_end_does_not_clear() {
        let coordinator = Coordinator::new();
        let payload = Payload::new("card");

        coordinator.set_active(payload.clone(), Scope::from("crate"));
        coordinator.drag_started();
        coordinator.drag_ended();

        assert!(coordinator.payload().expect("payload").ptr_eq(&payload));
        assert_eq!(coordinator.scope(), Some(Scope::from("crate")));
    }

    #[test]
    fn test_signals_are_independent() {
        let coordinator = Coordinator::new();
        let started = Rc::new(Cell::new(0));
        let ended = Rc::new(Cell::new(0));

        {
            let started = Rc::clone(&started);
            let _ = coordinator
                .on_drag_start()
                .subscribe(move |_| started.set(started.get() + 1));
        }

        {
            let ended = Rc::clone(&ended);
            let _ = coordinator
                .on_drag_end()
                .subscribe(move |_| ended.set(ended.get() + 1));
        }

        coordinator.drag_started();
        assert_eq!((started.get(), ended.get()), (1, 0));

        coordinator.drag_ended();
        assert_eq!((started.get(), ended.get()), (1, 1));
    }

    #[test]
    fn test_contexts_are_isolated() {
        let first = Coordinator::shared();
        let second = Coordinator::shared();

        first.set_active(Payload::new(1), Scope::from("first"));

        assert!(second.read_active().is_none());
        assert_eq!(first.scope(), Some(Scope::from("first")));
    }
}
