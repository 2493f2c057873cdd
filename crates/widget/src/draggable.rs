//! Turn an element into a drag source.
//!
//! A [`Draggable`] decides whether a drag gesture may start on its element
//! and announces the lifecycle of the gesture, both to its own subscribers
//! and to the [`Coordinator`] of its drag and drop context.
//!
//! # Example
//!
//! ```
//! use icy_dnd_widget::core::dom::{Document, GestureEvent};
//! use icy_dnd_widget::draggable::{Config, Draggable};
//! use icy_dnd_widget::runtime::Coordinator;
//!
//! let mut document = Document::new();
//! let card = document.create_root("li");
//! let grip = document.append(card, "span");
//! document.add_class(grip, "grip");
//!
//! let coordinator = Coordinator::shared();
//! let mut draggable = Draggable::<Document, GestureEvent>::new(card, coordinator.clone())
//!     .with_config(Config::new().data(42_u32).scope("cards").handle(".grip"));
//!
//! draggable.on_pointer_over(grip);
//! let status = draggable.on_gesture_start(&mut GestureEvent::new(grip), &mut document);
//!
//! assert!(status.is_started());
//! assert_eq!(coordinator.payload().unwrap().downcast_ref::<u32>(), Some(&42));
//! ```
use crate::core::dnd::{DndAction, Payload, Scope};
use crate::core::host::{Event, Host};
use crate::core::selector::Selector;
use crate::core::SmolStr;
use crate::runtime::{Coordinator, Signal};

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// The configuration of a [`Draggable`].
///
/// The configuration is read when a gesture starts; changing it while a
/// gesture is in progress only affects the next gesture.
#[derive(Debug, Clone)]
pub struct Config {
    /// The data published to the coordinator when a drag starts.
    pub data: Payload,
    /// The selector a gesture must start on, if any.
    pub handle: Option<Selector>,
    /// The intended effect of the drag.
    ///
    /// This is advisory: the drag source does not act on it.
    pub effect: DndAction,
    /// The scope published to the coordinator when a drag starts.
    pub scope: Scope,
    /// The class applied to the element while it is being dragged.
    pub class_while_dragging: Option<SmolStr>,
}

impl Config {
    /// Creates a [`Config`] with the default scope and no handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data of the drag.
    #[must_use]
    pub fn data<T: Any>(mut self, data: T) -> Self {
        self.data = Payload::new(data);
        self
    }

    /// Sets the [`Payload`] of the drag, sharing it with the caller.
    #[must_use]
    pub fn payload(mut self, payload: Payload) -> Self {
        self.data = payload;
        self
    }

    /// Restricts the drag to gestures starting on elements matching the
    /// given selector.
    ///
    /// A selector that fails to parse leaves the drag unrestricted.
    #[must_use]
    pub fn handle(mut self, selector: &str) -> Self {
        self.handle = match Selector::parse(selector) {
            Ok(selector) => Some(selector),
            Err(error) => {
                log::warn!("Ignoring invalid drag handle {selector:?}: {error}");
                None
            }
        };
        self
    }

    /// Restricts the drag to gestures starting on elements matching the
    /// given [`Selector`].
    #[must_use]
    pub fn handle_selector(mut self, selector: Selector) -> Self {
        self.handle = Some(selector);
        self
    }

    /// Sets the advisory effect of the drag.
    #[must_use]
    pub fn effect(mut self, effect: DndAction) -> Self {
        self.effect = effect;
        self
    }

    /// Sets the scope of the drag.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<Scope>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the class applied to the element while it is being dragged.
    ///
    /// An empty class name applies nothing.
    #[must_use]
    pub fn class_while_dragging(mut self, class: impl Into<SmolStr>) -> Self {
        let class = class.into();
        self.class_while_dragging = (!class.is_empty()).then_some(class);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: Payload::default(),
            handle: None,
            effect: DndAction::Move,
            scope: Scope::default(),
            class_while_dragging: None,
        }
    }
}

/// The outcome of [`Draggable::on_gesture_start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The drag started and was announced.
    Started,
    /// The drag was not allowed; the default behavior was suppressed.
    Suppressed,
}

impl Status {
    /// Returns `true` if the drag started.
    pub fn is_started(self) -> bool {
        matches!(self, Status::Started)
    }
}

/// The drag source controller of an element.
///
/// The host forwards its pointer and drag callbacks to a [`Draggable`],
/// together with its native event and access to its element tree.
pub struct Draggable<H: Host, E> {
    element: H::Element,
    coordinator: Rc<Coordinator>,
    config: Config,
    /// The last element the pointer was over.
    pointer_over: Option<H::Element>,
    /// The class currently applied to the element, if any.
    applied_class: Option<SmolStr>,
    is_dragging: bool,
    on_drag_start: Signal<E>,
    on_drag: Signal<E>,
    on_drag_end: Signal<E>,
}

impl<H: Host, E> Draggable<H, E> {
    /// Creates a new [`Draggable`] for the given element, registered in the
    /// drag and drop context of the given [`Coordinator`].
    pub fn new(element: H::Element, coordinator: Rc<Coordinator>) -> Self {
        Self {
            element,
            coordinator,
            config: Config::default(),
            pointer_over: None,
            applied_class: None,
            is_dragging: false,
            on_drag_start: Signal::new(),
            on_drag: Signal::new(),
            on_drag_end: Signal::new(),
        }
    }

    /// Sets the [`Config`] of the [`Draggable`].
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replaces the [`Config`] of the [`Draggable`].
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Returns the [`Config`] of the [`Draggable`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the [`Config`] of the [`Draggable`].
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Returns the element of the [`Draggable`].
    pub fn element(&self) -> &H::Element {
        &self.element
    }

    /// Returns the [`Coordinator`] of the drag and drop context.
    pub fn coordinator(&self) -> &Rc<Coordinator> {
        &self.coordinator
    }

    /// Returns `true` between an allowed gesture start and its end.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// The [`Signal`] emitted with the host event when a drag starts.
    pub fn on_drag_start(&self) -> &Signal<E> {
        &self.on_drag_start
    }

    /// The [`Signal`] emitted with the host event while dragging.
    pub fn on_drag(&self) -> &Signal<E> {
        &self.on_drag
    }

    /// The [`Signal`] emitted with the host event when a drag ends.
    pub fn on_drag_end(&self) -> &Signal<E> {
        &self.on_drag_end
    }

    /// Records the element the pointer is over.
    ///
    /// Only the most recent element is kept.
    pub fn on_pointer_over(&mut self, target: H::Element) {
        log::trace!("DnD pointer over {target:?}");
        self.pointer_over = Some(target);
    }

    /// Returns `true` if a gesture starting now would be allowed.
    ///
    /// Without a handle, any gesture is allowed. With a handle, the element
    /// the pointer was last over, or one of its ancestors up to the drag
    /// source itself, must match the handle selector. An element outside
    /// of the drag source never allows a gesture.
    pub fn is_drag_allowed(&self, host: &H) -> bool {
        let Some(handle) = &self.config.handle else {
            return true;
        };

        let Some(mut current) = self.pointer_over.clone() else {
            return false;
        };

        let mut matched = false;

        loop {
            matched = matched || host.matches(&current, handle);

            if current == self.element {
                return matched;
            }

            match host.parent(&current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Handles the start of a drag gesture.
    ///
    /// If the drag is allowed, the class is applied, the coordinator is
    /// updated, and both the local and the coordinator start notifications
    /// are emitted, in that order. Otherwise, the default behavior of the
    /// event is suppressed and nothing else happens.
    pub fn on_gesture_start(&mut self, event: &mut E, host: &mut H) -> Status
    where
        E: Event,
    {
        if !self.is_drag_allowed(host) {
            log::debug!("DnD drag suppressed on {:?}", self.element);

            event.prevent_default();
            return Status::Suppressed;
        }

        self.release_class(host);

        if let Some(class) = &self.config.class_while_dragging {
            host.add_class(&self.element, class);
            self.applied_class = Some(class.clone());
        }

        self.coordinator
            .set_active(self.config.data.clone(), self.config.scope.clone());
        self.is_dragging = true;

        log::debug!(
            "DnD drag started on {:?} with scope {}",
            self.element,
            self.config.scope
        );

        event.stop_propagation();
        self.on_drag_start.emit(event);
        self.coordinator.drag_started();

        Status::Started
    }

    /// Handles the progress of a drag gesture.
    pub fn on_gesture_progress(&self, event: &E) {
        self.on_drag.emit(event);
    }

    /// Handles the end of a drag gesture.
    ///
    /// This runs whether or not the gesture was allowed to start: the class
    /// is released, the end notifications are emitted, and the event is
    /// stopped and its default behavior suppressed.
    pub fn on_gesture_end(&mut self, event: &mut E, host: &mut H)
    where
        E: Event,
    {
        self.release_class(host);
        self.is_dragging = false;

        log::debug!("DnD drag ended on {:?}", self.element);

        self.coordinator.drag_ended();
        self.on_drag_end.emit(event);

        event.stop_propagation();
        event.prevent_default();
    }

    fn release_class(&mut self, host: &mut H) {
        let class = self
            .applied_class
            .take()
            .or_else(|| self.config.class_while_dragging.clone());

        if let Some(class) = class {
            host.remove_class(&self.element, &class);
        }
    }
}

impl<H: Host, E> fmt::Debug for Draggable<H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draggable")
            .field("element", &self.element)
            .field("config", &self.config)
            .field("pointer_over", &self.pointer_over)
            .field("is_dragging", &self.is_dragging)
            .finish_non_exhaustive()
    }
}
