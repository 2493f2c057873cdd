//! icy_dnd coordinates drag and drop between the elements of a UI.
//!
//! Elements become drag sources by attaching a [`Draggable`] to them. Every
//! drag source and drop target of the same drag and drop context shares a
//! [`Coordinator`], which holds the payload and [`Scope`] of the drag most
//! recently started and notifies its subscribers when drags start and end.
//!
//! The UI toolkit owning the elements is abstracted by the [`Host`] trait.
//! A headless implementation is available in the [`dom`] module.
//!
//! # Example
//!
//! ```
//! use icy_dnd::dom::{Document, GestureEvent};
//! use icy_dnd::{Config, Coordinator, Draggable, Scope};
//!
//! let mut document = Document::new();
//! let card = document.create_root("li");
//!
//! let coordinator = Coordinator::shared();
//!
//! let target = std::rc::Rc::downgrade(&coordinator);
//! let _ = coordinator.on_drag_start().subscribe(move |_| {
//!     if let Some(active) = target.upgrade().and_then(|c| c.read_active()) {
//!         println!("dragging {} items", active.scope);
//!     }
//! });
//!
//! let mut draggable = Draggable::<Document, GestureEvent>::new(card, coordinator.clone())
//!     .with_config(Config::new().data("card #7").scope("cards"));
//!
//! let mut event = GestureEvent::new(card);
//! let _ = draggable.on_gesture_start(&mut event, &mut document);
//! draggable.on_gesture_end(&mut event, &mut document);
//!
//! assert_eq!(coordinator.scope(), Some(Scope::from("cards")));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
pub use icy_dnd_core as core;
pub use icy_dnd_runtime as runtime;
pub use icy_dnd_widget as widget;

pub use crate::core::dom;
pub use crate::core::selector;
pub use crate::core::{DndAction, Event, Host, Payload, Scope, Selector};
pub use crate::runtime::{Active, Coordinator, Signal, Subscription};
pub use crate::widget::draggable::{self, Config, Draggable, Status};
