//! Drag sources for icy_dnd.
//!
//! A [`Draggable`] gates the drag gestures of one element and announces
//! them to the [`Coordinator`] of its drag and drop context.
//!
//! [`Coordinator`]: runtime::Coordinator
#![cfg_attr(docsrs, feature(doc_cfg))]
pub use icy_dnd_runtime as runtime;
pub use runtime::core;

pub mod draggable;

pub use draggable::Draggable;
