//! A renderer-agnostic runtime for drag and drop.
//!
//! The runtime owns the state shared by every participant of a drag and
//! drop context: the [`Coordinator`] and the [`Signal`]s it broadcasts on.
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod dnd;
pub mod signal;

pub use icy_dnd_core as core;

pub use dnd::{Active, Coordinator};
pub use signal::{Signal, Subscription};
