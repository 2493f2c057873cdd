//! The core library of [icy_dnd].
//!
//! This library holds the basic ideas shared by drag sources and drop
//! targets: payloads, scopes, selectors and the [`Host`] abstraction over
//! the UI toolkit owning the elements.
//!
//! [icy_dnd]: https://github.com/iced-rs/iced
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod dnd;
pub mod dom;
pub mod host;
pub mod selector;

pub use dnd::{DndAction, Payload, Scope};
pub use host::{Event, Host};
pub use selector::Selector;

pub use smol_str::SmolStr;
