//! Drag and Drop support.
//!
//! This module provides the values exchanged during an in-process drag
//! operation: the opaque [`Payload`] a drag source publishes, the [`Scope`]
//! drop targets use to decide compatibility, and the advisory [`DndAction`].

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use smol_str::SmolStr;

/// The action to perform when a drag is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DndAction {
    /// No action.
    #[default]
    None,
    /// Copy the data.
    Copy,
    /// Move the data.
    Move,
    /// Create a link to the data.
    Link,
    /// Ask the user what action to perform.
    Ask,
}

impl DndAction {
    /// Returns `true` if this is `None`.
    pub fn is_none(self) -> bool {
        matches!(self, DndAction::None)
    }
}

/// The data carried by a drag operation.
///
/// A [`Payload`] can hold a value of any type. Cloning it is cheap and
/// shares the same value: the drag source keeps its handle while the
/// coordinator holds a second one for the duration of the drag.
#[derive(Clone)]
pub struct Payload(Rc<dyn Any>);

impl Payload {
    /// Wraps the given value in a new [`Payload`].
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Creates a [`Payload`] sharing an existing reference-counted value.
    pub fn from_rc<T: Any>(value: Rc<T>) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner value if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Returns `true` if the inner value is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Returns `true` if both payloads share the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::new(())
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Payload")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// The compatibility label of a drag operation.
///
/// A [`Scope`] is either a single identifier or an ordered list of them.
/// It is propagated exactly as given: no normalization, no deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Scope {
    /// A single scope identifier.
    Single(SmolStr),
    /// An ordered list of scope identifiers.
    Many(Vec<SmolStr>),
}

impl Scope {
    /// The identifier used when no scope is configured.
    pub const DEFAULT: &'static str = "default";

    /// Returns the identifiers of this [`Scope`], in order.
    pub fn as_slice(&self) -> &[SmolStr] {
        match self {
            Scope::Single(name) => std::slice::from_ref(name),
            Scope::Many(names) => names,
        }
    }

    /// Returns an iterator over the identifiers of this [`Scope`].
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.as_slice().iter().map(SmolStr::as_str)
    }

    /// Returns `true` if the [`Scope`] lists the given identifier.
    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|candidate| candidate == name)
    }

    /// Returns `true` if both scopes share at least one identifier.
    pub fn intersects(&self, other: &Scope) -> bool {
        self.iter().any(|name| other.contains(name))
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::Single(SmolStr::new_static(Self::DEFAULT))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Single(name) => f.write_str(name),
            Scope::Many(names) => {
                f.write_str("[")?;

                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }

                    f.write_str(name)?;
                }

                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Scope {
    fn from(name: &str) -> Self {
        Scope::Single(SmolStr::new(name))
    }
}

impl From<String> for Scope {
    fn from(name: String) -> Self {
        Scope::Single(SmolStr::from(name))
    }
}

impl From<SmolStr> for Scope {
    fn from(name: SmolStr) -> Self {
        Scope::Single(name)
    }
}

impl<S: Into<SmolStr>> From<Vec<S>> for Scope {
    fn from(names: Vec<S>) -> Self {
        Scope::Many(names.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<SmolStr>, const N: usize> From<[S; N]> for Scope {
    fn from(names: [S; N]) -> Self {
        Scope::Many(names.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scope() {
        assert_eq!(Scope::default(), Scope::from("default"));
        assert!(Scope::default().contains("default"));
    }

    #[test]
    fn test_scope_keeps_order_and_duplicates() {
        let scope = Scope::from(["b", "a", "b"]);

        assert_eq!(scope.iter().collect::<Vec<_>>(), vec!["b", "a", "b"]);
        assert_eq!(scope.to_string(), "[b, a, b]");
    }

    #[test]
    fn test_single_scope_is_not_a_list() {
        let single = Scope::from("a");
        let many = Scope::from(vec!["a"]);

        assert_ne!(single, many);
        assert_eq!(single.as_slice(), many.as_slice());
    }

    #[test]
    fn test_scope_intersects() {
        let scope = Scope::from(["a", "b"]);

        assert!(scope.intersects(&Scope::from("b")));
        assert!(!scope.intersects(&Scope::from(["c", "d"])));
    }

    #[test]
    fn test_payload_downcast() {
        let payload = Payload::new(7_u32);

        assert!(payload.is::<u32>());
        assert_eq!(payload.downcast_ref::<u32>(), Some(&7));
        assert_eq!(payload.downcast_ref::<i64>(), None);
    }

    #[test]
    fn test_payload_clone_shares_value() {
        let payload = Payload::new(String::from("item"));
        let other = payload.clone();

        assert!(payload.ptr_eq(&other));
        assert!(!payload.ptr_eq(&Payload::new(String::from("item"))));
    }

    #[test]
    fn test_payload_from_rc() {
        let value = Rc::new(vec![1, 2, 3]);
        let payload = Payload::from_rc(Rc::clone(&value));

        assert_eq!(Rc::strong_count(&value), 2);
        assert_eq!(payload.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_action_is_none() {
        assert!(DndAction::default().is_none());
        assert!(!DndAction::Move.is_none());
    }
}
