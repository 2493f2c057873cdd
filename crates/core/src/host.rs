//! Connect drag sources to the UI toolkit hosting them.
use std::fmt;

use crate::selector::Selector;

/// The element tree a drag source lives in.
///
/// A [`Host`] matches elements against selectors and toggles style
/// classes on them. The toolkit that owns the elements implements it and
/// hands it to the drag source on every lifecycle callback.
pub trait Host {
    /// The handle identifying an element of the host.
    type Element: Clone + PartialEq + fmt::Debug;

    /// Returns `true` if the element matches the given [`Selector`].
    fn matches(&self, element: &Self::Element, selector: &Selector) -> bool;

    /// Returns the parent of the element, if any.
    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Adds a style class to the element.
    fn add_class(&mut self, element: &Self::Element, class: &str);

    /// Removes a style class from the element.
    ///
    /// Removing a class that is not applied must be a no-op.
    fn remove_class(&mut self, element: &Self::Element, class: &str);
}

/// A native event forwarded by the host.
pub trait Event {
    /// Prevents the event from reaching any ancestor handler.
    fn stop_propagation(&mut self);

    /// Suppresses the default behavior of the host for this event.
    fn prevent_default(&mut self);
}
