//! Broadcast notifications to any number of subscribers.
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// A synchronous, multi-subscriber notification channel.
///
/// Subscribers are called in subscription order, on the thread emitting
/// the value. Subscribing or unsubscribing from within a subscriber only
/// takes effect on the next emission.
pub struct Signal<T: ?Sized = ()> {
    subscribers: RefCell<Vec<(Subscription, Rc<dyn Fn(&T)>)>>,
    next: Cell<u64>,
}

/// The handle of a subscriber registered in a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl<T: ?Sized> Signal<T> {
    /// Creates a [`Signal`] without subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
            next: Cell::new(0),
        }
    }

    /// Registers a subscriber, returning its [`Subscription`].
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let subscription = Subscription(self.next.get());
        self.next.set(subscription.0 + 1);

        let f: Rc<dyn Fn(&T)> = Rc::new(f);
        self.subscribers.borrow_mut().push((subscription, f));

        subscription
    }

    /// Removes a subscriber.
    ///
    /// Returns `false` if the [`Subscription`] was not registered.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();

        subscribers.retain(|(id, _)| *id != subscription);

        subscribers.len() != before
    }

    /// Returns the number of subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Returns `true` if nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }

    /// Calls every subscriber with the given value.
    pub fn emit(&self, value: &T) {
        let subscribers: Vec<_> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, f)| Rc::clone(f))
            .collect();

        for subscriber in subscribers {
            subscriber(value);
        }
    }
}

impl Signal {
    /// Notifies every subscriber.
    pub fn notify(&self) {
        self.emit(&());
    }
}

impl<T: ?Sized> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.len())
            .finish()
    }
}
