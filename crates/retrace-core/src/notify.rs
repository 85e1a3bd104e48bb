//! Subscriber registry and synchronous broadcast
//!
//! The hub is how independent consumers (an activity log panel, a history
//! modal, keyboard wiring) stay synchronized without polling: every
//! mutating timeline operation computes one [`TimelineStatus`] and the hub
//! delivers it to all subscribers, synchronously, in registration order.
//!
//! A subscriber that fails must not block the others; failures are logged
//! and delivery continues.

use crate::error::CallbackError;
use crate::status::TimelineStatus;
use indexmap::IndexMap;

/// Unique identifier for a registered subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

impl SubscriberId {
    /// Create a new subscriber ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A registered subscriber callback
pub type SubscriberFn<S> = Box<dyn FnMut(&TimelineStatus<S>) -> Result<(), CallbackError>>;

/// Registry of status subscribers with ordered, failure-isolated delivery
///
/// # Example
///
/// ```rust,ignore
/// use retrace_core::NotificationHub;
///
/// let mut hub = NotificationHub::new();
/// let id = hub.subscribe(|status| {
///     println!("cursor now at {}", status.cursor);
///     Ok(())
/// });
///
/// // ... broadcasts happen ...
///
/// hub.unsubscribe(id);
/// ```
pub struct NotificationHub<S: 'static> {
    /// Subscribers in registration order
    subscribers: IndexMap<SubscriberId, SubscriberFn<S>>,
    /// Next subscriber ID to hand out
    next_id: u64,
}

impl<S: 'static> NotificationHub<S> {
    /// Create an empty hub
    pub fn new() -> Self {
        Self {
            subscribers: IndexMap::new(),
            next_id: 0,
        }
    }

    /// Register a subscriber and return its ID
    ///
    /// The ID is the token for [`unsubscribe`]; IDs are never reused within
    /// one hub.
    ///
    /// [`unsubscribe`]: NotificationHub::unsubscribe
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&TimelineStatus<S>) -> Result<(), CallbackError> + 'static,
    {
        let id = SubscriberId::new(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, Box::new(callback));
        id
    }

    /// Remove a subscriber
    ///
    /// Returns true if the ID was registered. Delivery order of the
    /// remaining subscribers is unchanged.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.shift_remove(&id).is_some()
    }

    /// Deliver a status to every subscriber in registration order
    ///
    /// A failing subscriber is logged and skipped; it does not prevent
    /// delivery to the subscribers after it. Returns the number of
    /// subscribers that failed.
    pub fn broadcast(&mut self, status: &TimelineStatus<S>) -> usize {
        let mut failures = 0;
        for (id, subscriber) in self.subscribers.iter_mut() {
            if let Err(e) = subscriber(status) {
                log::warn!("subscriber {:?} failed during broadcast: {}", id, e);
                failures += 1;
            }
        }
        failures
    }

    /// Number of registered subscribers
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Check if no subscribers are registered
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Remove all subscribers
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

impl<S: 'static> Default for NotificationHub<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> std::fmt::Debug for NotificationHub<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHub")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
