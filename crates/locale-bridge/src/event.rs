use crate::preferences::LocalePreferences;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

/// Name of the event the platform emits when the device locale changes.
pub const LOCALE_CHANGED_EVENT: &str = "localeChanged";

/// Callback invoked with the payload of an emitted event.
pub type EventHandler = Arc<dyn Fn(&LocalePreferences) + Send + Sync>;

/// A source of named events carrying [`LocalePreferences`] payloads.
///
/// The adapter only ever subscribes to [`LOCALE_CHANGED_EVENT`]; the event
/// name is kept explicit so implementations backed by a shared platform
/// emitter can multiplex other events on the same source.
pub trait EventSource: Send + Sync {
    /// Registers `handler` for `event` and returns the handle that removes
    /// it again.
    fn subscribe(&self, event: &str, handler: EventHandler) -> Subscription;
}

/// Handle for one registered listener, owned by the caller.
///
/// Dropping the handle without calling [`release`](Subscription::release)
/// leaves the listener attached; removal only happens through the handle's
/// own release operation.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Builds a subscription whose release runs `cancel` once.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Removes the listener from its event source.
    pub fn release(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    by_event: HashMap<String, Vec<(u64, EventHandler)>>,
}

/// In-process [`EventSource`] that dispatches to listeners in registration
/// order.
///
/// Capability implementations embed one of these and call
/// [`emit`](EventEmitter::emit) when the platform reports a change. The
/// listener table lock is not held while handlers run, so a handler may
/// itself subscribe or release without deadlocking.
#[derive(Clone, Default)]
pub struct EventEmitter {
    listeners: Arc<RwLock<Listeners>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invokes every listener registered for `event`, in registration order.
    pub fn emit(&self, event: &str, preferences: &LocalePreferences) {
        let handlers: Vec<EventHandler> = {
            let listeners = self.listeners.read();
            match listeners.by_event.get(event) {
                Some(entries) => entries.iter().map(|(_, handler)| Arc::clone(handler)).collect(),
                None => return,
            }
        };
        for handler in handlers {
            handler(preferences);
        }
    }

    /// Number of listeners currently attached to `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .read()
            .by_event
            .get(event)
            .map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter").finish_non_exhaustive()
    }
}

impl EventSource for EventEmitter {
    fn subscribe(&self, event: &str, handler: EventHandler) -> Subscription {
        let id = {
            let mut listeners = self.listeners.write();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners
                .by_event
                .entry(event.to_owned())
                .or_default()
                .push((id, handler));
            id
        };

        let table = Arc::downgrade(&self.listeners);
        let event = event.to_owned();
        Subscription::new(move || {
            if let Some(table) = Weak::upgrade(&table) {
                let mut listeners = table.write();
                if let Some(entries) = listeners.by_event.get_mut(&event) {
                    entries.retain(|(entry_id, _)| *entry_id != id);
                }
            }
        })
    }
}
