//! Per-host handler storage.

use crate::{handler::Handler, host::DispatchHost};
use std::{collections::HashMap, fmt, rc::Rc};

/// One registration of a handler.
///
/// Registering the same [`Handler`] twice yields two entries, each with its
/// own identity, so dropping one leaves the other in place.
pub(crate) type Entry<H> = Rc<Handler<H>>;

/// Mapping from event name to the handlers registered for it.
///
/// Handlers for one event keep their registration order. Each host owns
/// exactly one registry, reachable through [`DispatchHost::registry`].
pub struct Registry<H: DispatchHost> {
    events: HashMap<String, Vec<Entry<H>>>,
}

impl<H: DispatchHost> Registry<H> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            events: HashMap::new(),
        }
    }

    /// Append a handler for `event`.
    pub fn push(&mut self, event: impl Into<String>, handler: Handler<H>) {
        self.events
            .entry(event.into())
            .or_default()
            .push(Rc::new(handler));
    }

    /// Handlers for `event`, in registration order.
    pub fn get(&self, event: &str) -> impl Iterator<Item = &Handler<H>> {
        self.events.get(event).into_iter().flatten().map(|e| &**e)
    }

    /// Number of handlers registered for `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.events.get(event).map_or(0, Vec::len)
    }

    /// Whether at least one handler is registered for `event`.
    pub fn contains(&self, event: &str) -> bool {
        self.handler_count(event) > 0
    }

    /// Event names that currently have handlers.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.events
            .iter()
            .filter(|(_, handlers)| !handlers.is_empty())
            .map(|(event, _)| event.as_str())
    }

    /// Number of events with at least one handler.
    pub fn len(&self) -> usize {
        self.events().count()
    }

    /// Check if no event has a handler.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The registrations for `event`, for snapshotting.
    pub(crate) fn entries(&self, event: &str) -> &[Entry<H>] {
        self.events.get(event).map(Vec::as_slice).unwrap_or_default()
    }

    /// Remove every entry in `dropped` from the sequence for `event`.
    ///
    /// Matching is per registration, so entries pushed while the sequence
    /// was running survive, even when they wrap the same handler.
    pub(crate) fn remove(&mut self, event: &str, dropped: &[Entry<H>]) {
        if let Some(handlers) = self.events.get_mut(event) {
            handlers.retain(|h| !dropped.iter().any(|d| Rc::ptr_eq(d, h)));
            if handlers.is_empty() {
                self.events.remove(event);
            }
        }
    }
}

impl<H: DispatchHost> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DispatchHost> fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.events.iter().map(|(event, h)| (event, h.len())))
            .finish()
    }
}
