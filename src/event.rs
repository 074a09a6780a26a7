use crate::node::NodeSnapshot;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Focused,
    Blurred,
}

/// Notification emitted after the engine state has been updated
#[derive(Debug, Clone, PartialEq)]
pub enum FocusEvent {
    /// A node received focus; carries the node as it is after the change
    Focused(NodeSnapshot),
    /// A node was unregistered; carries the node as it was before removal
    Blurred(NodeSnapshot),
}

impl FocusEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            FocusEvent::Focused(_) => EventKind::Focused,
            FocusEvent::Blurred(_) => EventKind::Blurred,
        }
    }

    pub fn node(&self) -> &NodeSnapshot {
        match self {
            FocusEvent::Focused(node) | FocusEvent::Blurred(node) => node,
        }
    }
}

pub type ListenerResult = Result<(), Box<dyn std::error::Error>>;

type Listener = Box<dyn FnMut(&FocusEvent) -> ListenerResult>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Listeners owned by one engine, called in subscription order
#[derive(Default)]
pub struct Subscribers {
    listeners: Vec<(SubscriptionId, EventKind, Listener)>,
    next_id: u64,
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&FocusEvent) -> ListenerResult + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver `event` to every listener of its kind.
    ///
    /// A failing listener is logged and skipped; the rest still run. Returns
    /// the number of listeners that succeeded.
    pub fn emit(&mut self, event: &FocusEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for (id, _, listener) in self.listeners.iter_mut().filter(|(_, k, _)| *k == kind) {
            match listener(event) {
                Ok(()) => delivered += 1,
                Err(e) => log::warn!(
                    "Subscribers::emit: listener {:?} failed on {:?} for '{}': {}",
                    id,
                    kind,
                    event.node().id,
                    e
                ),
            }
        }
        delivered
    }
}
