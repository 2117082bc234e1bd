//! State-change notification for the search page.
//!
//! A presentation layer subscribes once and re-renders whatever the event
//! names. Events are delivered synchronously on the thread that mutates
//! the page.

/// What changed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    LoadingChanged(bool),
    FailedChanged(bool),
    /// Results were replaced; carries the new count.
    ResultsReplaced(usize),
    /// Category rows were replaced; carries the new count.
    CategoriesReplaced(usize),
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PageEvent)>;

/// Ordered list of page listeners.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&PageEvent) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Call every listener in subscription order.
    pub fn notify(&mut self, event: PageEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
