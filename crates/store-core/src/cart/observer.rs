//! Change notification for cart state.

use std::fmt;

use crate::cart::CartSnapshot;

/// Receives a snapshot after every successful state change.
pub trait CartObserver {
    /// Called once per completed operation, after the mutation is applied.
    fn on_change(&self, snapshot: &CartSnapshot);
}

impl<F> CartObserver for F
where
    F: Fn(&CartSnapshot),
{
    fn on_change(&self, snapshot: &CartSnapshot) {
        self(snapshot)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn CartObserver>)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn CartObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() < len_before
    }

    pub(crate) fn notify(&self, snapshot: &CartSnapshot) {
        for (_, observer) in &self.entries {
            observer.on_change(snapshot);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
