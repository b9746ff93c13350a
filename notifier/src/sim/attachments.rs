use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::observer::{Observer, ObserverId};

/// The observers attached to one simulated subject.
/// Keyed by observer id, so attaching the same observer twice is a no-op.
#[derive(Clone, Default)]
pub(crate) struct Attachments(Arc<Inner>);

#[derive(Default)]
struct Inner {
    observers: RwLock<HashMap<ObserverId, Observer>>,
    detach_calls: AtomicUsize,
    stale_detach_calls: AtomicUsize,
}

impl std::fmt::Debug for Attachments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachments").field("observers", &self.len()).finish()
    }
}

impl Attachments {
    pub fn new() -> Self { Self::default() }

    /// Address of the shared state, used as the owning subject's id
    pub fn addr(&self) -> usize { Arc::as_ptr(&self.0) as usize }

    pub fn attach(&self, observer: &Observer) {
        self.0.observers.write().expect("attachments lock is poisoned").entry(observer.id()).or_insert_with(|| observer.clone());
    }

    /// `alive` is the owning subject's state at the time of the call; detaching from a dead subject
    /// is counted separately.
    pub fn detach(&self, observer: &Observer, alive: bool) {
        self.0.detach_calls.fetch_add(1, Ordering::Relaxed);
        if !alive {
            self.0.stale_detach_calls.fetch_add(1, Ordering::Relaxed);
        }
        self.0.observers.write().expect("attachments lock is poisoned").remove(&observer.id());
    }

    /// Drop every attachment without counting detach calls, the way the host does when it unloads a document
    pub fn clear(&self) { self.0.observers.write().expect("attachments lock is poisoned").clear(); }

    pub fn contains(&self, id: ObserverId) -> bool { self.0.observers.read().expect("attachments lock is poisoned").contains_key(&id) }

    pub fn len(&self) -> usize { self.0.observers.read().expect("attachments lock is poisoned").len() }

    pub fn detach_calls(&self) -> usize { self.0.detach_calls.load(Ordering::Relaxed) }

    pub fn stale_detach_calls(&self) -> usize { self.0.stale_detach_calls.load(Ordering::Relaxed) }

    /// Clone the attached observers so callbacks run without holding the lock
    pub fn snapshot(&self) -> Vec<Observer> { self.0.observers.read().expect("attachments lock is poisoned").values().cloned().collect() }
}
