use std::sync::Arc;

use tracing::debug;

use crate::{host::Document, notifier::WeakNotifier, traits::AppObserver};

/// The document lifecycle notifications that trigger re-registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Created,
    Opened,
    /// The user switched to another open document
    Activated,
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleEvent::Created => write!(f, "created"),
            LifecycleEvent::Opened => write!(f, "opened"),
            LifecycleEvent::Activated => write!(f, "activated"),
        }
    }
}

/// Subscribed to the host once per notifier. Forwards every lifecycle notification to the notifier
/// for as long as the notifier is alive.
pub(crate) struct LifecycleListener {
    notifier: WeakNotifier,
}

impl LifecycleListener {
    pub fn new(notifier: WeakNotifier) -> Self { Self { notifier } }

    fn forward(&self, event: LifecycleEvent, document: &Arc<dyn Document>) {
        match self.notifier.upgrade() {
            Some(notifier) => notifier.handle_lifecycle(event, document.as_ref()),
            None => debug!("notifier is gone, ignoring {event} document {}", document.name()),
        }
    }
}

impl AppObserver for LifecycleListener {
    // The document that is already open when the listener subscribes needs registering too
    fn expects_startup_notifications(&self) -> bool { true }

    fn on_new_document(&self, document: &Arc<dyn Document>) { self.forward(LifecycleEvent::Created, document) }

    fn on_open_document(&self, document: &Arc<dyn Document>) { self.forward(LifecycleEvent::Opened, document) }

    fn on_activate_document(&self, document: &Arc<dyn Document>) { self.forward(LifecycleEvent::Activated, document) }
}

#[cfg(all(test, feature = "sim"))]
mod tests {
    use super::*;
    use crate::{
        Notifier,
        sim::{SimDocument, SimHost},
        traits::{SelectionChange, SelectionObserver},
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_listener_outlives_notifier() {
        let host = SimHost::new();
        let notifier = Notifier::new(host.clone());
        let observer: Arc<dyn SelectionObserver> = Arc::new(|_: &dyn Document, _: SelectionChange| {});
        notifier.add_observer(observer).unwrap();
        let weak = notifier.downgrade();
        drop(notifier);
        assert!(weak.upgrade().is_none());

        // the host still holds the listener; events must be harmless
        let document = host.new_document();
        host.activate(&document);
        assert_eq!(document.attachment_count(), 0);
    }

    #[test]
    fn test_listener_forwards_to_live_notifier() {
        let host = SimHost::new();
        let notifier = Notifier::new(host.clone());
        let count = Arc::new(AtomicUsize::new(0));
        let observer: Arc<dyn SelectionObserver> = {
            let count = count.clone();
            Arc::new(move |_: &dyn Document, _: SelectionChange| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };
        notifier.add_observer(observer).unwrap();

        // a document the host never announced
        let document = SimDocument::new("elsewhere");
        let listener = LifecycleListener::new(notifier.downgrade());
        listener.on_open_document(&(Arc::new(document.clone()) as Arc<dyn Document>));

        document.select(1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
