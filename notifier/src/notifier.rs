use std::sync::{Arc, RwLock, RwLockWriteGuard, Weak};

use tracing::{debug, trace};

use crate::{
    config::{NotifierConfig, RemovalPolicy},
    error::NotifierError,
    host::{Document, Host, SubjectId},
    lifecycle::{LifecycleEvent, LifecycleListener},
    observer::IntoObserver,
    registry::Registry,
};

/// Keeps observers attached to the right subject of whichever document is current.
///
/// Constructing a notifier subscribes it to the host's lifecycle notifications exactly once.
/// Clones are handles to the same registry.
#[derive(Clone)]
pub struct Notifier(Arc<Inner>);

struct Inner {
    host: Arc<dyn Host>,
    config: NotifierConfig,
    registry: RwLock<Registry>,
}

pub(crate) struct WeakNotifier(Weak<Inner>);

impl WeakNotifier {
    pub fn upgrade(&self) -> Option<Notifier> { self.0.upgrade().map(Notifier) }
}

impl Notifier {
    pub fn new<H: Host + 'static>(host: H) -> Self { Self::with_config(host, NotifierConfig::default()) }

    pub fn with_config<H: Host + 'static>(host: H, config: NotifierConfig) -> Self {
        let notifier = Self(Arc::new(Inner { host: Arc::new(host), registry: RwLock::new(Registry::new(config.attach_policy)), config }));
        let listener = LifecycleListener::new(notifier.downgrade());
        notifier.0.host.add_app_observer(Arc::new(listener));
        notifier
    }

    pub(crate) fn downgrade(&self) -> WeakNotifier { WeakNotifier(Arc::downgrade(&self.0)) }

    pub fn config(&self) -> &NotifierConfig { &self.0.config }

    /// Register `observer` and attach it to its subject in the active document.
    ///
    /// Registering an observer that is already registered is not an error, and does not make any
    /// subject notify it twice. With no active document the observer is attached on the next
    /// lifecycle event.
    pub fn add_observer<O: IntoObserver>(&self, observer: O) -> Result<(), NotifierError> {
        let observer = observer.into_observer()?;
        let id = observer.id();
        let mut registry = self.registry();
        registry.insert(observer);
        match self.0.host.active_document() {
            Some(document) => registry.register_observers(document.as_ref()),
            None => debug!("no active document, {id} will be attached on the next lifecycle event"),
        }
        Ok(())
    }

    /// Detach `observer` from every live subject it was attached to and unregister it.
    ///
    /// Fails with [`NotifierError::NotRegistered`] if it is not registered, unless the notifier
    /// was configured with [`RemovalPolicy::Lenient`].
    pub fn remove_observer<O: IntoObserver>(&self, observer: O) -> Result<(), NotifierError> {
        let observer = observer.into_observer()?;
        match self.registry().remove(&observer) {
            Err(NotifierError::NotRegistered(id)) if self.0.config.removal_policy == RemovalPolicy::Lenient => {
                debug!("ignoring removal of unregistered observer {id}");
                Ok(())
            }
            result => result,
        }
    }

    /// Purge subjects of closed documents, then attach every registered observer to `document`.
    /// Called by the lifecycle listener; hosts that deliver lifecycle events some other way can
    /// call it directly.
    pub fn handle_lifecycle(&self, event: LifecycleEvent, document: &dyn Document) {
        let mut registry = self.registry();
        if registry.len() == 0 {
            trace!("{event} document {}: no observers", document.name());
            return;
        }
        debug!("{event} document {}: registering {} observers", document.name(), registry.len());
        if self.0.config.purge_on_lifecycle {
            let purged = registry.purge_invalid_subjects();
            if purged > 0 {
                debug!("purged {purged} dead subjects");
            }
        }
        registry.register_observers(document);
    }

    /// Unregister every observer, detaching each from its live subjects
    pub fn reset(&self) {
        debug!("resetting notifier");
        self.registry().clear();
    }

    pub fn is_registered<O: IntoObserver>(&self, observer: O) -> bool {
        match observer.into_observer() {
            Ok(observer) => self.registry().contains(&observer.id()),
            Err(_) => false,
        }
    }

    /// Ids of the subjects recorded for `observer`, or `None` if it is not registered
    pub fn subject_ids<O: IntoObserver>(&self, observer: O) -> Option<Vec<SubjectId>> {
        let observer = observer.into_observer().ok()?;
        self.registry().subject_ids(&observer.id())
    }

    pub fn len(&self) -> usize { self.registry().len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    fn registry(&self) -> RwLockWriteGuard<'_, Registry> { self.0.registry.write().expect("registry lock is poisoned") }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").field("observers", &self.len()).field("config", &self.0.config).finish()
    }
}
