use std::sync::Arc;

use crate::{
    error::NotifierError,
    host::{Document, Subject},
    traits::{AppObserver, DocumentObserver, EntitiesObserver, FrameChangeObserver, PagesObserver, SelectionObserver},
};

/// The kinds of observer that can be made persistent. Each kind has exactly one subject per document.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ObserverKind {
    Document,
    Selection,
    Pages,
}

impl ObserverKind {
    /// The subject an observer of this kind attaches to within `document`
    pub fn resolve_subject(&self, document: &dyn Document) -> Arc<dyn Subject> {
        match self {
            ObserverKind::Document => document.subject(),
            ObserverKind::Selection => document.selection(),
            ObserverKind::Pages => document.pages(),
        }
    }
}

impl std::fmt::Display for ObserverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObserverKind::Document => write!(f, "document"),
            ObserverKind::Selection => write!(f, "selection"),
            ObserverKind::Pages => write!(f, "pages"),
        }
    }
}

/// Identity of an observer: its kind plus the address of the shared allocation.
/// Clones of the same `Arc` have the same id.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObserverId {
    kind: ObserverKind,
    addr: usize,
}

impl ObserverId {
    pub fn kind(&self) -> ObserverKind { self.kind }
}

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}@{:#x}", self.kind, self.addr) }
}

/// An observer the notifier can keep attached across documents
#[derive(Clone)]
pub enum Observer {
    Document(Arc<dyn DocumentObserver>),
    Selection(Arc<dyn SelectionObserver>),
    Pages(Arc<dyn PagesObserver>),
}

impl Observer {
    pub fn kind(&self) -> ObserverKind {
        match self {
            Observer::Document(_) => ObserverKind::Document,
            Observer::Selection(_) => ObserverKind::Selection,
            Observer::Pages(_) => ObserverKind::Pages,
        }
    }

    pub fn id(&self) -> ObserverId {
        let addr = match self {
            Observer::Document(o) => Arc::as_ptr(o) as *const () as usize,
            Observer::Selection(o) => Arc::as_ptr(o) as *const () as usize,
            Observer::Pages(o) => Arc::as_ptr(o) as *const () as usize,
        };
        ObserverId { kind: self.kind(), addr }
    }

    pub fn as_document(&self) -> Option<&Arc<dyn DocumentObserver>> {
        match self {
            Observer::Document(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_selection(&self) -> Option<&Arc<dyn SelectionObserver>> {
        match self {
            Observer::Selection(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_pages(&self) -> Option<&Arc<dyn PagesObserver>> {
        match self {
            Observer::Pages(o) => Some(o),
            _ => None,
        }
    }
}

impl PartialEq for Observer {
    fn eq(&self, other: &Self) -> bool { self.id() == other.id() }
}
impl Eq for Observer {}

impl std::fmt::Debug for Observer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "Observer({})", self.id()) }
}

/// Every kind of observer the host knows about
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum HostObserverKind {
    Document,
    Selection,
    Pages,
    Entities,
    FrameChange,
    App,
}

impl std::fmt::Display for HostObserverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HostObserverKind::Document => "document",
            HostObserverKind::Selection => "selection",
            HostObserverKind::Pages => "pages",
            HostObserverKind::Entities => "entities",
            HostObserverKind::FrameChange => "frame change",
            HostObserverKind::App => "app",
        };
        f.write_str(name)
    }
}

/// Any host observer, whether or not it can be made persistent
#[derive(Clone)]
pub enum HostObserver {
    Document(Arc<dyn DocumentObserver>),
    Selection(Arc<dyn SelectionObserver>),
    Pages(Arc<dyn PagesObserver>),
    Entities(Arc<dyn EntitiesObserver>),
    FrameChange(Arc<dyn FrameChangeObserver>),
    App(Arc<dyn AppObserver>),
}

impl HostObserver {
    pub fn kind(&self) -> HostObserverKind {
        match self {
            HostObserver::Document(_) => HostObserverKind::Document,
            HostObserver::Selection(_) => HostObserverKind::Selection,
            HostObserver::Pages(_) => HostObserverKind::Pages,
            HostObserver::Entities(_) => HostObserverKind::Entities,
            HostObserver::FrameChange(_) => HostObserverKind::FrameChange,
            HostObserver::App(_) => HostObserverKind::App,
        }
    }
}

impl TryFrom<HostObserver> for Observer {
    type Error = NotifierError;

    fn try_from(observer: HostObserver) -> Result<Self, Self::Error> {
        match observer {
            HostObserver::Document(o) => Ok(Observer::Document(o)),
            HostObserver::Selection(o) => Ok(Observer::Selection(o)),
            HostObserver::Pages(o) => Ok(Observer::Pages(o)),
            other => Err(NotifierError::InvalidObserverKind(other.kind())),
        }
    }
}

impl From<Observer> for HostObserver {
    fn from(observer: Observer) -> Self {
        match observer {
            Observer::Document(o) => HostObserver::Document(o),
            Observer::Selection(o) => HostObserver::Selection(o),
            Observer::Pages(o) => HostObserver::Pages(o),
        }
    }
}

/// Trait for types that can be handed to the notifier as an observer
pub trait IntoObserver {
    fn into_observer(self) -> Result<Observer, NotifierError>;
}

impl IntoObserver for Observer {
    fn into_observer(self) -> Result<Observer, NotifierError> { Ok(self) }
}

impl IntoObserver for &Observer {
    fn into_observer(self) -> Result<Observer, NotifierError> { Ok(self.clone()) }
}

impl IntoObserver for HostObserver {
    fn into_observer(self) -> Result<Observer, NotifierError> { self.try_into() }
}

impl IntoObserver for Arc<dyn DocumentObserver> {
    fn into_observer(self) -> Result<Observer, NotifierError> { Ok(Observer::Document(self)) }
}

impl IntoObserver for Arc<dyn SelectionObserver> {
    fn into_observer(self) -> Result<Observer, NotifierError> { Ok(Observer::Selection(self)) }
}

impl IntoObserver for Arc<dyn PagesObserver> {
    fn into_observer(self) -> Result<Observer, NotifierError> { Ok(Observer::Pages(self)) }
}

impl IntoObserver for Arc<dyn EntitiesObserver> {
    fn into_observer(self) -> Result<Observer, NotifierError> { Err(NotifierError::InvalidObserverKind(HostObserverKind::Entities)) }
}

impl IntoObserver for Arc<dyn FrameChangeObserver> {
    fn into_observer(self) -> Result<Observer, NotifierError> { Err(NotifierError::InvalidObserverKind(HostObserverKind::FrameChange)) }
}

impl IntoObserver for Arc<dyn AppObserver> {
    fn into_observer(self) -> Result<Observer, NotifierError> { Err(NotifierError::InvalidObserverKind(HostObserverKind::App)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SelectionChange;

    struct NullEntities;
    impl EntitiesObserver for NullEntities {
        fn on_entities_change(&self, _document: &dyn Document) {}
    }

    #[test]
    fn test_clones_share_identity() {
        let inner: Arc<dyn SelectionObserver> = Arc::new(|_: &dyn Document, _: SelectionChange| {});
        let a = Observer::Selection(inner.clone());
        let b = Observer::Selection(inner);
        assert_eq!(a.id(), b.id());
        assert_eq!(a, b);

        let other: Arc<dyn SelectionObserver> = Arc::new(|_: &dyn Document, _: SelectionChange| {});
        assert_ne!(a.id(), Observer::Selection(other).id());
    }

    #[test]
    fn test_unsupported_host_kinds_are_rejected() {
        let entities = HostObserver::Entities(Arc::new(NullEntities));
        assert!(matches!(Observer::try_from(entities), Err(NotifierError::InvalidObserverKind(HostObserverKind::Entities))));
    }

    #[test]
    fn test_supported_host_kinds_convert() {
        let selection: Arc<dyn SelectionObserver> = Arc::new(|_: &dyn Document, _: SelectionChange| {});
        let observer = HostObserver::Selection(selection).into_observer().unwrap();
        assert_eq!(observer.kind(), ObserverKind::Selection);
        assert!(observer.as_selection().is_some());
        assert!(observer.as_pages().is_none());
    }
}
