use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::document::SimDocument;
use crate::{
    host::{Document, Host},
    traits::AppObserver,
};

/// Whether the host keeps several documents open at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentMode {
    /// Every new or opened document is a new object; documents can be switched between
    Multi,
    /// One document object is reused for whatever content is loaded
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    New,
    Open,
    Activate,
}

/// An in-memory host application
#[derive(Clone)]
pub struct SimHost(Arc<Inner>);

struct Inner {
    mode: DocumentMode,
    documents: RwLock<Vec<SimDocument>>,
    active: RwLock<Option<SimDocument>>,
    app_observers: RwLock<Vec<Arc<dyn AppObserver>>>,
    untitled: AtomicUsize,
}

impl Default for SimHost {
    fn default() -> Self { Self::new() }
}

impl SimHost {
    /// A multi-document host started with one untitled document
    pub fn new() -> Self { Self::with_mode(DocumentMode::Multi) }

    /// A host that reuses a single document object
    pub fn single_document() -> Self { Self::with_mode(DocumentMode::Single) }

    pub fn with_mode(mode: DocumentMode) -> Self {
        let startup = SimDocument::new("Untitled");
        Self(Arc::new(Inner {
            mode,
            documents: RwLock::new(vec![startup.clone()]),
            active: RwLock::new(Some(startup)),
            app_observers: RwLock::new(Vec::new()),
            untitled: AtomicUsize::new(1),
        }))
    }

    pub fn mode(&self) -> DocumentMode { self.0.mode }

    pub fn active(&self) -> Option<SimDocument> { self.0.active.read().expect("active lock is poisoned").clone() }

    /// Open documents, oldest first
    pub fn documents(&self) -> Vec<SimDocument> { self.0.documents.read().expect("documents lock is poisoned").clone() }

    /// Create an empty document and make it active
    pub fn new_document(&self) -> SimDocument {
        let n = self.0.untitled.fetch_add(1, Ordering::Relaxed);
        let document = self.load(format!("Untitled {n}"));
        self.fire(Lifecycle::New, &document);
        document
    }

    /// Open a document from disk and make it active
    pub fn open_document(&self, name: impl Into<String>) -> SimDocument {
        let document = self.load(name.into());
        self.fire(Lifecycle::Open, &document);
        document
    }

    /// Switch to an already open document. Returns false if it is not open in this host.
    pub fn activate(&self, document: &SimDocument) -> bool {
        if !self.documents().iter().any(|d| d.same_as(document)) {
            return false;
        }
        self.set_active(Some(document.clone()));
        self.fire(Lifecycle::Activate, document);
        true
    }

    /// Close a document. If it was active, the most recently opened remaining document is activated.
    pub fn close_document(&self, document: &SimDocument) {
        self.0.documents.write().expect("documents lock is poisoned").retain(|d| !d.same_as(document));
        document.close();
        debug!("closed document {}", document.name());

        let was_active = self.active().is_some_and(|active| active.same_as(document));
        if was_active {
            let next = self.documents().last().cloned();
            self.set_active(next.clone());
            if let Some(next) = next {
                self.fire(Lifecycle::Activate, &next);
            }
        }
    }

    fn load(&self, name: String) -> SimDocument {
        let document = match (self.0.mode, self.active()) {
            (DocumentMode::Single, Some(current)) => {
                current.reload(name);
                current
            }
            _ => {
                let document = SimDocument::new(name);
                self.0.documents.write().expect("documents lock is poisoned").push(document.clone());
                document
            }
        };
        self.set_active(Some(document.clone()));
        document
    }

    fn set_active(&self, document: Option<SimDocument>) { *self.0.active.write().expect("active lock is poisoned") = document; }

    fn fire(&self, event: Lifecycle, document: &SimDocument) {
        debug!("{event:?} {}", document.name());
        // Clone the observers so none of our locks are held while they run
        let observers = self.0.app_observers.read().expect("app observers lock is poisoned").clone();
        let document: Arc<dyn Document> = Arc::new(document.clone());
        for observer in observers {
            match event {
                Lifecycle::New => observer.on_new_document(&document),
                Lifecycle::Open => observer.on_open_document(&document),
                Lifecycle::Activate => observer.on_activate_document(&document),
            }
        }
    }
}

impl Host for SimHost {
    fn active_document(&self) -> Option<Arc<dyn Document>> { self.active().map(|document| Arc::new(document) as Arc<dyn Document>) }

    fn add_app_observer(&self, observer: Arc<dyn AppObserver>) {
        self.0.app_observers.write().expect("app observers lock is poisoned").push(observer.clone());
        if observer.expects_startup_notifications() {
            if let Some(document) = self.active_document() {
                observer.on_new_document(&document);
            }
        }
    }
}
