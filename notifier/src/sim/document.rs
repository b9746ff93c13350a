use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use tracing::trace;

use super::attachments::Attachments;
use crate::{
    host::{Document, Subject, SubjectId, is_alive},
    observer::Observer,
    traits::{DocumentChange, PagesChange, SelectionChange},
};

/// A simulated document. Clones are handles to the same document.
#[derive(Clone)]
pub struct SimDocument(Arc<DocumentInner>);

struct DocumentInner {
    name: RwLock<String>,
    open: AtomicBool,
    attachments: Attachments,
    selection: SimPart,
    pages: SimPart,
    selected: RwLock<Vec<u64>>,
    page_names: RwLock<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartKind {
    Selection,
    Pages,
}

/// A subject owned by a document that cannot report its own liveness: the selection set or the page list
#[derive(Clone)]
pub struct SimPart {
    kind: PartKind,
    document: Weak<DocumentInner>,
    attachments: Attachments,
}

impl SimDocument {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self(Arc::new_cyclic(|weak| DocumentInner {
            name: RwLock::new(name),
            open: AtomicBool::new(true),
            attachments: Attachments::new(),
            selection: SimPart { kind: PartKind::Selection, document: weak.clone(), attachments: Attachments::new() },
            pages: SimPart { kind: PartKind::Pages, document: weak.clone(), attachments: Attachments::new() },
            selected: RwLock::new(Vec::new()),
            page_names: RwLock::new(Vec::new()),
        }))
    }

    pub fn is_open(&self) -> bool { self.0.open.load(Ordering::SeqCst) }

    /// Whether `other` is a handle to the same document
    pub fn same_as(&self, other: &SimDocument) -> bool { Arc::ptr_eq(&self.0, &other.0) }

    /// Load new content into this document object, the way a single-document host does.
    /// The host forgets every observer attached to the old content.
    pub(crate) fn reload(&self, name: impl Into<String>) {
        *self.0.name.write().expect("name lock is poisoned") = name.into();
        self.0.selected.write().expect("selection lock is poisoned").clear();
        self.0.page_names.write().expect("pages lock is poisoned").clear();
        self.clear_attachments();
    }

    pub(crate) fn close(&self) {
        self.0.open.store(false, Ordering::SeqCst);
        self.clear_attachments();
    }

    fn clear_attachments(&self) {
        self.0.attachments.clear();
        self.0.selection.attachments.clear();
        self.0.pages.attachments.clear();
    }

    pub fn select(&self, entity: u64) {
        if !self.guard_open("select") {
            return;
        }
        self.0.selected.write().expect("selection lock is poisoned").push(entity);
        self.notify_selection(SelectionChange::Added);
    }

    pub fn deselect(&self, entity: u64) {
        if !self.guard_open("deselect") {
            return;
        }
        let removed = {
            let mut selected = self.0.selected.write().expect("selection lock is poisoned");
            let before = selected.len();
            selected.retain(|e| *e != entity);
            before != selected.len()
        };
        if removed {
            self.notify_selection(SelectionChange::Removed);
        }
    }

    pub fn clear_selection(&self) {
        if !self.guard_open("clear_selection") {
            return;
        }
        self.0.selected.write().expect("selection lock is poisoned").clear();
        self.notify_selection(SelectionChange::Cleared);
    }

    /// Replace the whole selection in one step
    pub fn set_selection(&self, entities: impl IntoIterator<Item = u64>) {
        if !self.guard_open("set_selection") {
            return;
        }
        *self.0.selected.write().expect("selection lock is poisoned") = entities.into_iter().collect();
        self.notify_selection(SelectionChange::BulkChange);
    }

    pub fn selected(&self) -> Vec<u64> { self.0.selected.read().expect("selection lock is poisoned").clone() }

    pub fn add_page(&self, name: impl Into<String>) {
        if !self.guard_open("add_page") {
            return;
        }
        self.0.page_names.write().expect("pages lock is poisoned").push(name.into());
        self.notify_pages(PagesChange::ElementAdded);
    }

    pub fn remove_page(&self, name: &str) {
        if !self.guard_open("remove_page") {
            return;
        }
        let removed = {
            let mut pages = self.0.page_names.write().expect("pages lock is poisoned");
            let before = pages.len();
            pages.retain(|p| p != name);
            before != pages.len()
        };
        if removed {
            self.notify_pages(PagesChange::ElementRemoved);
        }
    }

    pub fn page_names(&self) -> Vec<String> { self.0.page_names.read().expect("pages lock is poisoned").clone() }

    pub fn commit(&self) {
        if self.guard_open("commit") {
            self.notify_document(DocumentChange::TransactionCommit);
        }
    }

    pub fn save(&self) {
        if self.guard_open("save") {
            self.notify_document(DocumentChange::Save);
        }
    }

    /// Number of observers attached to the document, its selection and its pages
    pub fn attachment_count(&self) -> usize { self.0.attachments.len() + self.0.selection.attachments.len() + self.0.pages.attachments.len() }

    pub fn is_attached(&self, observer: &Observer) -> bool {
        let id = observer.id();
        self.0.attachments.contains(id) || self.0.selection.attachments.contains(id) || self.0.pages.attachments.contains(id)
    }

    pub fn detach_calls(&self) -> usize {
        self.0.attachments.detach_calls() + self.0.selection.attachments.detach_calls() + self.0.pages.attachments.detach_calls()
    }

    /// Detach calls received after the document was closed
    pub fn stale_detach_calls(&self) -> usize {
        self.0.attachments.stale_detach_calls() + self.0.selection.attachments.stale_detach_calls() + self.0.pages.attachments.stale_detach_calls()
    }

    fn guard_open(&self, action: &str) -> bool {
        let open = self.is_open();
        if !open {
            trace!("ignoring {action} on closed document {}", self.name());
        }
        open
    }

    fn notify_document(&self, change: DocumentChange) {
        for observer in self.0.attachments.snapshot() {
            if let Some(observer) = observer.as_document() {
                observer.on_document_change(self, change);
            }
        }
    }

    fn notify_selection(&self, change: SelectionChange) {
        for observer in self.0.selection.attachments.snapshot() {
            if let Some(observer) = observer.as_selection() {
                observer.on_selection_change(self, change);
            }
        }
    }

    fn notify_pages(&self, change: PagesChange) {
        for observer in self.0.pages.attachments.snapshot() {
            if let Some(observer) = observer.as_pages() {
                observer.on_pages_change(self, change);
            }
        }
    }
}

impl std::fmt::Debug for SimDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimDocument").field("name", &self.name()).field("open", &self.is_open()).finish()
    }
}

impl Document for SimDocument {
    fn subject(&self) -> Arc<dyn Subject> { Arc::new(self.clone()) }

    fn selection(&self) -> Arc<dyn Subject> { Arc::new(self.0.selection.clone()) }

    fn pages(&self) -> Arc<dyn Subject> { Arc::new(self.0.pages.clone()) }

    fn is_valid(&self) -> bool { self.is_open() }

    fn name(&self) -> String { self.0.name.read().expect("name lock is poisoned").clone() }
}

impl Subject for SimDocument {
    fn subject_id(&self) -> SubjectId { SubjectId(self.0.attachments.addr()) }

    fn attach(&self, observer: &Observer) { self.0.attachments.attach(observer) }

    fn detach(&self, observer: &Observer) { self.0.attachments.detach(observer, self.is_open()) }

    fn is_valid(&self) -> Option<bool> { Some(self.is_open()) }

    fn document(&self) -> Option<Arc<dyn Document>> { Some(Arc::new(self.clone())) }
}

impl Subject for SimPart {
    fn subject_id(&self) -> SubjectId { SubjectId(self.attachments.addr()) }

    fn attach(&self, observer: &Observer) { self.attachments.attach(observer) }

    fn detach(&self, observer: &Observer) { self.attachments.detach(observer, is_alive(self)) }

    fn document(&self) -> Option<Arc<dyn Document>> {
        let inner = self.document.upgrade()?;
        Some(Arc::new(SimDocument(inner)))
    }
}

impl std::fmt::Debug for SimPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "SimPart({:?}, {})", self.kind, self.subject_id()) }
}
