use std::sync::Arc;

use crate::host::Document;

/// Changes reported to a [`DocumentObserver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentChange {
    TransactionCommit,
    Save,
    ActivePathChanged,
}

/// Changes reported to a [`SelectionObserver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionChange {
    Added,
    Removed,
    Cleared,
    BulkChange,
}

/// Changes reported to a [`PagesObserver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagesChange {
    ElementAdded,
    ElementRemoved,
    ContentsModified,
}

/// Observes a document as a whole
pub trait DocumentObserver: Send + Sync {
    fn on_document_change(&self, document: &dyn Document, change: DocumentChange);
}

/// Observes the selection set of a document
pub trait SelectionObserver: Send + Sync {
    fn on_selection_change(&self, document: &dyn Document, change: SelectionChange);
}

/// Observes the page list of a document
pub trait PagesObserver: Send + Sync {
    fn on_pages_change(&self, document: &dyn Document, change: PagesChange);
}

/// Observes one entity collection. Collections recur many times within a document, so there is no
/// single subject to re-attach these to.
pub trait EntitiesObserver: Send + Sync {
    fn on_entities_change(&self, document: &dyn Document);
}

/// Observes animation frames. The host keeps these attached by itself.
pub trait FrameChangeObserver: Send + Sync {
    fn on_frame_change(&self, document: &dyn Document, ratio: f64);
}

/// Observes the application. The host keeps these attached by itself, and they are how document
/// lifecycle events are delivered.
pub trait AppObserver: Send + Sync {
    /// Whether the host should deliver a notification for the document that is already active at
    /// the time this observer is added
    fn expects_startup_notifications(&self) -> bool { false }

    fn on_new_document(&self, _document: &Arc<dyn Document>) {}

    fn on_open_document(&self, _document: &Arc<dyn Document>) {}

    /// Called when the user switches to another open document
    fn on_activate_document(&self, _document: &Arc<dyn Document>) {}
}

// Closures are accepted wherever a single-callback observer is expected

impl<F> DocumentObserver for F
where F: Fn(&dyn Document, DocumentChange) + Send + Sync
{
    fn on_document_change(&self, document: &dyn Document, change: DocumentChange) { self(document, change) }
}

impl<F> SelectionObserver for F
where F: Fn(&dyn Document, SelectionChange) + Send + Sync
{
    fn on_selection_change(&self, document: &dyn Document, change: SelectionChange) { self(document, change) }
}

impl<F> PagesObserver for F
where F: Fn(&dyn Document, PagesChange) + Send + Sync
{
    fn on_pages_change(&self, document: &dyn Document, change: PagesChange) { self(document, change) }
}
