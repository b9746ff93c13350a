//! The collaborator contract a host application has to satisfy.
//!
//! The notifier never creates or destroys host objects. It holds shared handles to documents and
//! subjects, and asks them whether they are still alive before touching them.

use std::sync::Arc;

use crate::{observer::Observer, traits::AppObserver};

/// Host-assigned identity of a subject. Two handles with the same id refer to the same host object.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubjectId(pub usize);

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// The host application
pub trait Host: Send + Sync {
    /// The document currently focused in the host, if any is open
    fn active_document(&self) -> Option<Arc<dyn Document>>;

    /// Subscribe to document lifecycle notifications. App observers persist for the life of the host.
    fn add_app_observer(&self, observer: Arc<dyn AppObserver>);
}

/// Something an observer can be attached to: a document, its selection set or its page list.
///
/// # Host assumptions
/// - `attach` is idempotent. Attaching an observer that is already attached must not make the
///   subject deliver a notification twice.
/// - `detach` of an observer that is not attached is harmless.
/// - Neither calls back into the notifier; both run while its registry is locked.
///
/// The notifier relies on these and cannot verify them.
pub trait Subject: Send + Sync {
    fn subject_id(&self) -> SubjectId;

    fn attach(&self, observer: &Observer);

    fn detach(&self, observer: &Observer);

    /// Direct liveness query. `None` when the subject cannot answer for itself, in which case the
    /// document it belongs to is asked instead.
    fn is_valid(&self) -> Option<bool> { None }

    /// The document this subject belongs to
    fn document(&self) -> Option<Arc<dyn Document>>;
}

/// A top-level editable unit of the host
pub trait Document: Send + Sync {
    /// The document as an attachable subject
    fn subject(&self) -> Arc<dyn Subject>;

    fn selection(&self) -> Arc<dyn Subject>;

    fn pages(&self) -> Arc<dyn Subject>;

    /// False once the document has been closed
    fn is_valid(&self) -> bool;

    fn name(&self) -> String;
}

impl std::fmt::Debug for dyn Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "Document({})", self.name()) }
}

impl std::fmt::Debug for dyn Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "Subject({})", self.subject_id()) }
}

/// A subject is alive if it says so, or failing that, if its document is alive
pub fn is_alive(subject: &dyn Subject) -> bool {
    match subject.is_valid() {
        Some(valid) => valid,
        None => subject.document().is_some_and(|document| document.is_valid()),
    }
}
