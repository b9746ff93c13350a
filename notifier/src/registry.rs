use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    config::AttachPolicy,
    error::NotifierError,
    host::{Document, Subject, SubjectId, is_alive},
    observer::{Observer, ObserverId},
};

/// A registered observer and every subject it has been attached to
struct Entry {
    observer: Observer,
    subjects: HashMap<SubjectId, Arc<dyn Subject>>,
}

impl Entry {
    fn detach_all(&self) {
        for subject in self.subjects.values() {
            if is_alive(subject.as_ref()) {
                subject.detach(&self.observer);
            }
        }
    }
}

/// Bookkeeping of persistent observers. Holds no locks and never calls into the notifier; the
/// caller is responsible for serializing access.
pub(crate) struct Registry {
    entries: HashMap<ObserverId, Entry>,
    attach_policy: AttachPolicy,
}

impl Registry {
    pub fn new(attach_policy: AttachPolicy) -> Self { Self { entries: HashMap::new(), attach_policy } }

    /// Ensure an entry exists for `observer`. Returns false if it was already registered.
    pub fn insert(&mut self, observer: Observer) -> bool {
        let id = observer.id();
        if self.entries.contains_key(&id) {
            return false;
        }
        debug!("registering observer {id}");
        self.entries.insert(id, Entry { observer, subjects: HashMap::new() });
        true
    }

    /// Detach `observer` from all of its live subjects and forget it
    pub fn remove(&mut self, observer: &Observer) -> Result<(), NotifierError> {
        let id = observer.id();
        let entry = self.entries.remove(&id).ok_or(NotifierError::NotRegistered(id))?;
        debug!("removing observer {id} from {} subjects", entry.subjects.len());
        entry.detach_all();
        Ok(())
    }

    /// Attach every registered observer to its subject within `document`
    pub fn register_observers(&mut self, document: &dyn Document) {
        for (id, entry) in self.entries.iter_mut() {
            let subject = id.kind().resolve_subject(document);
            let subject_id = subject.subject_id();
            if self.attach_policy == AttachPolicy::SkipRecorded && entry.subjects.contains_key(&subject_id) {
                trace!("observer {id} already recorded on subject {subject_id}");
                continue;
            }
            subject.attach(&entry.observer);
            entry.subjects.insert(subject_id, subject);
        }
    }

    /// Forget subjects whose document has closed. Returns how many were dropped.
    pub fn purge_invalid_subjects(&mut self) -> usize {
        let mut purged = 0;
        for (id, entry) in self.entries.iter_mut() {
            entry.subjects.retain(|subject_id, subject| {
                let alive = is_alive(&**subject);
                if !alive {
                    trace!("dropping dead subject {subject_id} of observer {id}");
                    purged += 1;
                }
                alive
            });
        }
        purged
    }

    /// Remove every observer, detaching each from its live subjects
    pub fn clear(&mut self) {
        for (_, entry) in self.entries.drain() {
            entry.detach_all();
        }
    }

    pub fn contains(&self, id: &ObserverId) -> bool { self.entries.contains_key(id) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn subject_ids(&self, id: &ObserverId) -> Option<Vec<SubjectId>> {
        self.entries.get(id).map(|entry| {
            let mut ids: Vec<_> = entry.subjects.keys().copied().collect();
            ids.sort();
            ids
        })
    }
}
