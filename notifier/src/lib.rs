/*!
Observers that stay attached across documents.

A modeling host delivers change notifications through observers attached to runtime objects: the
active document, its selection set, its page list. The host creates new instances of those
objects whenever a document is created, opened or switched to, and offers no way to enumerate
open documents. A [`Notifier`] registers an observer once and re-attaches it to the matching
subject every time a document becomes current.

# Design requirements:
- Only observers with exactly one subject per document can be persisted: document, selection and
  pages observers. Anything else is rejected with [`NotifierError::InvalidObserverKind`].
- Re-attaching is unconditional and relies on the host ignoring repeated attachment, so an observer
  never fires twice for one change.
- Subjects of closed documents are forgotten before every re-registration and are never detached.
- Removing an observer that is not registered is an error by default ([`RemovalPolicy`]).

# Basic usage

```rust
use persistent_observers::{sim::SimHost, *};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

let host = SimHost::new();
let notifier = Notifier::new(host.clone());

let changes = Arc::new(AtomicUsize::new(0));
let observer: Arc<dyn SelectionObserver> = {
    let changes = changes.clone();
    Arc::new(move |_: &dyn Document, _: SelectionChange| {
        changes.fetch_add(1, Ordering::SeqCst);
    })
};
notifier.add_observer(observer.clone()).unwrap();

// The observer follows the user into a newly opened document
let document = host.open_document("plan.skp");
document.select(42);
assert_eq!(changes.load(Ordering::SeqCst), 1);

notifier.remove_observer(observer.clone()).unwrap();
assert!(notifier.remove_observer(observer).is_err());
```
*/

mod config;
mod error;
pub mod host;
mod lifecycle;
mod notifier;
mod observer;
mod registry;
mod traits;

#[cfg(feature = "sim")]
pub mod sim;

pub use config::*;
pub use error::*;
pub use host::{Document, Host, Subject, SubjectId};
pub use lifecycle::LifecycleEvent;
pub use notifier::Notifier;
pub use observer::*;
pub use traits::*;
