use persistent_observers::*;
use std::sync::{Arc, Mutex};
use tracing::Level;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() { tracing_subscriber::fmt().with_max_level(Level::DEBUG).with_test_writer().init(); }

/// A selection observer that records every change it is told about
#[derive(Default)]
pub struct SelectionWatcher {
    changes: Mutex<Vec<(String, SelectionChange)>>,
}

impl SelectionObserver for SelectionWatcher {
    fn on_selection_change(&self, document: &dyn Document, change: SelectionChange) {
        self.changes.lock().unwrap().push((document.name(), change));
    }
}

impl SelectionWatcher {
    pub fn count(&self) -> usize { self.changes.lock().unwrap().len() }

    pub fn reset(&self) { self.changes.lock().unwrap().clear(); }

    /// Drain the recorded changes
    pub fn take(&self) -> Vec<(String, SelectionChange)> { self.changes.lock().unwrap().drain(..).collect() }
}

#[allow(unused)]
pub fn selection_watcher() -> (Arc<SelectionWatcher>, Arc<dyn SelectionObserver>) {
    let watcher = Arc::new(SelectionWatcher::default());
    let observer: Arc<dyn SelectionObserver> = watcher.clone();
    (watcher, observer)
}

#[allow(unused)]
pub fn change_watcher<T: Send + Sync + 'static>() -> (Box<dyn Fn(T) + Send + Sync>, Box<dyn Fn() -> Vec<T> + Send + Sync>) {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let watcher = {
        let changes = changes.clone();
        Box::new(move |value: T| {
            changes.lock().unwrap().push(value);
        })
    };

    let check = Box::new(move || {
        let changes: Vec<T> = changes.lock().unwrap().drain(..).collect();
        changes
    });

    (watcher, check)
}

/// Select a fresh entity in the host's active document
#[allow(unused)]
pub fn change_selection(host: &sim::SimHost) {
    static NEXT: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
    let entity = NEXT.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    host.active().expect("an active document").select(entity);
}
