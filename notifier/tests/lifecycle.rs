mod common;
use common::{change_selection, selection_watcher};
use persistent_observers::{
    sim::{DocumentMode, SimHost},
    *,
};

#[test]
fn test_single_document_host_reattaches() {
    let host = SimHost::single_document();
    assert_eq!(host.mode(), DocumentMode::Single);
    let notifier = Notifier::new(host.clone());
    let (watcher, observer) = selection_watcher();
    notifier.add_observer(observer.clone()).unwrap();

    // the host reuses the document object and forgets its observers
    let reloaded = host.new_document();
    assert!(reloaded.same_as(&host.documents()[0]));
    change_selection(&host);
    assert_eq!(watcher.count(), 1);
    assert_eq!(notifier.subject_ids(observer).unwrap().len(), 1);
}

#[test]
fn test_skip_recorded_loses_observer_on_single_document_host() {
    let host = SimHost::single_document();
    let notifier = Notifier::with_config(host.clone(), NotifierConfig::new().attach_policy(AttachPolicy::SkipRecorded));
    let (watcher, observer) = selection_watcher();
    notifier.add_observer(observer.clone()).unwrap();

    host.open_document("other.skp");
    change_selection(&host);
    assert_eq!(watcher.count(), 0);
    assert!(notifier.is_registered(observer));
}

#[test]
fn test_skip_recorded_still_follows_new_documents() {
    let host = SimHost::new();
    let notifier = Notifier::with_config(host.clone(), NotifierConfig::new().attach_policy(AttachPolicy::SkipRecorded));
    let (watcher, observer) = selection_watcher();
    notifier.add_observer(observer).unwrap();

    host.open_document("other.skp");
    change_selection(&host);
    assert_eq!(watcher.count(), 1);
}

#[test]
fn test_lenient_removal() {
    let host = SimHost::new();
    let notifier = Notifier::with_config(host.clone(), NotifierConfig::new().removal_policy(RemovalPolicy::Lenient));
    let (_watcher, observer) = selection_watcher();

    assert_eq!(notifier.remove_observer(observer.clone()), Ok(()));
    notifier.add_observer(observer.clone()).unwrap();
    assert_eq!(notifier.remove_observer(observer.clone()), Ok(()));
    assert_eq!(notifier.remove_observer(observer), Ok(()));
    assert!(notifier.is_empty());
}

#[test]
fn test_no_purge_keeps_dead_subjects() {
    let host = SimHost::new();
    let first = host.active().unwrap();
    let notifier = Notifier::with_config(host.clone(), NotifierConfig::new().purge_on_lifecycle(false));
    let (_watcher, observer) = selection_watcher();
    notifier.add_observer(observer.clone()).unwrap();

    let second = host.open_document("second.skp");
    host.close_document(&first);
    host.activate(&second);
    assert_eq!(notifier.subject_ids(observer.clone()).unwrap().len(), 2);

    // the dead subject is still skipped on removal
    notifier.remove_observer(observer).unwrap();
    assert_eq!(first.detach_calls(), 0);
}

#[test]
fn test_reset_detaches_all() {
    let host = SimHost::new();
    let notifier = Notifier::new(host.clone());
    let (first_watcher, first) = selection_watcher();
    let (second_watcher, second) = selection_watcher();
    notifier.add_observer(first.clone()).unwrap();
    notifier.add_observer(second).unwrap();
    host.open_document("b.skp");
    assert_eq!(notifier.len(), 2);

    notifier.reset();
    assert!(notifier.is_empty());
    for document in host.documents() {
        assert_eq!(document.attachment_count(), 0);
    }
    change_selection(&host);
    assert_eq!(first_watcher.count() + second_watcher.count(), 0);

    // a reset notifier is usable again
    notifier.add_observer(first).unwrap();
    change_selection(&host);
    assert_eq!(first_watcher.count(), 1);
}

#[test]
fn test_add_without_active_document() {
    let host = SimHost::new();
    host.close_document(&host.active().unwrap());
    let notifier = Notifier::new(host.clone());
    let (watcher, observer) = selection_watcher();

    notifier.add_observer(observer.clone()).unwrap();
    assert_eq!(notifier.subject_ids(observer), Some(vec![]));

    // attached once a document shows up
    host.new_document();
    change_selection(&host);
    assert_eq!(watcher.count(), 1);
}

#[test]
fn test_closing_active_document_moves_observer() {
    let host = SimHost::new();
    let notifier = Notifier::new(host.clone());
    let (watcher, observer) = selection_watcher();
    notifier.add_observer(observer.clone()).unwrap();
    let first = host.active().unwrap();
    let second = host.open_document("second.skp");

    // closing the active document activates the previous one, which purges the closed one
    host.close_document(&second);
    assert_eq!(notifier.subject_ids(observer), Some(vec![first.selection().subject_id()]));
    change_selection(&host);
    assert_eq!(watcher.count(), 1);
}

#[test]
fn test_independent_notifiers() {
    let host = SimHost::new();
    let a = Notifier::new(host.clone());
    let b = Notifier::new(host.clone());
    let (watcher, observer) = selection_watcher();

    a.add_observer(observer.clone()).unwrap();
    b.add_observer(observer.clone()).unwrap();
    host.open_document("shared.skp");

    // the host de-duplicates attachment of the same observer
    change_selection(&host);
    assert_eq!(watcher.count(), 1);

    a.remove_observer(observer.clone()).unwrap();
    assert!(b.is_registered(observer.clone()));
    assert!(!a.is_registered(observer));
}
