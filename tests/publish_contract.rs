//! Publish/consume handoff tests
//!
//! Covers both branches of the publish operation and the consumer side that
//! drains the pending slot.

mod common;

use common::{drop_implementors, example_registry, recording_context};
use implementors_registry::{
    publish, HostContext, Publication, PublishError, PublisherConfig, Registry,
    RegistrationHook, RegistryPublisher, SlotAccess,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn descriptor_strings(registry: &Registry, group: &str) -> Vec<String> {
    registry
        .get(group)
        .unwrap_or_default()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn publish_without_hook_stores_exact_registry() {
    let context = HostContext::new();

    let outcome = publish(&context, example_registry()).unwrap();

    assert_eq!(
        outcome,
        Publication::Deferred {
            displaced_previous: false
        }
    );
    let pending = context.pending().expect("registry should be pending");
    assert_eq!(*pending, example_registry());
    assert_eq!(
        descriptor_strings(&pending, "beta"),
        vec!["impl A for B", "impl A for C"]
    );
    assert_eq!(descriptor_strings(&pending, "alpha"), vec!["impl X for Y"]);
}

#[test]
fn publish_with_hook_calls_it_once_and_leaves_slot_alone() {
    let (context, received) = recording_context();

    let outcome = publish(&context, example_registry()).unwrap();

    assert_eq!(outcome, Publication::Delivered);
    let received = received.lock();
    assert_eq!(received.len(), 1);
    assert_eq!(*received[0], example_registry());
    assert!(!context.has_pending());
}

#[test]
fn publish_with_hook_leaves_existing_pending_untouched() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let hook: RegistrationHook = Arc::new(move |_: Arc<Registry>| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    let context =
        HostContext::from_parts(Some(hook), Some(drop_implementors()), SlotAccess::ReadWrite);

    assert_eq!(
        publish(&context, example_registry()).unwrap(),
        Publication::Delivered
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(*context.pending().unwrap(), drop_implementors());
}

#[test]
fn later_publish_overwrites_pending_slot() {
    let context = HostContext::new();
    let publisher = RegistryPublisher::default();

    publisher.publish(&context, drop_implementors()).unwrap();
    let outcome = publisher.publish(&context, example_registry()).unwrap();

    assert_eq!(
        outcome,
        Publication::Deferred {
            displaced_previous: true
        }
    );
    assert_eq!(*context.pending().unwrap(), example_registry());
    assert_eq!(publisher.stats().displaced, 1);
}

#[test]
fn installing_hook_delivers_pending_exactly_once() {
    let context = HostContext::new();
    publish(&context, example_registry()).unwrap();

    let received = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    assert!(context.install_hook(move |registry| sink.lock().push(registry)));

    assert!(context.take_pending().is_none());
    assert_eq!(received.lock().len(), 1);
    assert_eq!(*received.lock()[0], example_registry());

    // Later publications go straight to the hook
    publish(&context, drop_implementors()).unwrap();
    assert_eq!(received.lock().len(), 2);
    assert!(!context.has_pending());
}

#[test]
fn removing_hook_defers_again() {
    let (context, received) = recording_context();
    assert!(context.remove_hook());

    let outcome = publish(&context, example_registry()).unwrap();

    assert!(matches!(outcome, Publication::Deferred { .. }));
    assert!(received.lock().is_empty());
    assert!(context.has_pending());
}

#[test]
fn read_only_slot_without_hook_is_reported() {
    let publisher = RegistryPublisher::new(PublisherConfig {
        pending_slot: SlotAccess::ReadOnly,
        ..PublisherConfig::default()
    });
    let context = publisher.context();
    assert_eq!(context.access(), SlotAccess::ReadOnly);

    let result = publisher.publish(&context, example_registry());

    assert_eq!(result, Err(PublishError::PendingSlotReadOnly));
    assert!(context.pending().is_none());
}

#[test]
fn read_only_publisher_config_applies_to_any_context() {
    let config = PublisherConfig::load_with_env(
        None,
        Some(HashMap::from([(
            "IMPLEMENTORS__PENDING_SLOT".to_string(),
            "read_only".to_string(),
        )])),
    )
    .unwrap();
    let publisher = RegistryPublisher::new(config);
    let context = HostContext::new();

    let result = publisher.publish(&context, example_registry());

    assert_eq!(result, Err(PublishError::PendingSlotReadOnly));
    assert!(!context.has_pending());

    // A hook still receives the registry regardless of slot access
    let (context, received) = recording_context();
    assert_eq!(
        publisher.publish(&context, example_registry()),
        Ok(Publication::Delivered)
    );
    assert_eq!(received.lock().len(), 1);
}

#[test]
fn empty_registry_is_a_legal_publication() {
    let (context, received) = recording_context();
    assert_eq!(
        publish(&context, Registry::default()).unwrap(),
        Publication::Delivered
    );
    assert!(received.lock()[0].is_empty());

    let context = HostContext::new();
    publish(&context, Registry::default()).unwrap();
    assert!(context.pending().unwrap().is_empty());
}

#[test]
#[should_panic(expected = "index widget crashed")]
fn hook_panic_reaches_the_caller() {
    let context = HostContext::with_hook(|_| panic!("index widget crashed"));
    let _ = publish(&context, example_registry());
}
