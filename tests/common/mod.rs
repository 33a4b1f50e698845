#![allow(dead_code)]

pub mod strategies;

use implementors_registry::{HostContext, Registry};
use parking_lot::Mutex;
use std::sync::Arc;

/// Registry used by the handoff examples
pub fn example_registry() -> Registry {
    Registry::from_static(&[
        ("alpha", &["impl X for Y"]),
        ("beta", &["impl A for B", "impl A for C"]),
    ])
    .expect("example registry is well formed")
}

/// Implementors of `Drop` across a few crates of a larger workspace
pub fn drop_implementors() -> Registry {
    Registry::from_static(&[
        (
            "ethcore_dapps",
            &["impl&lt;H: ContentValidator&gt; Drop for ContentFetcherHandler&lt;H&gt;"],
        ),
        (
            "ethcore_db",
            &["impl Drop for Database", "impl Drop for DatabaseIterator"],
        ),
    ])
    .expect("drop implementors table is well formed")
}

/// Context whose hook records every registry it receives
pub fn recording_context() -> (HostContext, Arc<Mutex<Vec<Arc<Registry>>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let context = HostContext::with_hook(move |registry| sink.lock().push(registry));
    (context, received)
}
