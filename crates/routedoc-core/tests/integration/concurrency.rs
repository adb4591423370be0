//! Concurrent registration against one shared registry.

use std::thread;

use routedoc_core::{ApiRegistry, HttpMethod, RouteDescriptor, TypeDescriptor, add_route};

use crate::common::{RecordingRouter, User};

const WORKERS: usize = 16;

#[test]
fn test_concurrent_registrations_on_disjoint_paths() {
    let registry = ApiRegistry::new();

    thread::scope(|scope| {
        for worker in 0..WORKERS {
            let registry = registry.clone();
            scope.spawn(move || {
                let mut router = RecordingRouter::default();
                add_route(
                    &registry,
                    &mut router,
                    RouteDescriptor::new(HttpMethod::Get, format!("/items/{worker}"), "h")
                        .with_response(TypeDescriptor::of::<User>()),
                );
                assert_eq!(router.bound.len(), 1);
            });
        }
    });

    let doc = registry.snapshot();
    assert_eq!(doc.paths.len(), WORKERS);
    assert_eq!(doc.operation_count(), WORKERS);
    assert!(doc.dangling_references().is_empty());
}

#[test]
fn test_concurrent_methods_on_one_path() {
    let registry = ApiRegistry::new();

    thread::scope(|scope| {
        for method in HttpMethod::ALL {
            let registry = registry.clone();
            scope.spawn(move || {
                let mut router = RecordingRouter::default();
                add_route(
                    &registry,
                    &mut router,
                    RouteDescriptor::new(method, "/shared", "h"),
                );
            });
        }
    });

    let doc = registry.snapshot();
    assert_eq!(doc.paths.len(), 1);
    assert_eq!(doc.paths["/shared"].len(), HttpMethod::ALL.len());
}
