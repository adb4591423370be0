//! Committing operations into the document's path table.

use crate::document::Document;
use crate::method::{HttpMethod, SlotRef};
use crate::operation::Operation;

/// Store `operation` under `(full_path, method)`, leaving every other method
/// on that path untouched.
pub fn commit(document: &mut Document, full_path: &str, method: HttpMethod, operation: Operation) {
    commit_slot(document, full_path, method.slot(), operation);
}

/// [`commit`] for a slot already chosen by the dispatcher.
pub fn commit_slot(document: &mut Document, full_path: &str, slot: SlotRef, operation: Operation) {
    let item = document.paths.entry(full_path.to_string()).or_default();
    *slot(item) = Some(operation);
}

/// Join a router base prefix and a route's relative path template.
///
/// Both sides keep their parameter syntax; only the separating slash is
/// normalised.
///
/// ```rust
/// use routedoc_core::join_paths;
///
/// assert_eq!(join_paths("/api", "/users/:id"), "/api/users/:id");
/// assert_eq!(join_paths("/api/", "/users"), "/api/users");
/// assert_eq!(join_paths("/", "/users"), "/users");
/// assert_eq!(join_paths("", "users"), "/users");
/// assert_eq!(join_paths("/api", ""), "/api");
/// ```
pub fn join_paths(base: &str, relative: &str) -> String {
    let base = base.trim_end_matches('/');
    let relative = relative.trim_start_matches('/');
    match (base.is_empty(), relative.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{relative}"),
        (false, true) => base.to_string(),
        (false, false) => format!("{base}/{relative}"),
    }
}
