//! The shared, lock-guarded document.
//!
//! One [`ApiRegistry`] is created by the host and cloned into every router
//! or group that registers routes. Path table and schema registry sit behind
//! a single mutex, so one route registration (read, resolve, merge, write)
//! is atomic with respect to every other.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::DocsConfig;
use crate::document::Document;

/// Thread-safe handle to the process-wide API document.
///
/// Cheap to clone (Arc internals); all clones share one document.
#[derive(Clone, Default)]
pub struct ApiRegistry {
    inner: Arc<Mutex<Document>>,
}

impl ApiRegistry {
    /// A registry around the default document.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry around an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            inner: Arc::new(Mutex::new(document)),
        }
    }

    /// A registry whose metadata comes from `config`.
    pub fn from_config(config: &DocsConfig) -> Self {
        Self::with_document(config.to_document())
    }

    /// Run `f` with exclusive access to the document.
    pub fn update<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.lock())
    }

    /// Run `f` with read access to the document.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.lock())
    }

    /// A point-in-time copy of the document, for rendering.
    pub fn snapshot(&self) -> Document {
        self.lock().clone()
    }

    // Registration never leaves the document half-written, so a panic in
    // another holder does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, Document> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ApiRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read(|doc| {
            f.debug_struct("ApiRegistry")
                .field("title", &doc.info.title)
                .field("paths", &doc.paths.len())
                .field("schemas", &doc.components.len())
                .finish()
        })
    }
}
