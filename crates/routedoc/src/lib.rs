//! Routedoc umbrella crate.
//!
//! Re-exports the router-agnostic core and, behind feature flags, the router
//! adapters.
//!
//! - `axum` (default): [`axum`] adapter

pub use routedoc_core as core;

pub use routedoc_core::{
    ApiRegistry, DocsConfig, Document, Error, HttpMethod, PartialOperation, Result, RouteAction,
    RouteDescriptor, TypeDescriptor,
};

#[cfg(feature = "axum")]
pub use routedoc_axum as axum;
