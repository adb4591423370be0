//! Routedoc Core: API documentation captured at route registration.
//!
//! Every route registered through [`add_route`] is bound with the live router
//! and, in the same step, recorded in a shared OpenAPI-style [`Document`]:
//! one operation per `(path, method)`, response (and request) bodies resolved
//! to reusable schemas where the payload type allows it, and caller overrides
//! merged over the generated defaults.
//!
//! This crate is router-agnostic; router adapters implement [`RouteBinder`].
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`document`]: Document, metadata, path items, response content
//! - [`operation`]: Operation records and override fragments
//! - [`method`]: HTTP methods and document slots
//! - [`dispatch`]: Router seam
//! - [`schema`]: Payload type descriptors and the registry seam
//! - [`components`]: Schemars-backed schema registry
//! - [`resolver`]: Payload type → content resolution
//! - [`merge`]: Override merge policy
//! - [`path_table`]: Path table updates
//! - [`registry`]: The shared, lock-guarded document
//! - [`config`]: Document metadata from TOML
//! - [`route`]: Route registration

pub mod components;
pub mod config;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod merge;
pub mod method;
pub mod operation;
pub mod path_table;
pub mod registry;
pub mod resolver;
pub mod route;
pub mod schema;

// Re-export key types at crate root for convenience
pub use error::{Error, Result, SchemaError};

pub use components::Components;
pub use config::DocsConfig;
pub use dispatch::{RouteBinder, dispatch};
pub use document::{
    Contact, Document, Info, License, PathItem, ResponseSpec, SchemaOrReference,
};
pub use merge::{fold_overrides, merge};
pub use method::{HttpMethod, SlotRef};
pub use operation::{Operation, PartialOperation};
pub use path_table::{commit, commit_slot, join_paths};
pub use registry::ApiRegistry;
pub use resolver::{resolve_content, resolve_schema};
pub use route::{RouteAction, RouteDescriptor, add_route};
pub use schema::{SchemaRegistry, TypeDescriptor, TypeKind, is_schema_eligible};
