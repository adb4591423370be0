//! axum adapter for Routedoc.
//!
//! [`ApiRouter`] and [`RouteGroup`] register handlers with axum and document
//! them in a shared [`routedoc_core::ApiRegistry`]; [`docs_routes`] serves the
//! resulting document and a Swagger UI page.
//!
//! ```rust
//! use axum::Json;
//! use routedoc_axum::{ApiRouter, docs_routes};
//! use routedoc_core::ApiRegistry;
//! use schemars::JsonSchema;
//! use serde_json::json;
//!
//! #[derive(JsonSchema)]
//! struct Pet {
//!     name: String,
//! }
//!
//! let registry = ApiRegistry::new();
//! let mut api = ApiRouter::new(registry.clone());
//! api.get_typed::<(), Pet, _>("/pets/:id", || async { Json(json!({ "name": "Rex" })) });
//!
//! let app: axum::Router = api.into_router().merge(docs_routes("/docs", registry));
//! # let _ = app;
//! ```
//!
//! # Modules
//!
//! - [`router`]: Documented routers and groups
//! - [`docs`]: Document and UI endpoints
//! - [`path`]: Path template translation

pub mod docs;
pub mod path;
pub mod router;

pub use docs::{DEFAULT_DOCS_MOUNT, docs_routes};
pub use path::to_axum_path;
pub use router::{ApiRouter, RouteGroup, endpoint, method_filter};
