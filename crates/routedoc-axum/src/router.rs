//! Documented axum routers and route groups.
//!
//! [`ApiRouter`] collects handlers per `(path, method)` while documenting
//! each one in a shared [`ApiRegistry`]; [`ApiRouter::into_router`] then
//! builds the live [`axum::Router`]. Handlers are held back until then so
//! that re-registering a `(path, method)` replaces the earlier handler
//! instead of tripping axum's overlapping-route check.

use std::collections::BTreeMap;

use axum::Router;
use axum::handler::Handler;
use axum::routing::{MethodFilter, MethodRouter, on};
use routedoc_core::{
    ApiRegistry, HttpMethod, PartialOperation, Result, RouteAction, RouteBinder, RouteDescriptor,
    add_route, join_paths,
};
use schemars::JsonSchema;
use serde_json::Value;

use crate::path::to_axum_path;

type MethodTable<S> = BTreeMap<HttpMethod, MethodRouter<S>>;

/// axum method filter for `method`.
pub fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Post => MethodFilter::POST,
        HttpMethod::Put => MethodFilter::PUT,
        HttpMethod::Patch => MethodFilter::PATCH,
        HttpMethod::Delete => MethodFilter::DELETE,
        HttpMethod::Options => MethodFilter::OPTIONS,
        HttpMethod::Head => MethodFilter::HEAD,
    }
}

/// Wrap `handler` as an endpoint answering only `method`.
pub fn endpoint<H, T, S>(method: HttpMethod, handler: H) -> MethodRouter<S>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    on(method_filter(method), handler)
}

/// Untyped routes document both bodies as free-form JSON.
fn untyped<E>(route: RouteDescriptor<E>) -> RouteDescriptor<E> {
    route.typed::<Value, Value>()
}

// Per-method shorthands, shared by `ApiRouter` and `RouteGroup`. Both expose
// a `route` method taking a `RouteDescriptor<MethodRouter<S>>`.
macro_rules! method_shorthands {
    ($($method:ident, $typed:ident => $variant:ident;)*) => {
        $(
            #[doc = concat!("Register a documented `", stringify!($variant), "` handler.")]
            pub fn $method<H, T>(&mut self, path: &str, handler: H) -> RouteAction
            where
                H: Handler<T, S>,
                T: 'static,
            {
                let method = HttpMethod::$variant;
                self.route(untyped(RouteDescriptor::new(method, path, endpoint(method, handler))))
            }

            #[doc = concat!(
                "Register a `", stringify!($variant),
                "` handler with request and response bodies documented from `Req` and `Res`."
            )]
            pub fn $typed<Req, Res, T>(&mut self, path: &str, handler: impl Handler<T, S>) -> RouteAction
            where
                Req: JsonSchema + 'static,
                Res: JsonSchema + 'static,
                T: 'static,
            {
                let method = HttpMethod::$variant;
                self.route(
                    RouteDescriptor::new(method, path, endpoint(method, handler)).typed::<Req, Res>(),
                )
            }
        )*

        /// Register a handler for a method given as a string.
        ///
        /// Methods outside GET, POST, PUT, PATCH, DELETE, OPTIONS and HEAD
        /// return [`routedoc_core::Error::UnsupportedMethod`]; nothing is
        /// routed or documented.
        pub fn add_route_str<H, T>(
            &mut self,
            method: &str,
            path: &str,
            handler: H,
        ) -> Result<RouteAction>
        where
            H: Handler<T, S>,
            T: 'static,
        {
            let route = RouteDescriptor::parse(method, path, ())?;
            let endpoint = endpoint(route.method, handler);
            Ok(self.route(untyped(RouteDescriptor::new(route.method, route.path, endpoint))))
        }

        /// Register a handler with overrides applied to its documentation.
        pub fn route_with<H, T>(
            &mut self,
            method: HttpMethod,
            path: &str,
            handler: H,
            overrides: impl IntoIterator<Item = PartialOperation>,
        ) -> RouteAction
        where
            H: Handler<T, S>,
            T: 'static,
        {
            self.route(
                untyped(RouteDescriptor::new(method, path, endpoint(method, handler)))
                    .with_options(overrides),
            )
        }

        /// A nested group whose paths are prefixed with `prefix`.
        pub fn group(&mut self, prefix: &str) -> RouteGroup<'_, S> {
            let registry = self.registry().clone();
            let base = join_paths(self.base(), prefix);
            RouteGroup {
                table: self.table(),
                registry,
                base,
            }
        }
    };
}

macro_rules! all_method_shorthands {
    () => {
        method_shorthands! {
            get, get_typed => Get;
            post, post_typed => Post;
            put, put_typed => Put;
            patch, patch_typed => Patch;
            delete, delete_typed => Delete;
            options, options_typed => Options;
            head, head_typed => Head;
        }
    };
}

// ============================================================================
// ApiRouter
// ============================================================================

/// A documented axum router under construction.
///
/// ```rust
/// use routedoc_axum::ApiRouter;
/// use routedoc_core::{ApiRegistry, HttpMethod};
///
/// let registry = ApiRegistry::new();
/// let mut api = ApiRouter::<()>::new(registry.clone());
/// api.get("/health", || async { "ok" });
/// api.group("/v1").post("/users", || async { "created" });
/// let _router: axum::Router = api.into_router();
///
/// let doc = registry.snapshot();
/// assert!(doc.operation("/health", HttpMethod::Get).is_some());
/// assert!(doc.operation("/v1/users", HttpMethod::Post).is_some());
/// ```
pub struct ApiRouter<S = ()> {
    registry: ApiRegistry,
    routes: BTreeMap<String, MethodTable<S>>,
}

impl<S> ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// An empty router documenting into `registry`.
    pub fn new(registry: ApiRegistry) -> Self {
        Self {
            registry,
            routes: BTreeMap::new(),
        }
    }

    /// The registry routes are documented in.
    pub fn registry(&self) -> &ApiRegistry {
        &self.registry
    }

    /// Register a fully described route.
    pub fn route(&mut self, route: RouteDescriptor<MethodRouter<S>>) -> RouteAction {
        self.group("").route(route)
    }

    all_method_shorthands!();

    /// Number of `(path, method)` handlers collected so far.
    pub fn len(&self) -> usize {
        self.routes.values().map(BTreeMap::len).sum()
    }

    /// `true` when no handler has been registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Build the live router.
    ///
    /// # Panics
    ///
    /// Panics (inside axum) if two templates differing only in parameter
    /// names were registered, e.g. `/users/:id` and `/users/:name`.
    pub fn into_router(self) -> Router<S> {
        self.routes
            .into_iter()
            .fold(Router::new(), |router, (path, methods)| {
                match methods.into_values().reduce(MethodRouter::merge) {
                    Some(method_router) => router.route(&to_axum_path(&path), method_router),
                    None => router,
                }
            })
    }

    fn base(&self) -> &str {
        ""
    }

    fn table(&mut self) -> &mut BTreeMap<String, MethodTable<S>> {
        &mut self.routes
    }
}

impl<S> std::fmt::Debug for ApiRouter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRouter")
            .field("registry", &self.registry)
            .field("paths", &self.routes.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// RouteGroup
// ============================================================================

/// Routes sharing a base path, borrowed from an [`ApiRouter`].
pub struct RouteGroup<'a, S> {
    table: &'a mut BTreeMap<String, MethodTable<S>>,
    registry: ApiRegistry,
    base: String,
}

impl<S> RouteGroup<'_, S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Register a fully described route under this group.
    pub fn route(&mut self, route: RouteDescriptor<MethodRouter<S>>) -> RouteAction {
        let registry = self.registry.clone();
        add_route(&registry, self, route)
    }

    all_method_shorthands!();

    fn base(&self) -> &str {
        &self.base
    }

    fn registry(&self) -> &ApiRegistry {
        &self.registry
    }

    fn table(&mut self) -> &mut BTreeMap<String, MethodTable<S>> {
        &mut *self.table
    }
}

impl<S> RouteBinder for RouteGroup<'_, S>
where
    S: Clone + Send + Sync + 'static,
{
    type Endpoint = MethodRouter<S>;

    fn base_path(&self) -> &str {
        &self.base
    }

    fn bind(&mut self, method: HttpMethod, path: &str, endpoint: Self::Endpoint) {
        let full_path = join_paths(&self.base, path);
        if self
            .table
            .entry(full_path.clone())
            .or_default()
            .insert(method, endpoint)
            .is_some()
        {
            log::debug!("Replaced handler for {method} {full_path}");
        }
    }
}

impl<S> std::fmt::Debug for RouteGroup<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteGroup")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}
