//! Router seam: binding handler chains and picking document slots.

use crate::method::{HttpMethod, SlotRef};

/// A live router that handler chains can be bound to.
///
/// Implemented by router adapters (see the `routedoc-axum` crate). Requiring
/// this trait at registration time is what rules out unknown router shapes:
/// they fail to compile instead of half-registering a route.
pub trait RouteBinder {
    /// The router's own representation of a handler chain.
    type Endpoint;

    /// Prefix prepended to every path bound through this router.
    fn base_path(&self) -> &str;

    /// Make `endpoint` reachable at `(method, base_path + path)`.
    ///
    /// Binding the same `(method, path)` again replaces the earlier endpoint.
    fn bind(&mut self, method: HttpMethod, path: &str, endpoint: Self::Endpoint);
}

/// Bind `endpoint` with the router and return the slot its documentation
/// belongs in.
pub fn dispatch<B>(binder: &mut B, method: HttpMethod, path: &str, endpoint: B::Endpoint) -> SlotRef
where
    B: RouteBinder + ?Sized,
{
    binder.bind(method, path, endpoint);
    method.slot()
}
