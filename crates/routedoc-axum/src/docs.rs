//! Serving the document and a browsable UI.
//!
//! For a mount of `/docs`:
//!
//! - `GET /docs` redirects (301) to `/docs/index.html`
//! - `GET /docs.json` returns the current document
//! - `GET /docs/` and `GET /docs/index.html` serve the Swagger UI page
//!
//! A mount given with a trailing slash (`/docs/`) is served the same way,
//! minus the redirect.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use routedoc_core::ApiRegistry;

/// Mount used when the requested one is the site root.
pub const DEFAULT_DOCS_MOUNT: &str = "/docs";

/// Page served for the UI.
const INDEX_PAGE: &str = "index.html";

/// Create a router serving `registry` under `mount`.
///
/// The document is snapshotted per request, so routes registered after
/// mounting still show up.
pub fn docs_routes<S>(mount: &str, registry: ApiRegistry) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let redirect = !mount.ends_with('/');
    let mut base = mount.trim_end_matches('/').to_string();
    if base.is_empty() {
        log::warn!("Docs cannot be mounted at the site root; using {DEFAULT_DOCS_MOUNT}");
        base = DEFAULT_DOCS_MOUNT.to_string();
    } else if !base.starts_with('/') {
        base.insert(0, '/');
    }

    let spec_url = format!("{base}.json");
    let title = registry.read(|doc| doc.info.title.clone());
    let page: Arc<str> = swagger_ui_page(&title, &spec_url).into();
    let index_page = page.clone();

    let mut router = Router::new()
        .route(
            &spec_url,
            get(move || {
                let registry = registry.clone();
                async move { Json(registry.snapshot()) }
            }),
        )
        .route(
            &format!("{base}/"),
            get(move || {
                let page = index_page.clone();
                async move { Html(page.to_string()) }
            }),
        )
        .route(
            &format!("{base}/{{*subpath}}"),
            get(move |Path(subpath): Path<String>| {
                let page = page.clone();
                async move { ui_asset(&subpath, &page) }
            }),
        );

    if redirect {
        let location = format!("{base}/{INDEX_PAGE}");
        router = router.route(&base, get(move || async move { moved_permanently(&location) }));
    }

    log::info!("Serving API docs at {base}/ ({spec_url})");
    router
}

fn ui_asset(subpath: &str, page: &str) -> Response {
    match subpath.trim_start_matches('/') {
        "" | INDEX_PAGE => Html(page.to_string()).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn moved_permanently(location: &str) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

/// The Swagger UI shell, loading its assets from a CDN.
fn swagger_ui_page(title: &str, spec_url: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{spec_url}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##,
        title = html_escape(title),
    )
}

fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
