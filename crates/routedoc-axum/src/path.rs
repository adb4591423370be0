//! Path template translation.
//!
//! Documented paths use colon parameters (`/users/:id`) and star catch-alls
//! (`/files/*path`). axum 0.8 spells those `{id}` and `{*path}`.

/// Catch-all name used for a bare `*` segment.
const UNNAMED_WILDCARD: &str = "rest";

/// Translate a documented path template into axum route syntax.
///
/// ```rust
/// use routedoc_axum::to_axum_path;
///
/// assert_eq!(to_axum_path("/users/:id"), "/users/{id}");
/// assert_eq!(to_axum_path("/files/*path"), "/files/{*path}");
/// assert_eq!(to_axum_path("/health"), "/health");
/// ```
pub fn to_axum_path(template: &str) -> String {
    template
        .split('/')
        .map(|segment| {
            if let Some(name) = segment.strip_prefix(':').filter(|n| !n.is_empty()) {
                format!("{{{name}}}")
            } else if let Some(name) = segment.strip_prefix('*') {
                let name = if name.is_empty() { UNNAMED_WILDCARD } else { name };
                format!("{{*{name}}}")
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
