use http::{HeaderValue, Method, header::CONTENT_TYPE};
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tracing::info;

/// Build the CORS layer from the configured origins
///
/// - `"*"`: any origin, any method and header, no credentials
/// - comma-separated list: only those origins; methods and headers are
///   mirrored from the preflight and credentials are allowed
/// - `None` or empty: same-origin only
///
/// Credentials cannot be combined with wildcard allow lists.
pub fn cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    match allowed_origins.map(str::trim) {
        Some("*") => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_credentials(false),
        Some(origins) if !origins.is_empty() => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
        _ => {
            info!(
                "CORS not configured, defaulting to same-origin only. \
                 Set CORS_ALLOWED_ORIGINS to enable cross-origin access."
            );
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(false)
        }
    }
}
