//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};

use afrifilm_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// Explicit origins allow credentialed requests so that browser clients
/// can send the session cookie. A wildcard origin does not.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let wildcard = |list: &[String]| list.iter().any(|v| v == "*");
    let credentials = !wildcard(&config.allowed_origins);

    let mut layer = CorsLayer::new();

    if credentials {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true);
    } else {
        layer = layer.allow_origin(Any);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    // Credentialed CORS forbids a literal `*` header list.
    layer = match (wildcard(&config.allowed_headers), credentials) {
        (true, true) => layer.allow_headers(AllowHeaders::mirror_request()),
        (true, false) => layer.allow_headers(Any),
        (false, _) => {
            let headers: Vec<HeaderName> = config
                .allowed_headers
                .iter()
                .filter_map(|h| h.parse().ok())
                .collect();
            layer.allow_headers(headers)
        }
    };

    layer.max_age(Duration::from_secs(config.max_age_seconds))
}
