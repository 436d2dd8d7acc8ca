use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::shared::infrastructure::bundle::errors::BundleError;

pub const ANY_ORIGIN: &str = "*";

/// Cross-origin policy for the configured origins. `*` or an empty list allows any origin.
/// Preflight requests are answered with 200.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, BundleError> {
    let allow_origin = if origins.is_empty() || origins.iter().any(|origin| origin == ANY_ORIGIN) {
        AllowOrigin::any()
    } else {
        let origins = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| BundleError::InvalidCorsOrigin(origin.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request()))
}
