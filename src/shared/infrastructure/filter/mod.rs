// Filters are request middleware with the classic (request, continuation) shape: they can
// inspect or rewrite the request, call `next` to continue, decorate the response, or answer
// on their own without calling `next` at all.

pub mod invalid_url;
pub mod request_id;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    extract::Request,
    middleware::{Next, from_fn},
    response::Response,
    routing::MethodRouter,
};

#[async_trait]
pub trait Filter: Send + Sync + 'static {
    async fn filter(&self, request: Request, next: Next) -> Response;
}

/// Wraps every route (and the fallback) of `router` in `filter`.
pub fn mount<S>(router: Router<S>, filter: Arc<dyn Filter>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(from_fn(move |request: Request, next: Next| {
        let filter = filter.clone();
        async move { filter.filter(request, next).await }
    }))
}

/// Wraps a single route in `filter`. Requests that do not match the route never reach it.
pub fn guard<S>(route: MethodRouter<S>, filter: Arc<dyn Filter>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn(move |request: Request, next: Next| {
        let filter = filter.clone();
        async move { filter.filter(request, next).await }
    }))
}
