// Composition of the HTTP application.
//
// Lifecycle
// - `new` runs `init`: cross-origin policy, body parsing and method override.
// - `apply_*` calls collect the resolver, global filters and the documentation instance.
// - `run` mounts everything and waits for the resolver to finish its asynchronous setup.
//
// Dispatch order of the resulting router, outermost first:
// trace > CORS > body parser > method override > global filters (in insertion order)
// > routes under `/api` > docs under `/docs` > invalid URL catch-all (unknown path or method).

pub mod errors;

use std::sync::Arc;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
};
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::shared::config::{AppConfig, DEFAULT_BODY_LIMIT};
use crate::shared::infrastructure::bundle::errors::BundleError;
use crate::shared::infrastructure::docs::{SwaggerBuilder, swagger_ui};
use crate::shared::infrastructure::filter::{self, Filter, invalid_url};
use crate::shared::infrastructure::http::body_parser::{BodyParser, parse_body};
use crate::shared::infrastructure::http::cors::cors_layer;
use crate::shared::infrastructure::http::method_override::method_override;
use crate::shared::infrastructure::resolver::Resolver;

pub const BASE_PATH: &str = "/api";
pub const BASE_PATH_SWAGGER: &str = "/docs";

pub struct AppBundle {
    cors: CorsLayer,
    body_parser: BodyParser,
    resolver: Option<Arc<dyn Resolver>>,
    filters: Vec<Arc<dyn Filter>>,
    swagger_instance: Option<Value>,
}

impl AppBundle {
    pub fn new(config: &AppConfig) -> Result<Self, BundleError> {
        tracing::info!("App is starting bundling");

        Self {
            cors: CorsLayer::new(),
            body_parser: BodyParser {
                limit: DEFAULT_BODY_LIMIT,
            },
            resolver: None,
            filters: Vec::new(),
            swagger_instance: None,
        }
        .init(config)
    }

    fn init(mut self, config: &AppConfig) -> Result<Self, BundleError> {
        tracing::info!("Application is in mode [{}]", config.node_env);

        self.cors = cors_layer(&config.cors_allow)?;
        self.body_parser = BodyParser {
            limit: config.body_limit,
        };

        tracing::info!("Building initial config");
        Ok(self)
    }

    /// Replaces any resolver applied before.
    pub fn apply_resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        if self.resolver.is_some() {
            tracing::debug!("replacing previously applied resolver");
        }
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn apply_global_filters<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Filter>>,
    {
        self.filters.extend(filters);
        self
    }

    pub fn apply_swagger(mut self, swagger_builder: &impl SwaggerBuilder) -> Self {
        self.swagger_instance = Some(swagger_builder.instance());
        self
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    pub async fn run(self) -> Result<Router, BundleError> {
        tracing::info!("Building asynchronous config");
        tracing::info!(count = self.filter_count(), "Mounting global filters");

        let resolver = self.resolver.ok_or(BundleError::MissingResolver)?;

        let mut app = Router::new().nest(BASE_PATH, resolver.resolve());

        match self.swagger_instance {
            Some(document) => {
                app = app.merge(swagger_ui::router(BASE_PATH_SWAGGER, document));
                tracing::info!("Building swagger");
                tracing::info!("Swagger hosted at {BASE_PATH_SWAGGER}");
            }
            None => tracing::warn!("No swagger instance applied, {BASE_PATH_SWAGGER} stays unmounted"),
        }

        // Covers unknown paths and known paths hit with a method they do not serve.
        let app = app
            .fallback(invalid_url::fallback)
            .method_not_allowed_fallback(invalid_url::fallback);

        // Applied last means outermost, so the first filter in the list sees requests first.
        let app = self
            .filters
            .into_iter()
            .rev()
            .fold(app, |app, global_filter| filter::mount(app, global_filter));

        // Outer router with only a fallback: its layers run before the inner router matches,
        // which lets the method override take part in routing.
        let app = Router::new()
            .fallback_service(app)
            .layer(from_fn(method_override))
            .layer(from_fn_with_state(self.body_parser, parse_body))
            .layer(self.cors)
            .layer(TraceLayer::new_for_http());

        resolver.resolve_async().await?;

        tracing::info!("App bundling finished");
        Ok(app)
    }
}
