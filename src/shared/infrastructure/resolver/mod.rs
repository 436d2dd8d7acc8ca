// A resolver produces the API routes mounted under the base path, and finishes any
// asynchronous setup those routes need once everything is mounted.

pub mod module_resolver;

use async_trait::async_trait;
use axum::Router;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("duplicate module prefix {prefix}: {first} and {second}")]
    DuplicatePrefix {
        prefix: String,
        first: String,
        second: String,
    },

    #[error("invalid module prefix {prefix} for {module}: must start with '/'")]
    InvalidPrefix { module: String, prefix: String },

    #[error("module {module} failed to start: {reason}")]
    Startup { module: String, reason: String },
}

#[async_trait]
pub trait Resolver: Send + Sync {
    fn resolve(&self) -> Router;

    async fn resolve_async(&self) -> Result<(), ResolverError> {
        Ok(())
    }
}
