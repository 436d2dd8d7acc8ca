use thiserror::Error;

use crate::shared::infrastructure::resolver::ResolverError;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),

    #[error("no resolver applied to the bundle")]
    MissingResolver,

    #[error(transparent)]
    Resolver(#[from] ResolverError),
}
