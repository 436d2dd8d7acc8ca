use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use crate::shared::infrastructure::resolver::{Resolver, ResolverError};

/// A feature module: a set of routes living under one path prefix.
#[async_trait]
pub trait Module: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// `/` merges the routes at the root of the API, anything else nests them.
    fn prefix(&self) -> &str;

    fn routes(&self) -> Router;

    /// Runs once every module is mounted.
    async fn on_ready(&self) -> Result<(), ResolverError> {
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct ModuleResolver {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, module: impl Module) -> Result<Self, ResolverError> {
        let prefix = module.prefix();
        let well_formed = prefix == "/" || (prefix.starts_with('/') && !prefix.ends_with('/'));
        if !well_formed {
            return Err(ResolverError::InvalidPrefix {
                module: module.name().to_string(),
                prefix: prefix.to_string(),
            });
        }

        if let Some(existing) = self.modules.iter().find(|m| m.prefix() == prefix) {
            return Err(ResolverError::DuplicatePrefix {
                prefix: prefix.to_string(),
                first: existing.name().to_string(),
                second: module.name().to_string(),
            });
        }

        self.modules.push(Arc::new(module));
        Ok(self)
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }
}

#[async_trait]
impl Resolver for ModuleResolver {
    fn resolve(&self) -> Router {
        self.modules.iter().fold(Router::new(), |router, module| {
            tracing::info!(
                module = module.name(),
                prefix = module.prefix(),
                "resolving module"
            );
            match module.prefix() {
                "/" => router.merge(module.routes()),
                prefix => router.nest(prefix, module.routes()),
            }
        })
    }

    async fn resolve_async(&self) -> Result<(), ResolverError> {
        for module in &self.modules {
            module.on_ready().await?;
            tracing::debug!(module = module.name(), "module ready");
        }
        tracing::info!(modules = ?self.module_names(), "all modules ready");
        Ok(())
    }
}
