// Composition root.
//
// Responsibilities
// - Register the feature modules with the module resolver.
// - Pick the global filters and assemble the API documentation.
// - Hand everything to the bundle. Serving is left to the binary.

use std::sync::Arc;

use crate::modules::auth::module::AuthModule;
use crate::modules::system::module::SystemModule;
use crate::shared::config::AppConfig;
use crate::shared::infrastructure::bundle::{AppBundle, BASE_PATH, errors::BundleError};
use crate::shared::infrastructure::docs::ApiDocs;
use crate::shared::infrastructure::filter::{Filter, request_id::RequestIdFilter};
use crate::shared::infrastructure::resolver::module_resolver::ModuleResolver;

pub fn api_docs() -> ApiDocs {
    AuthModule::operations()
        .into_iter()
        .chain(SystemModule::operations())
        .fold(
            ApiDocs::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
                .description(env!("CARGO_PKG_DESCRIPTION"))
                .server(BASE_PATH),
            |docs, (method, path, operation)| docs.operation(method, &path, operation),
        )
}

pub fn global_filters() -> Vec<Arc<dyn Filter>> {
    vec![Arc::new(RequestIdFilter)]
}

pub fn compose(config: &AppConfig) -> Result<AppBundle, BundleError> {
    let resolver = ModuleResolver::new()
        .register(AuthModule)?
        .register(SystemModule::new(config.node_env.clone()))?;

    Ok(AppBundle::new(config)?
        .apply_resolver(resolver)
        .apply_global_filters(global_filters())
        .apply_swagger(&api_docs()))
}
