// API documentation: an OpenAPI document and the Swagger UI page that renders it.

pub mod swagger_ui;

use serde_json::{Map, Value, json};

/// Anything that can hand over a rendered OpenAPI document.
pub trait SwaggerBuilder {
    fn instance(&self) -> Value;
}

#[derive(Debug, Clone)]
pub struct ApiDocs {
    title: String,
    version: String,
    description: Option<String>,
    servers: Vec<String>,
    paths: Map<String, Value>,
}

impl ApiDocs {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            servers: Vec::new(),
            paths: Map::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn server(mut self, url: impl Into<String>) -> Self {
        self.servers.push(url.into());
        self
    }

    /// Adds (or replaces) one operation. `operation` is an OpenAPI Operation Object.
    pub fn operation(mut self, method: &str, path: &str, operation: Value) -> Self {
        let item = self
            .paths
            .entry(path.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(methods) = item {
            methods.insert(method.to_ascii_lowercase(), operation);
        }
        self
    }
}

impl SwaggerBuilder for ApiDocs {
    fn instance(&self) -> Value {
        let mut info = json!({
            "title": self.title,
            "version": self.version,
        });
        if let (Some(description), Value::Object(fields)) = (&self.description, &mut info) {
            fields.insert("description".into(), Value::String(description.clone()));
        }

        json!({
            "openapi": "3.0.3",
            "info": info,
            "servers": self
                .servers
                .iter()
                .map(|url| json!({ "url": url }))
                .collect::<Vec<_>>(),
            "paths": self.paths,
        })
    }
}
