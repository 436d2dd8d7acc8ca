use std::sync::Arc;

use axum::{Json, Router, response::Html, routing::get};
use serde_json::Value;

pub const SWAGGER_UI_VERSION: &str = "5.17.14";

/// Routes serving the Swagger UI page at `base` (with or without a trailing slash) and the
/// document at `{base}/openapi.json`.
pub fn router(base: &str, document: Value) -> Router {
    let document_path = format!("{base}/openapi.json");
    let page = Arc::new(render_page(&document_path));
    let document = Arc::new(document);

    let serve_page = get(move || {
        let page = page.clone();
        async move { Html(page.as_str().to_owned()) }
    });

    Router::new()
        .route(base, serve_page.clone())
        .route(&format!("{base}/"), serve_page)
        .route(
            &document_path,
            get(move || {
                let document = document.clone();
                async move { Json(document.as_ref().clone()) }
            }),
        )
}

fn render_page(document_path: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>API documentation</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{document_path}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##,
        version = SWAGGER_UI_VERSION,
        document_path = document_path,
    )
}
