use crate::shared::infrastructure::bundle::AppBundle;
use crate::shared::infrastructure::docs::ApiDocs;
use crate::shared::infrastructure::filter::invalid_url::INVALID_URL_MESSAGE;
use crate::shared::infrastructure::http::method_override::METHOD_OVERRIDE_HEADER;
use crate::tests::fixtures::config::{ALLOWED_ORIGIN, test_config};
use crate::tests::fixtures::filters::{Trail, TrailFilter};
use crate::tests::fixtures::resolvers::StaticResolver;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
    routing::{delete, get, put},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn routes(trail: &Trail) -> Router {
    let trail = trail.clone();
    Router::new()
        .route(
            "/hello",
            get(move || {
                let trail = trail.clone();
                async move {
                    trail.push("route");
                    "hello"
                }
            }),
        )
        .route(
            "/items",
            delete(|body: String| async move { body }).put(|| async { "replaced" }),
        )
        .route("/replace-only", put(|| async { "replaced" }))
}

async fn bundled_app(trail: &Trail) -> Router {
    AppBundle::new(&test_config())
        .unwrap()
        .apply_global_filters([
            TrailFilter::shared("first", trail),
            TrailFilter::shared("second", trail),
        ])
        .apply_resolver(StaticResolver::new(routes(trail)))
        .apply_swagger(&ApiDocs::new("API", "1.0.0"))
        .run()
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn filters_run_in_insertion_order_before_routes() {
    let trail = Trail::default();
    let app = bundled_app(&trail).await;

    let response = app
        .oneshot(Request::get("/api/hello").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "hello");
    assert_eq!(trail.entries(), vec!["first", "second", "route"]);
}

#[tokio::test]
async fn filters_run_before_the_docs() {
    let trail = Trail::default();
    let app = bundled_app(&trail).await;

    let page = app
        .clone()
        .oneshot(Request::get("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let document = app
        .oneshot(
            Request::get("/docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(page.status(), StatusCode::OK);
    assert_eq!(document.status(), StatusCode::OK);
    let document: Value = serde_json::from_str(&body_text(document).await).unwrap();
    assert_eq!(document["info"]["title"], "API");
    assert_eq!(trail.entries(), vec!["first", "second", "first", "second"]);
}

#[tokio::test]
async fn unmatched_routes_get_the_invalid_url_response_after_filters() {
    let trail = Trail::default();
    let app = bundled_app(&trail).await;

    let response = app
        .oneshot(
            Request::get("/api/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["message"], INVALID_URL_MESSAGE);
    assert_eq!(json["path"], "/api/does-not-exist");
    assert_eq!(trail.entries(), vec!["first", "second"]);
}

#[tokio::test]
async fn known_path_with_an_unserved_method_gets_the_invalid_url_response() {
    let trail = Trail::default();
    let app = bundled_app(&trail).await;

    let response = app
        .oneshot(Request::post("/api/hello").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["message"], INVALID_URL_MESSAGE);
    assert_eq!(json["path"], "/api/hello");
    assert_eq!(trail.entries(), vec!["first", "second"]);
}

#[tokio::test]
async fn override_to_a_method_the_route_lacks_gets_the_invalid_url_response() {
    let trail = Trail::default();
    let app = bundled_app(&trail).await;

    let response = app
        .oneshot(
            Request::post("/api/replace-only")
                .header(METHOD_OVERRIDE_HEADER, "PATCH")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["message"], INVALID_URL_MESSAGE);
}

#[tokio::test]
async fn docs_are_served_with_a_trailing_slash_too() {
    let trail = Trail::default();
    let app = bundled_app(&trail).await;

    let response = app
        .oneshot(Request::get("/docs/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("swagger-ui"));
}

#[tokio::test]
async fn routes_are_only_reachable_under_the_base_path() {
    let trail = Trail::default();
    let app = bundled_app(&trail).await;

    let response = app
        .oneshot(Request::get("/hello").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["message"], INVALID_URL_MESSAGE);
}

#[tokio::test]
async fn body_method_field_turns_a_post_into_a_delete() {
    let trail = Trail::default();
    let app = bundled_app(&trail).await;

    let response = app
        .oneshot(
            Request::post("/api/items")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"_method":"DELETE","id":7}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let forwarded: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(forwarded, json!({ "id": 7 }));
}

#[tokio::test]
async fn override_header_turns_a_post_into_a_put() {
    let trail = Trail::default();
    let app = bundled_app(&trail).await;

    let response = app
        .oneshot(
            Request::post("/api/replace-only")
                .header(METHOD_OVERRIDE_HEADER, "PUT")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "replaced");
}

#[tokio::test]
async fn preflight_from_an_allowed_origin_is_answered_with_200() {
    let trail = Trail::default();
    let app = bundled_app(&trail).await;

    let response = app
        .oneshot(
            Request::options("/api/items")
                .header(header::ORIGIN, ALLOWED_ORIGIN)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ALLOWED_ORIGIN
    );
    assert!(trail.entries().is_empty());
}

#[tokio::test]
async fn malformed_json_is_rejected_before_any_filter() {
    let trail = Trail::default();
    let app = bundled_app(&trail).await;

    let response = app
        .oneshot(
            Request::post("/api/items")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(trail.entries().is_empty());
}
