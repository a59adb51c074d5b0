use axum::body::Body;
use axum::Router;
use http::Request;
use http_body_util::BodyExt;
use oaidoc_axum::{openapi_routes, JSON_PATH, YAML_PATH};
use oaidoc_core::{Document, Generator, OpenApiConfig, RouteInfo};
use oaidoc_macros::Reflect;
use serde_json::Value;
use tower::ServiceExt;

// ── Helpers ─────────────────────────────────────────────────────────────────

#[derive(Reflect)]
struct GetUser {
    #[path]
    id: u64,
}

#[derive(Reflect)]
struct User {
    id: u64,
    name: String,
}

fn document() -> Document {
    let mut g = Generator::new(OpenApiConfig::new("Test API", "1.0.0"));
    g.register_route::<GetUser, User>(&RouteInfo::get("/users/{id}"))
        .unwrap();
    g.into_document()
}

async fn get_response(router: Router, path: &str) -> (http::StatusCode, String, http::HeaderMap) {
    let req = Request::builder().uri(path).body(Body::empty()).unwrap();

    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8(body.to_vec()).unwrap();
    (status, body_str, headers)
}

// ── JSON ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn openapi_json_endpoint() {
    let router = openapi_routes::<()>(&document()).unwrap();

    let (status, body, _) = get_response(router, JSON_PATH).await;
    assert_eq!(status, http::StatusCode::OK);

    let spec: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(spec["openapi"], "3.0.3");
    assert!(spec["paths"]["/users/{id}"]["get"].is_object());
    assert!(spec["components"]["schemas"]["routes.User"].is_object());
}

#[tokio::test]
async fn openapi_json_content_type() {
    let router = openapi_routes::<()>(&document()).unwrap();

    let (_, _, headers) = get_response(router, JSON_PATH).await;
    assert_eq!(
        headers.get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );
}

// ── YAML ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn openapi_yaml_endpoint() {
    let doc = document();
    let router = openapi_routes::<()>(&doc).unwrap();

    let (status, body, headers) = get_response(router, YAML_PATH).await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(
        headers.get("content-type").unwrap().to_str().unwrap(),
        "application/yaml"
    );

    let spec: Value = serde_yaml::from_str(&body).unwrap();
    assert_eq!(spec, doc.to_json_value().unwrap());
}

// ── Routing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_path_is_not_found() {
    let router = openapi_routes::<()>(&document()).unwrap();
    let (status, _, _) = get_response(router, "/docs").await;
    assert_eq!(status, http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn merges_with_application_routes() {
    let app = Router::new()
        .route("/health", axum::routing::get(|| async { "OK" }))
        .merge(openapi_routes(&document()).unwrap());

    let (status, body, _) = get_response(app.clone(), "/health").await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, _, _) = get_response(app, JSON_PATH).await;
    assert_eq!(status, http::StatusCode::OK);
}

#[tokio::test]
async fn empty_document_is_served() {
    let doc = Generator::new(OpenApiConfig::default()).into_document();
    let router = openapi_routes::<()>(&doc).unwrap();
    let (_, body, _) = get_response(router, JSON_PATH).await;
    let spec: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(spec["paths"], serde_json::json!({}));
}
