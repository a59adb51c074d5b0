use std::sync::Arc;

use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use oaidoc_core::{Document, Result};

pub const JSON_PATH: &str = "/openapi.json";
pub const YAML_PATH: &str = "/openapi.yaml";

/// Both renderings, serialized once.
struct Rendered {
    json: String,
    yaml: String,
}

/// Build a `Router` serving `document` at [`JSON_PATH`] and [`YAML_PATH`].
///
/// The document is rendered here, so a serialization failure surfaces at
/// startup instead of on the first request.
pub fn openapi_routes<S: Clone + Send + Sync + 'static>(document: &Document) -> Result<Router<S>> {
    let rendered = Arc::new(Rendered {
        json: document.to_json()?,
        yaml: document.to_yaml()?,
    });
    tracing::info!(
        paths = document.paths.len(),
        schemas = document.components.len(),
        "serving OpenAPI document at {JSON_PATH} and {YAML_PATH}"
    );

    let json = rendered.clone();
    let yaml = rendered;
    Ok(Router::<S>::new()
        .route(
            JSON_PATH,
            get(move || {
                let body = json.json.clone();
                async move { ([(header::CONTENT_TYPE, "application/json")], body).into_response() }
            }),
        )
        .route(
            YAML_PATH,
            get(move || {
                let body = yaml.yaml.clone();
                async move { ([(header::CONTENT_TYPE, "application/yaml")], body).into_response() }
            }),
        ))
}
