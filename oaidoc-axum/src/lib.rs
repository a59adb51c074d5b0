//! axum integration for oaidoc.
//!
//! Build the document once at startup with a [`Generator`], then mount
//! [`openapi_routes`] next to the application's own routes:
//!
//! ```ignore
//! let mut generator = Generator::new(OpenApiConfig::new("Pet Store", "1.0.0"));
//! generator.register_route::<GetPet, Pet>(&RouteInfo::get("/pets/{id}"))?;
//!
//! let app = Router::new()
//!     .route("/pets/{id}", get(get_pet))
//!     .merge(openapi_routes(&generator.into_document())?);
//! ```
//!
//! [`Generator`]: oaidoc_core::Generator

mod handlers;
mod layers;

pub use handlers::{openapi_routes, JSON_PATH, YAML_PATH};
pub use layers::init_tracing;
