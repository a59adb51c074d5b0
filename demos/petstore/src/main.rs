use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use oaidoc::prelude::*;
use tokio::sync::RwLock;
use uuid::Uuid;

mod models;

use models::{ApiError, CreatePet, ListPets, Pet, PetId};

type Store = Arc<RwLock<HashMap<Uuid, Pet>>>;

async fn list_pets(State(store): State<Store>, Query(query): Query<ListPets>) -> Json<Vec<Pet>> {
    let pets = store.read().await;
    let limit = query.limit.unwrap_or(20);
    let mut out: Vec<Pet> = pets
        .values()
        .filter(|p| query.tag.as_ref().map_or(true, |t| p.tags.contains(t)))
        .cloned()
        .collect();
    out.sort_by_key(|p| p.created_at);
    out.truncate(limit);
    Json(out)
}

async fn create_pet(
    State(store): State<Store>,
    Json(body): Json<CreatePet>,
) -> (StatusCode, Json<Pet>) {
    let pet = Pet {
        id: Uuid::new_v4(),
        name: body.name,
        species: body.species,
        tags: body.tags,
        owner: body.owner,
        created_at: Utc::now(),
    };
    store.write().await.insert(pet.id, pet.clone());
    tracing::info!(id = %pet.id, "pet created");
    (StatusCode::CREATED, Json(pet))
}

async fn get_pet(
    State(store): State<Store>,
    Path(PetId { id }): Path<PetId>,
) -> std::result::Result<Json<Pet>, (StatusCode, Json<ApiError>)> {
    store.read().await.get(&id).cloned().map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                message: format!("pet {id} not found"),
            }),
        )
    })
}

async fn delete_pet(State(store): State<Store>, Path(PetId { id }): Path<PetId>) -> StatusCode {
    match store.write().await.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

/// Describe every route the service exposes.
fn build_document() -> oaidoc::Result<Document> {
    let config = OpenApiConfig::from_yaml_str(include_str!("../openapi.yaml"))?;
    let mut generator = Generator::new(config);

    generator.register_route::<ListPets, Vec<Pet>>(
        &RouteInfo::get("/pets")
            .with_operation_id("list_pets")
            .with_summary("List pets")
            .with_tag("pets"),
    )?;
    generator.register_route::<CreatePet, Pet>(
        &RouteInfo::post("/pets")
            .with_operation_id("create_pet")
            .with_summary("Create a pet")
            .with_tag("pets")
            .with_status(201),
    )?;
    generator.register_route::<PetId, Pet>(
        &RouteInfo::get("/pets/{id}")
            .with_operation_id("get_pet")
            .with_tag("pets"),
    )?;
    generator.register_route::<PetId, ()>(
        &RouteInfo::delete("/pets/{id}")
            .with_operation_id("delete_pet")
            .with_tag("pets")
            .with_status(204),
    )?;

    // Error body, documented alongside the success responses.
    let not_found = generator.generate_response(
        404,
        Some(&<ApiError as Reflect>::type_info()),
        "json",
        Some("No pet with this id"),
    )?;
    let mut document = generator.into_document();
    if let Some(item) = document.paths.get_mut("/pets/{id}") {
        for op in [item.get.as_mut(), item.delete.as_mut()].into_iter().flatten() {
            op.responses.insert("404".to_string(), not_found.clone());
        }
    }

    Ok(document)
}

#[tokio::main]
async fn main() {
    oaidoc::oaidoc_axum::init_tracing();

    let document = match build_document() {
        Ok(doc) => doc,
        Err(err) => {
            tracing::error!(error = %err, "cannot build the OpenAPI document");
            std::process::exit(1);
        }
    };
    let docs = match openapi_routes(&document) {
        Ok(router) => router,
        Err(err) => {
            tracing::error!(error = %err, "cannot render the OpenAPI document");
            std::process::exit(1);
        }
    };

    let store: Store = Arc::default();
    let app = Router::new()
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/{id}", get(get_pet).delete(delete_pet))
        .merge(docs)
        .with_state(store);

    let addr = "0.0.0.0:3000";
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(err) => {
            tracing::error!(error = %err, addr, "cannot bind");
            std::process::exit(1);
        }
    };
    tracing::info!("listening on http://{addr} (docs at /openapi.json)");
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "server stopped");
    }
}
