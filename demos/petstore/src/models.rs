use chrono::{DateTime, Utc};
use oaidoc::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, Reflect)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: Uuid,
    /// Name the pet answers to.
    #[oai("minLength=1;maxLength=64;example=Rex")]
    pub name: String,
    #[oai("enum=dog,cat,bird;default=dog")]
    pub species: String,
    pub tags: Vec<String>,
    pub owner: Option<Owner>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Reflect)]
pub struct Owner {
    pub name: String,
    #[oai("format=email")]
    pub email: String,
}

#[derive(Debug, Deserialize, Reflect)]
#[serde(rename_all = "camelCase")]
pub struct CreatePet {
    #[oai("minLength=1;maxLength=64")]
    pub name: String,
    #[oai("enum=dog,cat,bird;default=dog")]
    pub species: String,
    #[serde(default)]
    #[oai("maxItems=10")]
    pub tags: Vec<String>,
    pub owner: Option<Owner>,
}

/// Query parameters of `GET /pets`.
#[derive(Debug, Deserialize, Reflect)]
pub struct ListPets {
    #[query("limit")]
    #[oai("minimum=1;maximum=100;default=20")]
    pub limit: Option<usize>,
    /// Only pets carrying this tag.
    #[query("tag")]
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize, Reflect)]
pub struct PetId {
    #[path("id")]
    pub id: Uuid,
}

#[derive(Debug, Serialize, Reflect)]
pub struct ApiError {
    pub message: String,
}
