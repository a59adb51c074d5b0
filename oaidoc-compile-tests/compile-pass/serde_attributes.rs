use oaidoc::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Reflect)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename(serialize = "accountId", deserialize = "account_id"))]
    pub id: uuid::Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip)]
    pub cache: Vec<u8>,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Serialize, Deserialize, Reflect, Default)]
pub struct Audit {
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn main() {}
