use oaidoc::prelude::*;

#[derive(Reflect)]
pub struct ListPets {
    #[path]
    pub owner: String,
    #[query("limit")]
    #[oai("minimum=1;maximum=100")]
    pub limit: Option<u32>,
    #[query(name = "tag", explode = false, style = "form")]
    pub tags: Vec<String>,
    #[header("X-Request-Id")]
    pub request_id: Option<String>,
    #[cookie("session")]
    pub session: Option<String>,
    /// Body field documented by its doc comment.
    #[oai = "minLength=1"]
    pub note: String,
}

fn main() {}
