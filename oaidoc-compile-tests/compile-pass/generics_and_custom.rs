use oaidoc::prelude::*;

#[derive(Reflect)]
#[oai(name = "Page")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Reflect)]
#[oai(custom)]
pub enum Status {
    Active,
    Retired,
}

impl CustomSchemaProvider for Status {
    fn schema(_: &mut Generator) -> Result<SchemaRef> {
        Ok(Schema {
            enum_values: vec!["active".into(), "retired".into()],
            ..Schema::string()
        }
        .into())
    }
}

#[derive(Reflect)]
pub struct Chain {
    pub r#type: String,
    pub next: Option<Box<Chain>>,
    pub statuses: Page<Status>,
}

fn main() {}
