use oaidoc::prelude::*;

#[derive(Reflect)]
pub struct Pet {
    pub id: u64,
    pub name: String,
    pub tag: Option<String>,
}

fn main() {
    let info = Pet::type_info();
    assert!(matches!(info.kind, oaidoc::TypeKind::Struct(_)));
}
