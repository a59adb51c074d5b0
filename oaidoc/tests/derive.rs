use oaidoc::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

// ── Types ───────────────────────────────────────────────────────────────────

/// The derive sits next to serde's and reads the same attributes.
#[derive(Serialize, Deserialize, Reflect)]
#[serde(rename_all = "camelCase")]
struct Order {
    order_id: uuid::Uuid,
    placed_at: chrono::DateTime<chrono::Utc>,
    #[oai("minItems=1")]
    line_items: Vec<LineItem>,
    #[serde(skip)]
    internal_note: String,
    #[serde(rename = "total")]
    total_cents: u64,
}

#[derive(Serialize, Deserialize, Reflect)]
#[oai(name = "Line")]
struct LineItem {
    sku: String,
    #[oai("minimum=1")]
    quantity: u32,
}

#[derive(Reflect)]
#[oai(custom)]
struct Color;

impl CustomSchemaProvider for Color {
    fn schema(generator: &mut Generator) -> Result<SchemaRef> {
        Ok(generator.register_component(
            "Color",
            Schema {
                pattern: Some("^#[0-9a-f]{6}$".to_string()),
                ..Schema::string()
            },
        ))
    }
}

#[derive(Reflect)]
struct Palette {
    primary: Color,
    accents: Vec<Color>,
}

#[derive(Reflect)]
struct Wrapper<T> {
    value: T,
}

// ── Facade derive ───────────────────────────────────────────────────────────

#[test]
fn derive_through_the_facade() {
    let mut g = Generator::new(OpenApiConfig::new("Orders", "1.0.0"));
    let root = g.generate_schema_for::<Order>().unwrap();
    assert_eq!(root.ref_name(), Some("derive.Order"));

    let doc = g.document().to_json_value().unwrap();
    let order = &doc["components"]["schemas"]["derive.Order"];
    assert_eq!(order["properties"]["orderId"], json!({"type": "string", "format": "uuid"}));
    assert_eq!(
        order["properties"]["placedAt"],
        json!({"type": "string", "format": "date-time"})
    );
    assert_eq!(order["properties"]["lineItems"]["minItems"], 1);
    assert_eq!(
        order["properties"]["lineItems"]["items"]["$ref"],
        "#/components/schemas/Line"
    );
    assert!(order["properties"].get("internalNote").is_none());
    assert!(order["properties"]["total"].is_object());
    assert_eq!(
        order["required"],
        json!(["orderId", "placedAt", "lineItems", "total"])
    );
    assert_eq!(doc["components"]["schemas"]["Line"]["properties"]["quantity"]["minimum"], 1);
}

#[test]
fn custom_provider_registers_once() {
    let mut g = Generator::new(OpenApiConfig::default());
    g.generate_schema_for::<Palette>().unwrap();

    let doc = g.document().to_json_value().unwrap();
    let palette = &doc["components"]["schemas"]["derive.Palette"];
    assert_eq!(palette["properties"]["primary"]["$ref"], "#/components/schemas/Color");
    assert_eq!(
        palette["properties"]["accents"]["items"]["$ref"],
        "#/components/schemas/Color"
    );
    assert_eq!(doc["components"]["schemas"]["Color"]["pattern"], "^#[0-9a-f]{6}$");
    assert_eq!(g.components().len(), 2);
}

#[test]
fn generic_structs_are_named_after_their_arguments() {
    let mut g = Generator::new(OpenApiConfig::default());
    let root = g.generate_schema_for::<Wrapper<LineItem>>().unwrap();
    assert_eq!(root.ref_name(), Some("derive.WrapperLineItem"));
}

#[test]
fn core_items_are_reachable_from_the_facade() {
    assert_eq!(oaidoc::document::OPENAPI_VERSION, "3.0.3");
    let _: oaidoc::MediaType = "json".parse().unwrap();
    let _ = oaidoc::oaidoc_core::Generator::new(oaidoc::OpenApiConfig::default());
}
