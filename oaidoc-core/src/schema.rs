//! Schema tree nodes as they appear in the generated document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of every component reference.
pub const COMPONENTS_PREFIX: &str = "#/components/schemas/";

/// Either an inline schema or a pointer to a registered component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaRef {
    Ref(Reference),
    Inline(Box<Schema>),
}

impl SchemaRef {
    /// Reference to the component registered under `name`.
    pub fn component(name: &str) -> Self {
        SchemaRef::Ref(Reference::schema(name))
    }

    pub fn inline(schema: Schema) -> Self {
        SchemaRef::Inline(Box::new(schema))
    }

    /// Component name when this is a reference.
    pub fn ref_name(&self) -> Option<&str> {
        match self {
            SchemaRef::Ref(r) => r.ref_path.strip_prefix(COMPONENTS_PREFIX),
            SchemaRef::Inline(_) => None,
        }
    }

    pub fn as_inline(&self) -> Option<&Schema> {
        match self {
            SchemaRef::Inline(s) => Some(s),
            SchemaRef::Ref(_) => None,
        }
    }

    pub fn as_inline_mut(&mut self) -> Option<&mut Schema> {
        match self {
            SchemaRef::Inline(s) => Some(s),
            SchemaRef::Ref(_) => None,
        }
    }
}

impl From<Schema> for SchemaRef {
    fn from(schema: Schema) -> Self {
        SchemaRef::inline(schema)
    }
}

/// `$ref` pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub ref_path: String,
}

impl Reference {
    pub fn schema(name: &str) -> Self {
        Self {
            ref_path: format!("{COMPONENTS_PREFIX}{name}"),
        }
    }
}

/// JSON Schema primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl std::str::FromStr for SchemaType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(SchemaType::String),
            "number" => Ok(SchemaType::Number),
            "integer" => Ok(SchemaType::Integer),
            "boolean" => Ok(SchemaType::Boolean),
            "array" => Ok(SchemaType::Array),
            "object" => Ok(SchemaType::Object),
            "null" => Ok(SchemaType::Null),
            _ => Err(()),
        }
    }
}

/// Serialize `Option<f64>` as an integer when it has no fractional part, so
/// integer bounds read `0` rather than `0.0`.
#[allow(clippy::ref_option)]
fn serialize_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => serializer.serialize_some(&(*v as i64)),
        Some(v) => serializer.serialize_some(v),
        None => serializer.serialize_none(),
    }
}

/// One node of the schema tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    // Numbers
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub multiple_of: Option<f64>,

    // Strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    // Arrays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    // Objects
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<SchemaRef>>,

    // Composition
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaRef>,
}

impl Schema {
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    pub fn string() -> Self {
        Self::of_type(SchemaType::String)
    }

    /// String with a `format`.
    pub fn formatted(format: &str) -> Self {
        Self {
            format: Some(format.to_string()),
            ..Self::string()
        }
    }

    pub fn object() -> Self {
        Self::of_type(SchemaType::Object)
    }

    pub fn array(items: SchemaRef) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type(SchemaType::Array)
        }
    }

    /// Add `name` to `required`, keeping declaration order and no duplicates.
    pub fn require(&mut self, name: &str) {
        if !self.required.iter().any(|r| r == name) {
            self.required.push(name.to_string());
        }
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Item schema type when the items are inline.
    pub fn item_type(&self) -> Option<SchemaType> {
        self.items
            .as_deref()
            .and_then(SchemaRef::as_inline)
            .and_then(|s| s.schema_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integral_bounds_serialize_without_fraction() {
        let schema = Schema {
            minimum: Some(0.0),
            maximum: Some(255.0),
            multiple_of: Some(0.5),
            ..Schema::of_type(SchemaType::Integer)
        };
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value, json!({"type": "integer", "minimum": 0, "maximum": 255, "multipleOf": 0.5}));
    }

    #[test]
    fn empty_collections_are_omitted() {
        let value = serde_json::to_value(Schema::object()).unwrap();
        assert_eq!(value, json!({"type": "object"}));
    }

    #[test]
    fn reference_serializes_as_dollar_ref() {
        let value = serde_json::to_value(SchemaRef::component("app.User")).unwrap();
        assert_eq!(value, json!({"$ref": "#/components/schemas/app.User"}));
        assert_eq!(SchemaRef::component("app.User").ref_name(), Some("app.User"));
    }

    #[test]
    fn require_deduplicates() {
        let mut schema = Schema::object();
        schema.require("a");
        schema.require("b");
        schema.require("a");
        assert_eq!(schema.required, vec!["a", "b"]);
    }
}
