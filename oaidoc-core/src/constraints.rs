//! Applies a field's parsed annotation to its schema node.
//!
//! Generic attributes are applied first, so an explicit `type=` override
//! decides which type-specific family the remaining keys are read as. Keys
//! that mean nothing for the node's type are ignored.

use serde_json::{Number, Value};

use crate::schema::{Schema, SchemaType};
use crate::tags::{parse_bool, TagSet};

/// Apply every recognised key of `tags` to `schema`.
pub fn inject(schema: &mut Schema, tags: &TagSet) {
    if tags.is_empty() {
        return;
    }
    inject_generic(schema, tags);
    match schema.schema_type {
        Some(SchemaType::String) => inject_string(schema, tags),
        Some(SchemaType::Integer) | Some(SchemaType::Number) => inject_numeric(schema, tags),
        Some(SchemaType::Array) => inject_array(schema, tags),
        Some(SchemaType::Boolean) => inject_boolean(schema, tags),
        _ => {}
    }
}

/// Attributes that apply to a node of any type.
pub fn inject_generic(schema: &mut Schema, tags: &TagSet) {
    if let Some(title) = tags.get("title") {
        schema.title = Some(title.to_string());
    }
    if let Some(description) = tags.get("description") {
        schema.description = Some(description.to_string());
    }
    if let Some(v) = tags.flag("deprecated") {
        schema.deprecated = Some(v);
    }
    if let Some(v) = tags.flag("nullable") {
        schema.nullable = Some(v);
    }
    if let Some(v) = tags.flag("readOnly") {
        schema.read_only = Some(v);
    }
    if let Some(v) = tags.flag("writeOnly") {
        schema.write_only = Some(v);
    }
    if let Some(raw) = tags.get("type") {
        match raw.parse::<SchemaType>() {
            Ok(t) => schema.schema_type = Some(t),
            Err(()) => tracing::warn!(value = raw, "ignoring unknown schema type override"),
        }
    }
}

fn inject_string(schema: &mut Schema, tags: &TagSet) {
    if let Some(v) = tags.parsed::<u64>("minLength") {
        schema.min_length = Some(v);
    }
    if let Some(v) = tags.parsed::<u64>("maxLength") {
        schema.max_length = Some(v);
    }
    if let Some(pattern) = tags.get("pattern") {
        schema.pattern = Some(pattern.to_string());
    }
    inject_format(schema, tags);
    inject_literals(schema, tags, SchemaType::String);
}

fn inject_numeric(schema: &mut Schema, tags: &TagSet) {
    if let Some(v) = tags.parsed::<f64>("multipleOf") {
        schema.multiple_of = Some(v);
    }
    if let Some(v) = tags.parsed::<f64>("minimum") {
        schema.minimum = Some(v);
    }
    if let Some(v) = tags.parsed::<f64>("maximum") {
        schema.maximum = Some(v);
    }
    if let Some(v) = tags.flag("exclusiveMinimum") {
        schema.exclusive_minimum = Some(v);
    }
    if let Some(v) = tags.flag("exclusiveMaximum") {
        schema.exclusive_maximum = Some(v);
    }
    inject_format(schema, tags);
    let ty = schema.schema_type.unwrap_or(SchemaType::Number);
    inject_literals(schema, tags, ty);
}

fn inject_boolean(schema: &mut Schema, tags: &TagSet) {
    if let Some(v) = tags.flag("default") {
        schema.default = Some(Value::Bool(v));
    }
    if let Some(v) = tags.flag("example") {
        schema.example = Some(Value::Bool(v));
    }
}

fn inject_array(schema: &mut Schema, tags: &TagSet) {
    if let Some(v) = tags.parsed::<u64>("minItems") {
        schema.min_items = Some(v);
    }
    if let Some(v) = tags.parsed::<u64>("maxItems") {
        schema.max_items = Some(v);
    }
    if let Some(v) = tags.flag("uniqueItems") {
        schema.unique_items = Some(v);
    }

    // Literals are typed after the items; a referenced item type reads as
    // strings.
    let item_type = schema.item_type().unwrap_or(SchemaType::String);
    if let Some(items) = tags.list("default") {
        schema.default = Some(Value::Array(coerce_all(&items, item_type)));
    }
    if let Some(items) = tags.list("example") {
        schema.example = Some(Value::Array(coerce_all(&items, item_type)));
    }
    if let Some(items) = tags.list("enum") {
        let values = coerce_all(&items, item_type);
        match schema.items.as_deref_mut().and_then(|i| i.as_inline_mut()) {
            Some(item_schema) => item_schema.enum_values = values,
            None => tracing::warn!("ignoring enum on an array of referenced items"),
        }
    }
}

fn inject_format(schema: &mut Schema, tags: &TagSet) {
    if let Some(format) = tags.get("format") {
        schema.format = Some(format.to_string());
    }
}

/// `enum`, `default` and `example` for scalar nodes.
fn inject_literals(schema: &mut Schema, tags: &TagSet, ty: SchemaType) {
    if let Some(items) = tags.list("enum") {
        schema.enum_values = coerce_all(&items, ty);
    }
    if let Some(raw) = tags.get("default") {
        schema.default = coerce(raw, ty);
    }
    if let Some(raw) = tags.get("example") {
        schema.example = coerce(raw, ty);
    }
}

fn coerce_all(raw: &[&str], ty: SchemaType) -> Vec<Value> {
    raw.iter().filter_map(|r| coerce(r, ty)).collect()
}

/// Convert an annotation literal into a JSON value of type `ty`. Literals
/// that do not parse are logged and dropped.
pub fn coerce(raw: &str, ty: SchemaType) -> Option<Value> {
    let value = match ty {
        SchemaType::Integer => raw.parse::<i64>().ok().map(Value::from),
        SchemaType::Number => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        SchemaType::Boolean => parse_bool(raw).map(Value::Bool),
        _ => Some(Value::String(raw.to_string())),
    };
    if value.is_none() {
        tracing::warn!(value = raw, ty = ?ty, "ignoring malformed literal");
    }
    value
}
