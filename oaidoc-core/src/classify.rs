//! Maps a type descriptor to its schema category.

use crate::error::{Error, Result};
use crate::reflect::{CustomSchemaFn, StructInfo, TypeInfo, TypeKind, WellKnown};
use crate::schema::{Schema, SchemaType};

/// Schema category of a dereferenced type.
#[derive(Debug, Clone, Copy)]
pub enum Category<'a> {
    Boolean,
    Integer { signed: bool, bits: u8 },
    Number { bits: u8 },
    String,
    /// Sequence or fixed array; `len` is set for fixed arrays.
    Array {
        elem: &'a TypeInfo,
        len: Option<usize>,
        unique: bool,
    },
    Map {
        key: &'a TypeInfo,
        value: &'a TypeInfo,
    },
    Object(&'a StructInfo),
    WellKnown(WellKnown),
    Custom(CustomSchemaFn),
    Any,
}

impl Category<'_> {
    /// `true` for categories that map to a fixed inline schema.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Category::Boolean
                | Category::Integer { .. }
                | Category::Number { .. }
                | Category::String
                | Category::WellKnown(_)
                | Category::Any
        )
    }
}

/// Classify `ty`, dereferencing pointers first.
///
/// Returns the dereferenced descriptor alongside its category.
pub fn classify(ty: &TypeInfo) -> Result<(&TypeInfo, Category<'_>)> {
    let (target, _) = ty.dereference();
    let category = match &target.kind {
        TypeKind::Bool => Category::Boolean,
        TypeKind::Int { signed, bits } => Category::Integer {
            signed: *signed,
            bits: *bits,
        },
        TypeKind::Float { bits } => Category::Number { bits: *bits },
        TypeKind::String => Category::String,
        TypeKind::WellKnown(wk) => Category::WellKnown(*wk),
        TypeKind::Custom(f) => Category::Custom(*f),
        TypeKind::Any => Category::Any,
        TypeKind::Seq { elem, unique } => Category::Array {
            elem: elem.as_ref(),
            len: None,
            unique: *unique,
        },
        TypeKind::Array { elem, len } => Category::Array {
            elem: elem.as_ref(),
            len: Some(*len),
            unique: false,
        },
        TypeKind::Map { key, value } => Category::Map {
            key: key.as_ref(),
            value: value.as_ref(),
        },
        TypeKind::Struct(info) => Category::Object(info),
        TypeKind::Unit => {
            return Err(Error::UnsupportedType {
                type_name: target.display_name().to_string(),
                reason: "unit has no schema",
            })
        }
        TypeKind::Unsupported(reason) => {
            return Err(Error::UnsupportedType {
                type_name: target.display_name().to_string(),
                reason: *reason,
            })
        }
        TypeKind::Optional(_) | TypeKind::Pointer(_) => {
            unreachable!("pointers are stripped by dereference")
        }
    };
    Ok((target, category))
}

/// `true` when values of `ty` serialize as JSON strings (valid map keys).
pub fn is_string_like(ty: &TypeInfo) -> bool {
    matches!(
        ty.dereference().0.kind,
        TypeKind::String | TypeKind::WellKnown(_)
    )
}

/// Inline schema for scalar categories, including the bit-width bounds of
/// integer types. Composite categories return `None`.
pub fn base_schema(category: &Category<'_>) -> Option<Schema> {
    let schema = match category {
        Category::Boolean => Schema::of_type(SchemaType::Boolean),
        Category::String => Schema::string(),
        Category::Integer { signed, bits } => integer_schema(*signed, *bits),
        Category::Number { bits } => Schema {
            format: Some(if *bits == 32 { "float" } else { "double" }.to_string()),
            ..Schema::of_type(SchemaType::Number)
        },
        Category::WellKnown(wk) => well_known_schema(*wk),
        Category::Any => Schema::default(),
        Category::Array { .. } | Category::Map { .. } | Category::Object(_) | Category::Custom(_) => {
            return None
        }
    };
    Some(schema)
}

fn integer_schema(signed: bool, bits: u8) -> Schema {
    let mut schema = Schema::of_type(SchemaType::Integer);
    match (signed, bits) {
        (true, 8) => bounds(&mut schema, i8::MIN as f64, i8::MAX as f64),
        (true, 16) => bounds(&mut schema, i16::MIN as f64, i16::MAX as f64),
        (true, 32) => schema.format = Some("int32".to_string()),
        (true, _) => schema.format = Some("int64".to_string()),
        (false, 8) => bounds(&mut schema, 0.0, u8::MAX as f64),
        (false, 16) => bounds(&mut schema, 0.0, u16::MAX as f64),
        (false, 32) => {
            schema.format = Some("int32".to_string());
            bounds(&mut schema, 0.0, u32::MAX as f64);
        }
        (false, _) => {
            schema.format = Some("int64".to_string());
            schema.minimum = Some(0.0);
        }
    }
    schema
}

fn bounds(schema: &mut Schema, min: f64, max: f64) {
    schema.minimum = Some(min);
    schema.maximum = Some(max);
}

fn well_known_schema(wk: WellKnown) -> Schema {
    match wk {
        WellKnown::DateTime => Schema::formatted("date-time"),
        WellKnown::Date => Schema::formatted("date"),
        WellKnown::Ipv4 => Schema::formatted("ipv4"),
        WellKnown::Ipv6 => Schema::formatted("ipv6"),
        WellKnown::Ip => Schema::formatted("ip"),
        WellKnown::Bytes => Schema::formatted("byte"),
        WellKnown::Binary => Schema::formatted("binary"),
        WellKnown::RawJson => Schema::formatted("json"),
        WellKnown::Uuid => Schema::formatted("uuid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Reflect;

    fn base<T: Reflect>() -> Schema {
        let info = T::type_info();
        let (_, category) = classify(&info).unwrap();
        base_schema(&category).unwrap()
    }

    #[test]
    fn pointer_to_pointer_to_string_is_string() {
        let info = <Option<Box<String>>>::type_info();
        let (target, category) = classify(&info).unwrap();
        assert!(matches!(category, Category::String));
        assert!(matches!(target.kind, TypeKind::String));
    }

    #[test]
    fn small_integers_get_full_range() {
        let s = base::<i8>();
        assert_eq!(s.minimum, Some(-128.0));
        assert_eq!(s.maximum, Some(127.0));
        let u = base::<u8>();
        assert_eq!(u.minimum, Some(0.0));
        assert_eq!(u.maximum, Some(255.0));
    }

    #[test]
    fn wide_integers_get_formats() {
        assert_eq!(base::<i32>().format.as_deref(), Some("int32"));
        assert_eq!(base::<i64>().format.as_deref(), Some("int64"));
        let u = base::<u64>();
        assert_eq!(u.format.as_deref(), Some("int64"));
        assert_eq!(u.minimum, Some(0.0));
        assert_eq!(u.maximum, None);
    }

    #[test]
    fn floats_get_formats() {
        assert_eq!(base::<f32>().format.as_deref(), Some("float"));
        assert_eq!(base::<f64>().format.as_deref(), Some("double"));
    }

    #[test]
    fn well_known_types_are_formatted_strings() {
        let ts = base::<chrono::DateTime<chrono::Utc>>();
        assert_eq!(ts.schema_type, Some(SchemaType::String));
        assert_eq!(ts.format.as_deref(), Some("date-time"));
        assert_eq!(base::<std::net::Ipv4Addr>().format.as_deref(), Some("ipv4"));
        assert_eq!(base::<bytes::Bytes>().format.as_deref(), Some("byte"));
        assert_eq!(base::<Box<serde_json::value::RawValue>>().format.as_deref(), Some("json"));
        assert_eq!(base::<uuid::Uuid>().format.as_deref(), Some("uuid"));
    }

    #[test]
    fn channels_are_rejected() {
        let info = <std::sync::mpsc::Sender<u8>>::type_info();
        let err = classify(&info).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { .. }));
        assert!(err.to_string().contains("Sender"));
    }

    #[test]
    fn function_pointers_are_rejected() {
        let info = <fn(u8) -> u8>::type_info();
        assert!(matches!(classify(&info), Err(Error::UnsupportedType { .. })));
    }

    #[test]
    fn string_like_keys() {
        assert!(is_string_like(&String::type_info()));
        assert!(is_string_like(&uuid::Uuid::type_info()));
        assert!(!is_string_like(&u32::type_info()));
    }
}
