//! Recursive schema generation.
//!
//! [`Generator`] owns one document and its component table. Struct types are
//! registered as named components; every other type is inlined into whatever
//! refers to it. Cycles are broken with an ancestor stack: a struct that is
//! already being walked further up the stack is referenced by the name that
//! was reserved for it, and its body is filled in when that frame completes.

use std::any::TypeId;

use serde::Deserialize;

use crate::classify::{self, Category};
use crate::components::ComponentTable;
use crate::config::OpenApiConfig;
use crate::constraints;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::naming;
use crate::params;
use crate::reflect::{FieldInfo, Reflect, StructInfo, TypeInfo, TypeKind};
use crate::schema::{Schema, SchemaRef};
use crate::tags::{self, TagSet};

/// Where property names come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// The serialization name (`#[serde(rename)]`, `rename_all`), else the
    /// declared field name.
    #[default]
    Serde,
    /// Declared field names verbatim.
    Declared,
}

/// One struct currently being walked.
///
/// `name` is the reserved component name; flattened structs are walked
/// without one.
#[derive(Debug)]
pub(crate) struct Frame {
    pub(crate) id: TypeId,
    pub(crate) name: Option<String>,
}

/// Builds one OpenAPI document.
///
/// All methods take `&mut self`: routes are registered on one thread during
/// startup, then the finished [`Document`] is handed to the server.
#[derive(Debug)]
pub struct Generator {
    config: OpenApiConfig,
    document: Document,
}

impl Generator {
    pub fn new(config: OpenApiConfig) -> Self {
        let document = Document::new(&config);
        Self { config, document }
    }

    pub fn config(&self) -> &OpenApiConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn components(&self) -> &ComponentTable {
        &self.document.components
    }

    pub(crate) fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Schema for `T` with the configured convention.
    pub fn generate_schema_for<T: Reflect>(&mut self) -> Result<SchemaRef> {
        let convention = self.config.convention;
        self.generate_schema(&T::type_info(), convention, None)
    }

    /// Schema reference for `ty`.
    ///
    /// Structs are registered under `explicit` when given, else under the
    /// name derived from the type. Generating the same type again returns
    /// the same reference without regenerating it.
    pub fn generate_schema(
        &mut self,
        ty: &TypeInfo,
        convention: Convention,
        explicit: Option<&str>,
    ) -> Result<SchemaRef> {
        let mut stack = Vec::new();
        self.schema_of(ty, convention, explicit, &mut stack)
    }

    /// Register a hand-built component, typically from a
    /// [`CustomSchemaProvider`](crate::reflect::CustomSchemaProvider).
    pub fn register_component(&mut self, name: &str, schema: Schema) -> SchemaRef {
        self.document.components.insert(name, schema);
        SchemaRef::component(name)
    }

    pub(crate) fn schema_of(
        &mut self,
        ty: &TypeInfo,
        convention: Convention,
        explicit: Option<&str>,
        stack: &mut Vec<Frame>,
    ) -> Result<SchemaRef> {
        let (target, _) = ty.dereference();

        if let Some(name) = stack
            .iter()
            .rev()
            .find(|f| f.id == target.id)
            .and_then(|f| f.name.as_deref())
        {
            tracing::debug!(component = name, "forward reference to type in progress");
            return Ok(SchemaRef::component(name));
        }

        if let TypeKind::Custom(provide) = target.kind {
            return provide(self);
        }

        let (target, category) = classify::classify(target)?;
        if let Some(base) = classify::base_schema(&category) {
            return Ok(base.into());
        }

        match category {
            Category::Array { elem, len, unique } => {
                let items = self.schema_of(elem, convention, None, stack)?;
                let mut schema = Schema::array(items);
                if let Some(len) = len {
                    schema.min_items = Some(len as u64);
                    schema.max_items = Some(len as u64);
                }
                if unique {
                    schema.unique_items = Some(true);
                }
                Ok(schema.into())
            }
            Category::Map { key, value } => {
                let values = self.map_values(target, key, value, convention, stack)?;
                Ok(Schema {
                    additional_properties: Some(Box::new(values)),
                    ..Schema::object()
                }
                .into())
            }
            Category::Object(info) => self.struct_schema(target, info, convention, explicit, stack),
            _ => Err(Error::UnsupportedType {
                type_name: target.display_name().to_string(),
                reason: "no schema rule for this kind",
            }),
        }
    }

    fn map_values(
        &mut self,
        map: &TypeInfo,
        key: &TypeInfo,
        value: &TypeInfo,
        convention: Convention,
        stack: &mut Vec<Frame>,
    ) -> Result<SchemaRef> {
        if !classify::is_string_like(key) {
            return Err(Error::NonStringMapKey {
                type_name: map.display_name().to_string(),
                key: key.display_name().to_string(),
            });
        }
        self.schema_of(value, convention, None, stack)
    }

    fn struct_schema(
        &mut self,
        ty: &TypeInfo,
        info: &StructInfo,
        convention: Convention,
        explicit: Option<&str>,
        stack: &mut Vec<Frame>,
    ) -> Result<SchemaRef> {
        let components = &self.document.components;
        if let Some(existing) = components.lookup(ty.id, explicit) {
            if components.contains(existing) {
                return Ok(SchemaRef::component(existing));
            }
        }

        let wanted = naming::name_for(ty, explicit, self.config.name_style)?;
        let name = self.document.components.reserve(ty.id, explicit, &wanted);

        stack.push(Frame {
            id: ty.id,
            name: Some(name.clone()),
        });
        let body = self.object_body(info, convention, stack);
        stack.pop();

        match body {
            Ok(body) => {
                self.document.components.insert(&name, body);
                Ok(SchemaRef::component(&name))
            }
            Err(err) => {
                self.document.components.release(&name);
                Err(err)
            }
        }
    }

    /// Object schema for the body fields of a struct, in declaration order.
    fn object_body(
        &mut self,
        info: &StructInfo,
        convention: Convention,
        stack: &mut Vec<Frame>,
    ) -> Result<Schema> {
        let mut schema = Schema::object();
        for field in &info.fields {
            let Some(set) = tags::parse(field.tag("oai")).into_set() else {
                continue;
            };
            if field.embedded {
                self.embed(field, convention, stack, &mut schema)?;
                continue;
            }
            if params::location_of(field).is_some() {
                continue;
            }

            let ty = field.type_info();
            let child = self.schema_of(&ty, convention, None, stack)?;
            let child = apply_field_tags(child, &set, field);
            let wire = wire_name(field, convention);
            if is_required(&ty, &set) {
                schema.require(&wire);
            }
            schema.properties.insert(wire, child);
        }
        Ok(schema)
    }

    /// Promote the properties of a flattened field into `parent`.
    fn embed(
        &mut self,
        field: &FieldInfo,
        convention: Convention,
        stack: &mut Vec<Frame>,
        parent: &mut Schema,
    ) -> Result<()> {
        let ty = field.type_info();
        let (target, _) = ty.dereference();
        match &target.kind {
            TypeKind::Struct(info) => {
                if stack.iter().any(|f| f.id == target.id) {
                    return Err(Error::InvalidEmbedding {
                        field: field.name.to_string(),
                        reason: "the type is flattened into itself",
                    });
                }
                stack.push(Frame {
                    id: target.id,
                    name: None,
                });
                let inner = self.object_body(info, convention, stack);
                stack.pop();
                let inner = inner?;

                for (name, property) in inner.properties {
                    parent.properties.insert(name, property);
                }
                for name in &inner.required {
                    parent.require(name);
                }
                if inner.additional_properties.is_some() {
                    parent.additional_properties = inner.additional_properties;
                }
                Ok(())
            }
            TypeKind::Map { key, value } => {
                let values = self.map_values(target, key, value, convention, stack)?;
                parent.additional_properties = Some(Box::new(values));
                Ok(())
            }
            _ => Err(Error::InvalidEmbedding {
                field: field.name.to_string(),
                reason: "only structs and maps can be flattened",
            }),
        }
    }
}

/// Apply a field's annotation to its schema.
///
/// Inline schemas take every constraint. A component reference is wrapped in
/// `allOf` so generic attributes can sit next to it without changing the
/// shared component.
fn apply_field_tags(child: SchemaRef, set: &TagSet, field: &FieldInfo) -> SchemaRef {
    let doc = field.tag("doc").filter(|d| !d.is_empty());
    match child {
        SchemaRef::Inline(mut schema) => {
            constraints::inject(&mut schema, set);
            if schema.description.is_none() {
                schema.description = doc.map(str::to_string);
            }
            SchemaRef::Inline(schema)
        }
        reference @ SchemaRef::Ref(_) => {
            let bare = Schema {
                all_of: vec![reference.clone()],
                ..Schema::default()
            };
            let mut wrapper = bare.clone();
            constraints::inject_generic(&mut wrapper, set);
            if wrapper.description.is_none() {
                wrapper.description = doc.map(str::to_string);
            }
            if wrapper == bare {
                reference
            } else {
                wrapper.into()
            }
        }
    }
}

/// Property name of `field` on the wire.
pub(crate) fn wire_name(field: &FieldInfo, convention: Convention) -> String {
    match convention {
        Convention::Serde => field.tag("rename").unwrap_or(field.name).to_string(),
        Convention::Declared => field.name.to_string(),
    }
}

/// An explicit `required` flag wins, then `nullable`; otherwise a field is
/// required unless its type is an `Option`.
pub(crate) fn is_required(ty: &TypeInfo, set: &TagSet) -> bool {
    if let Some(required) = set.flag("required") {
        return required;
    }
    if set.flag("nullable") == Some(true) {
        return false;
    }
    !ty.is_optional()
}
