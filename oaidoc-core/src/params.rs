//! Parameters bound from the path, query string, headers and cookies.

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{self, Category};
use crate::constraints;
use crate::error::{Error, Result};
use crate::generator::{self, Generator};
use crate::reflect::{FieldInfo, StructInfo, TypeInfo, TypeKind};
use crate::schema::{Schema, SchemaRef};
use crate::tags::{self, parse_bool, TagSet};

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Path,
    Query,
    Header,
    Cookie,
}

impl Location {
    /// Tag lookup order; only the first location tag found on a field counts.
    pub const PRIORITY: [Location; 4] = [
        Location::Path,
        Location::Query,
        Location::Header,
        Location::Cookie,
    ];

    /// Field tag key for this location.
    pub fn tag(&self) -> &'static str {
        match self {
            Location::Path => "path",
            Location::Query => "query",
            Location::Header => "header",
            Location::Cookie => "cookie",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Location of `field` and the raw value of its location tag.
pub fn location_of(field: &FieldInfo) -> Option<(Location, &'static str)> {
    Location::PRIORITY
        .iter()
        .find_map(|loc| field.tag(loc.tag()).map(|raw| (*loc, raw)))
}

/// One documented parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: Location,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    pub schema: SchemaRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Generator {
    /// Parameters declared by the location-tagged fields of `ty`, in field
    /// order. Flattened structs contribute their own parameters. Non-struct
    /// types have none.
    pub fn generate_parameters(&mut self, ty: &TypeInfo) -> Result<Vec<Parameter>> {
        let (target, _) = ty.dereference();
        let TypeKind::Struct(info) = &target.kind else {
            return Ok(Vec::new());
        };

        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut walking = vec![target.id];
        self.collect_parameters(info, &mut walking, &mut seen, &mut out)?;
        Ok(out)
    }

    fn collect_parameters(
        &mut self,
        info: &StructInfo,
        walking: &mut Vec<TypeId>,
        seen: &mut HashSet<(String, Location)>,
        out: &mut Vec<Parameter>,
    ) -> Result<()> {
        for field in &info.fields {
            let Some(set) = tags::parse(field.tag("oai")).into_set() else {
                continue;
            };

            if field.embedded {
                let ty = field.type_info();
                let (target, _) = ty.dereference();
                // Flattened maps carry body data only.
                let TypeKind::Struct(inner) = &target.kind else {
                    continue;
                };
                if walking.contains(&target.id) {
                    return Err(Error::InvalidEmbedding {
                        field: field.name.to_string(),
                        reason: "the type is flattened into itself",
                    });
                }
                walking.push(target.id);
                let result = self.collect_parameters(inner, walking, seen, out);
                walking.pop();
                result?;
                continue;
            }

            let Some((location, raw)) = location_of(field) else {
                continue;
            };
            let parameter = self.parameter(field, location, raw, &set)?;
            if !seen.insert((parameter.name.clone(), location)) {
                return Err(Error::DuplicateParameter {
                    name: parameter.name,
                    location,
                });
            }
            out.push(parameter);
        }
        Ok(())
    }

    fn parameter(
        &mut self,
        field: &FieldInfo,
        location: Location,
        raw: &str,
        set: &TagSet,
    ) -> Result<Parameter> {
        let ty = field.type_info();
        let mut schema = self.parameter_schema(field, &ty, location)?;

        let mut description = None;
        let mut deprecated = None;
        if let Some(inline) = schema.as_inline_mut() {
            constraints::inject(inline, set);
            // Parameter-level attributes live on the parameter object.
            description = inline.description.take();
            deprecated = inline.deprecated.take();
        }
        if description.is_none() {
            description = set
                .get("description")
                .or(field.tag("doc"))
                .filter(|d| !d.is_empty())
                .map(str::to_string);
        }

        let name = match raw.trim() {
            "" => generator::wire_name(field, self.config().convention),
            name => name.to_string(),
        };
        let required = location == Location::Path || generator::is_required(&ty, set);

        Ok(Parameter {
            name,
            location,
            required,
            description,
            deprecated,
            schema,
            explode: field.tag("explode").and_then(parse_bool),
            style: field.tag("style").map(str::to_string),
        })
    }

    /// Inline schema of a parameter value: a scalar or an array of scalars.
    fn parameter_schema(
        &mut self,
        field: &FieldInfo,
        ty: &TypeInfo,
        location: Location,
    ) -> Result<SchemaRef> {
        let unsupported = || Error::UnsupportedParameterType {
            field: field.name.to_string(),
            type_name: ty.display_name().to_string(),
            location,
        };

        let (_, category) = classify::classify(ty)?;
        match category {
            Category::Custom(provide) => provide(self),
            Category::Array { elem, len, unique } => {
                let (_, elem_category) = classify::classify(elem)?;
                let items = match elem_category {
                    Category::Custom(provide) => provide(self)?,
                    other => classify::base_schema(&other).ok_or_else(unsupported)?.into(),
                };
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
            other => Ok(classify::base_schema(&other).ok_or_else(unsupported)?.into()),
        }
    }
}
