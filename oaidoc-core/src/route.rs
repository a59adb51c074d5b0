//! Request bodies, responses and operations.

use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet};

use http::{Method, StatusCode};

use crate::document::{MediaTypeObject, Operation, RequestBody, Response};
use crate::error::{Error, Result};
use crate::generator::{Convention, Generator};
use crate::media::MediaType;
use crate::naming;
use crate::params::{self, Location};
use crate::reflect::{Reflect, TypeInfo, TypeKind};
use crate::tags;

/// Documentation of one route, passed to [`Generator::register_route`].
///
/// ```ignore
/// let route = RouteInfo::post("/pets")
///     .with_operation_id("create_pet")
///     .with_tag("pets")
///     .with_status(201);
/// generator.register_route::<CreatePet, Pet>(&route)?;
/// ```
#[derive(Debug, Clone)]
pub struct RouteInfo {
    pub method: Method,
    /// Path template with `{name}` segments.
    pub path: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// Status of the documented success response.
    pub status: u16,
    pub response_description: Option<String>,
    /// Response media token; the configured default when unset.
    pub media: Option<String>,
    pub deprecated: bool,
}

impl RouteInfo {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            operation_id: None,
            summary: None,
            description: None,
            tags: Vec::new(),
            status: 200,
            response_description: None,
            media: None,
            deprecated: false,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: &str) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_operation_id(mut self, id: &str) -> Self {
        self.operation_id = Some(id.to_string());
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_response_description(mut self, desc: &str) -> Self {
        self.response_description = Some(desc.to_string());
        self
    }

    pub fn with_media(mut self, token: &str) -> Self {
        self.media = Some(token.to_string());
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Explicit operation id, else `<method>_<path segments>`.
    pub fn operation_id(&self) -> String {
        if let Some(id) = &self.operation_id {
            return id.clone();
        }
        let mut id = self.method.as_str().to_ascii_lowercase();
        for segment in self.path.split('/').filter(|s| !s.is_empty()) {
            id.push('_');
            id.extend(
                segment
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '_'),
            );
        }
        id
    }
}

/// Names of the `{name}` segments of a path template.
pub fn template_parameters(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = rest[start + 1..start + len].trim_start_matches('*');
        if !name.is_empty() {
            names.push(name.to_string());
        }
        rest = &rest[start + len + 1..];
    }
    names
}

impl Generator {
    /// Request body for `ty` under the default media type. Types without a
    /// qualified name are registered as `<OperationId>Input`.
    pub fn generate_request_body(
        &mut self,
        operation_id: &str,
        convention: Convention,
        ty: &TypeInfo,
    ) -> Result<RequestBody> {
        let media: MediaType = self.config().default_media.parse()?;
        let (target, _) = ty.dereference();
        let fallback = (target.name.is_none() && target.default_name.is_none())
            .then(|| format!("{}Input", naming::to_pascal_case(operation_id)));

        let schema = self.generate_schema(ty, convention, fallback.as_deref())?;
        Ok(RequestBody {
            description: None,
            content: BTreeMap::from([(media.to_string(), MediaTypeObject { schema })]),
            required: true,
        })
    }

    /// Response for `status`. Without a type, or for `()`, the response has
    /// a description only; the description defaults to the reason phrase.
    pub fn generate_response(
        &mut self,
        status: u16,
        ty: Option<&TypeInfo>,
        media_token: &str,
        description: Option<&str>,
    ) -> Result<Response> {
        let code = StatusCode::from_u16(status).map_err(|_| Error::InvalidStatus(status))?;
        let media: MediaType = media_token.parse()?;
        let description = description
            .map(str::to_string)
            .unwrap_or_else(|| code.canonical_reason().unwrap_or("Response").to_string());

        let mut content = BTreeMap::new();
        if let Some(ty) = ty.filter(|t| !matches!(t.dereference().0.kind, TypeKind::Unit)) {
            let convention = self.config().convention;
            let schema = self.generate_schema(ty, convention, None)?;
            content.insert(media.to_string(), MediaTypeObject { schema });
        }
        Ok(Response {
            description,
            content,
        })
    }

    /// Insert `operation` at `method` on `path`.
    pub fn add_operation(&mut self, method: Method, path: &str, operation: Operation) -> Result<()> {
        let item = self.document_mut().paths.entry(path.to_string()).or_default();
        let slot = item.slot_mut(&method)?;
        if slot.is_some() {
            return Err(Error::DuplicateOperation {
                method: method.to_string(),
                path: path.to_string(),
            });
        }
        *slot = Some(operation);
        Ok(())
    }

    /// Document a route taking `In` and answering `Out`.
    ///
    /// Location-tagged fields of `In` become parameters and its remaining
    /// fields the request body. The path template and the path parameters
    /// must name the same set.
    pub fn register_route<In: Reflect, Out: Reflect>(&mut self, route: &RouteInfo) -> Result<()> {
        let input = In::type_info();
        let output = Out::type_info();
        let operation_id = route.operation_id();

        let parameters = self.generate_parameters(&input)?;
        check_path(&route.path, &parameters)?;

        let request_body = if allows_body(&route.method) && has_body_fields(&input, &mut Vec::new()) {
            let convention = self.config().convention;
            Some(self.generate_request_body(&operation_id, convention, &input)?)
        } else {
            None
        };

        let media = route
            .media
            .clone()
            .unwrap_or_else(|| self.config().default_media.clone());
        let response = self.generate_response(
            route.status,
            Some(&output),
            &media,
            route.response_description.as_deref(),
        )?;

        let operation = Operation {
            operation_id: Some(operation_id),
            summary: route.summary.clone(),
            description: route.description.clone(),
            tags: route.tags.clone(),
            parameters,
            request_body,
            responses: BTreeMap::from([(route.status.to_string(), response)]),
            deprecated: route.deprecated.then_some(true),
        };
        self.add_operation(route.method.clone(), &route.path, operation)?;
        tracing::info!(method = %route.method, path = %route.path, "registered route");
        Ok(())
    }
}

fn check_path(path: &str, parameters: &[params::Parameter]) -> Result<()> {
    let template: BTreeSet<String> = template_parameters(path).into_iter().collect();
    let declared: BTreeSet<String> = parameters
        .iter()
        .filter(|p| p.location == Location::Path)
        .map(|p| p.name.clone())
        .collect();
    if template == declared {
        return Ok(());
    }
    Err(Error::PathParameterMismatch {
        path: path.to_string(),
        missing: template.difference(&declared).cloned().collect(),
        unexpected: declared.difference(&template).cloned().collect(),
    })
}

fn allows_body(method: &Method) -> bool {
    !matches!(
        *method,
        Method::GET | Method::HEAD | Method::DELETE | Method::OPTIONS | Method::TRACE
    )
}

/// `true` when `ty` carries data outside of its parameters.
fn has_body_fields(ty: &TypeInfo, walking: &mut Vec<TypeId>) -> bool {
    let (target, _) = ty.dereference();
    match &target.kind {
        TypeKind::Unit => false,
        TypeKind::Struct(info) => {
            if walking.contains(&target.id) {
                return false;
            }
            walking.push(target.id);
            let found = info.fields.iter().any(|field| {
                if tags::parse(field.tag("oai")).is_ignored() {
                    return false;
                }
                if field.embedded {
                    return has_body_fields(&field.type_info(), walking);
                }
                params::location_of(field).is_none()
            });
            walking.pop();
            found
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_names() {
        assert_eq!(template_parameters("/users/{id}/posts/{post_id}"), vec!["id", "post_id"]);
        assert_eq!(template_parameters("/files/{*rest}"), vec!["rest"]);
        assert!(template_parameters("/health").is_empty());
    }

    #[test]
    fn derived_operation_id() {
        assert_eq!(RouteInfo::get("/pets/{id}").operation_id(), "get_pets_id");
        assert_eq!(
            RouteInfo::post("/pets").with_operation_id("create_pet").operation_id(),
            "create_pet"
        );
    }

    #[test]
    fn bodies_only_for_mutating_methods() {
        assert!(allows_body(&Method::POST));
        assert!(allows_body(&Method::PATCH));
        assert!(!allows_body(&Method::GET));
    }
}
