use oaidoc_core::schema::SchemaType;
use oaidoc_core::{Error, Generator, Location, OpenApiConfig, Parameter, Reflect};
use oaidoc_macros::Reflect;
use serde_json::json;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn parameters<T: Reflect>() -> Vec<Parameter> {
    let mut g = Generator::new(OpenApiConfig::new("Test API", "1.0.0"));
    g.generate_parameters(&T::type_info()).unwrap()
}

fn find<'a>(params: &'a [Parameter], name: &str) -> &'a Parameter {
    params
        .iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("no parameter {name}"))
}

// ── Types ───────────────────────────────────────────────────────────────────

#[derive(Reflect)]
#[allow(non_snake_case)]
struct GetItem {
    #[path("id")]
    ID: i64,
    #[query("q")]
    Q: Option<String>,
}

#[derive(Reflect)]
struct OptionalPath {
    #[path]
    slug: Option<String>,
}

#[derive(Reflect)]
struct Search {
    #[query("limit")]
    #[oai("minimum=1;maximum=100;default=20")]
    limit: Option<u32>,
    #[query("tag", explode = false, style = "form")]
    tags: Vec<String>,
    #[header("X-Request-Id")]
    request_id: String,
    #[cookie("session")]
    session: Option<String>,
    /// Free-text filter.
    #[query]
    filter: Option<String>,
    body_field: String,
}

#[derive(Reflect)]
struct Paging {
    #[query("page")]
    page: Option<u32>,
    #[query("per_page")]
    per_page: Option<u32>,
}

#[derive(Reflect)]
struct ListUsers {
    #[path("org")]
    org: String,
    #[serde(flatten)]
    paging: Paging,
}

#[derive(Reflect)]
struct Duplicated {
    #[query("q")]
    first: String,
    #[query("q")]
    second: String,
}

#[derive(Reflect)]
struct SameNameDifferentLocation {
    #[query("id")]
    query_id: String,
    #[header("id")]
    header_id: String,
}

#[derive(Reflect)]
struct TwoLocations {
    #[header("X-Token")]
    #[query("token")]
    token: String,
}

#[derive(Reflect)]
struct Filter {
    name: String,
}

#[derive(Reflect)]
struct StructParam {
    #[query("filter")]
    filter: Filter,
}

#[derive(Reflect)]
struct Renamed {
    #[serde(rename = "pageToken")]
    #[query]
    page_token: Option<String>,
}

#[derive(Reflect)]
struct Deprecated {
    #[query("old")]
    #[oai("deprecated;description=Use `new` instead")]
    old: Option<String>,
}

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn path_and_query_parameters() {
    let params = parameters::<GetItem>();
    assert_eq!(params.len(), 2);

    let id = &params[0];
    assert_eq!(id.name, "id");
    assert_eq!(id.location, Location::Path);
    assert!(id.required);

    let q = &params[1];
    assert_eq!(q.name, "q");
    assert_eq!(q.location, Location::Query);
    assert!(!q.required);
}

#[test]
fn path_parameters_are_always_required() {
    let params = parameters::<OptionalPath>();
    assert!(params[0].required);
    assert_eq!(params[0].name, "slug");
}

#[test]
fn only_location_tagged_fields_become_parameters() {
    let params = parameters::<Search>();
    let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["limit", "tag", "X-Request-Id", "session", "filter"]);
}

#[test]
fn constraints_apply_to_parameter_schemas() {
    let params = parameters::<Search>();
    let limit = serde_json::to_value(find(&params, "limit")).unwrap();
    assert_eq!(
        limit,
        json!({
            "name": "limit",
            "in": "query",
            "required": false,
            "schema": {
                "type": "integer",
                "format": "int32",
                "minimum": 1,
                "maximum": 100,
                "default": 20
            }
        })
    );
}

#[test]
fn serialization_hints_are_carried() {
    let params = parameters::<Search>();
    let tag = find(&params, "tag");
    assert_eq!(tag.explode, Some(false));
    assert_eq!(tag.style.as_deref(), Some("form"));
    let schema = tag.schema.as_inline().unwrap();
    assert_eq!(schema.schema_type, Some(SchemaType::Array));
    assert_eq!(schema.item_type(), Some(SchemaType::String));
    assert!(tag.required);
}

#[test]
fn header_and_cookie_locations() {
    let params = parameters::<Search>();
    let header = find(&params, "X-Request-Id");
    assert_eq!(header.location, Location::Header);
    assert!(header.required);
    let cookie = find(&params, "session");
    assert_eq!(cookie.location, Location::Cookie);
    assert!(!cookie.required);
}

#[test]
fn doc_comment_describes_the_parameter() {
    let params = parameters::<Search>();
    assert_eq!(find(&params, "filter").description.as_deref(), Some("Free-text filter."));
}

#[test]
fn description_and_deprecation_sit_on_the_parameter() {
    let params = parameters::<Deprecated>();
    let old = &params[0];
    assert_eq!(old.deprecated, Some(true));
    assert_eq!(old.description.as_deref(), Some("Use `new` instead"));
    let schema = old.schema.as_inline().unwrap();
    assert!(schema.deprecated.is_none());
    assert!(schema.description.is_none());
}

#[test]
fn embedded_parameters_are_promoted() {
    let params = parameters::<ListUsers>();
    let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["org", "page", "per_page"]);
}

#[test]
fn unnamed_tag_falls_back_to_wire_name() {
    let params = parameters::<Renamed>();
    assert_eq!(params[0].name, "pageToken");
}

#[test]
fn duplicate_name_and_location_is_rejected() {
    let mut g = Generator::new(OpenApiConfig::default());
    let err = g.generate_parameters(&Duplicated::type_info()).unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateParameter { ref name, location: Location::Query } if name == "q"
    ));
}

#[test]
fn same_name_in_different_locations_is_fine() {
    let params = parameters::<SameNameDifferentLocation>();
    assert_eq!(params.len(), 2);
}

#[test]
fn highest_priority_location_wins() {
    let params = parameters::<TwoLocations>();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, "token");
    assert_eq!(params[0].location, Location::Query);
}

#[test]
fn struct_typed_parameters_are_rejected() {
    let mut g = Generator::new(OpenApiConfig::default());
    let err = g.generate_parameters(&StructParam::type_info()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedParameterType { location: Location::Query, .. }));
}

#[test]
fn non_struct_types_have_no_parameters() {
    assert!(parameters::<String>().is_empty());
    assert!(parameters::<Vec<u8>>().is_empty());
    assert!(parameters::<()>().is_empty());
}

#[test]
fn parameters_do_not_register_components() {
    let mut g = Generator::new(OpenApiConfig::default());
    g.generate_parameters(&Search::type_info()).unwrap();
    assert!(g.components().is_empty());
}
