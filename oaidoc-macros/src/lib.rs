extern crate proc_macro;
use proc_macro::TokenStream;

pub(crate) mod crate_path;
pub(crate) mod reflect_derive;
pub(crate) mod rename;

/// Derive macro that implements `Reflect`, emitting one field descriptor per
/// named field.
///
/// # Container attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[oai(name = "Pet")]` | Component name used instead of the derived one |
/// | `#[oai(custom)]` | Defer to the type's `CustomSchemaProvider` impl |
/// | `#[serde(rename_all = "...")]` | Wire names follow serde's renaming rule |
///
/// # Field attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[oai("minLength=1;maxLength=64")]` | Constraint annotation; `#[oai("-")]` drops the field |
/// | `#[path]`, `#[path("id")]` | Path parameter, optionally renamed |
/// | `#[query("q", explode = false, style = "form")]` | Query parameter with serialization hints |
/// | `#[header("X-Request-Id")]` | Header parameter |
/// | `#[cookie("session")]` | Cookie parameter |
/// | `#[serde(rename = "...")]` | Wire name of the property |
/// | `#[serde(skip)]` | Same as `#[oai("-")]` unless an `#[oai]` is present |
/// | `#[serde(flatten)]` | Promote the field's own properties into this struct |
///
/// Doc comments on fields become property descriptions.
///
/// # Example
///
/// ```ignore
/// use oaidoc::prelude::*;
///
/// #[derive(Reflect)]
/// #[serde(rename_all = "camelCase")]
/// pub struct ListPets {
///     #[query("limit")]
///     #[oai("minimum=1;maximum=100")]
///     page_size: Option<u32>,
///     #[header("X-Tenant")]
///     tenant: String,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(oai, path, query, header, cookie, serde))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    reflect_derive::expand(input)
}
