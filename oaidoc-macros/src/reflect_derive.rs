use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::ParseStream;
use syn::{parse_quote, Attribute, Data, DeriveInput, Expr, Fields, LitBool, LitStr, Token};

use crate::crate_path::oaidoc_core_path;
use crate::rename::RenameRule;

const LOCATIONS: [&str; 4] = ["path", "query", "header", "cookie"];

/// Container-level options.
#[derive(Default)]
struct ContainerAttrs {
    name: Option<String>,
    custom: bool,
    rename_all: Option<RenameRule>,
}

/// Everything the derive learns about one field, as `(key, value)` tags.
struct FieldTags {
    tags: Vec<(String, String)>,
    embedded: bool,
}

pub fn expand(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_inner(input) {
        Ok(ts) => ts.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_inner(mut input: DeriveInput) -> syn::Result<TokenStream> {
    let krate = oaidoc_core_path();
    let container = parse_container(&input.attrs)?;

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Reflect cannot be derived for types with lifetime parameters",
        ));
    }
    let type_params: Vec<_> = input.generics.type_params().map(|p| p.ident.clone()).collect();
    {
        let where_clause = input.generics.make_where_clause();
        for param in &type_params {
            where_clause
                .predicates
                .push(parse_quote!(#param: #krate::reflect::Reflect));
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = if container.custom {
        quote! { #krate::reflect::TypeInfo::custom::<Self>() }
    } else {
        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(f) => &f.named,
                _ => {
                    return Err(syn::Error::new_spanned(
                        name,
                        "Reflect can only be derived for structs with named fields",
                    ))
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Reflect can only be derived for structs; use #[oai(custom)] with a CustomSchemaProvider impl for other types",
                ))
            }
        };

        let mut entries = Vec::new();
        for field in fields {
            let Some(ident) = &field.ident else { continue };
            let field_name = ident.unraw().to_string();
            let ty = &field.ty;
            let parsed = parse_field(&field.attrs, &field_name, container.rename_all)?;

            let tags = parsed.tags.iter().map(|(k, v)| quote!((#k, #v)));
            let with_tags = if parsed.tags.is_empty() {
                quote!()
            } else {
                quote!(.with_tags(&[#(#tags),*]))
            };
            let embedded = if parsed.embedded { quote!(.embedded()) } else { quote!() };

            entries.push(quote! {
                #krate::reflect::FieldInfo::new(
                    #field_name,
                    <#ty as #krate::reflect::Reflect>::type_info,
                )
                #with_tags
                #embedded
            });
        }
        quote! {
            #krate::reflect::TypeInfo::structure::<Self>(vec![#(#entries),*])
        }
    };

    let default_name = container
        .name
        .as_ref()
        .map(|n| quote!(.with_default_name(#n)));

    Ok(quote! {
        impl #impl_generics #krate::reflect::Reflect for #name #ty_generics #where_clause {
            fn type_info() -> #krate::reflect::TypeInfo {
                #body
                #default_name
            }
        }
    })
}

fn parse_container(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();
    for attr in attrs {
        if attr.path().is_ident("oai") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.name = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("custom") {
                    out.custom = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `name = \"...\"` or `custom`"))
                }
            })?;
        } else if attr.path().is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    let lit = rename_value(&meta)?;
                    let Some(lit) = lit else { return Ok(()) };
                    out.rename_all = Some(RenameRule::parse(&lit.value()).ok_or_else(|| {
                        syn::Error::new_spanned(&lit, "unknown rename_all rule")
                    })?);
                    Ok(())
                } else {
                    skip_meta_value(&meta)
                }
            })?;
        }
    }
    Ok(out)
}

fn parse_field(
    attrs: &[Attribute],
    field_name: &str,
    rename_all: Option<RenameRule>,
) -> syn::Result<FieldTags> {
    let mut oai = None;
    let mut locations = Vec::new();
    let mut rename = None;
    let mut skip = false;
    let mut embedded = false;
    let mut doc = Vec::new();

    for attr in attrs {
        let path = attr.path();
        if path.is_ident("oai") {
            oai = Some(parse_oai(attr)?);
        } else if let Some(loc) = LOCATIONS.iter().find(|l| path.is_ident(l)) {
            // All are emitted; the generator honors the highest-priority one.
            locations.extend(parse_location(attr, loc)?);
        } else if path.is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(lit) = rename_value(&meta)? {
                        rename = Some(lit.value());
                    }
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if meta.path.is_ident("flatten") {
                    embedded = true;
                    Ok(())
                } else {
                    skip_meta_value(&meta)
                }
            })?;
        } else if path.is_ident("doc") {
            if let syn::Meta::NameValue(nv) = &attr.meta {
                if let Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(s),
                    ..
                }) = &nv.value
                {
                    let line = s.value();
                    let line = line.trim();
                    if !line.is_empty() {
                        doc.push(line.to_string());
                    }
                }
            }
        }
    }

    let mut tags = Vec::new();
    match oai {
        Some(raw) => tags.push(("oai".to_string(), raw)),
        None if skip => tags.push(("oai".to_string(), "-".to_string())),
        None => {}
    }
    tags.extend(locations);
    let wire = rename.or_else(|| rename_all.map(|rule| rule.apply(field_name)));
    if let Some(wire) = wire {
        tags.push(("rename".to_string(), wire));
    }
    if !doc.is_empty() {
        tags.push(("doc".to_string(), doc.join(" ")));
    }
    Ok(FieldTags { tags, embedded })
}

/// `#[oai("...")]` or `#[oai = "..."]`.
fn parse_oai(attr: &Attribute) -> syn::Result<String> {
    match &attr.meta {
        syn::Meta::List(_) => Ok(attr.parse_args::<LitStr>()?.value()),
        syn::Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(s),
                ..
            }) => Ok(s.value()),
            other => Err(syn::Error::new_spanned(other, "expected a string literal")),
        },
        syn::Meta::Path(_) => Err(syn::Error::new_spanned(
            attr,
            "expected #[oai(\"key=value;...\")]",
        )),
    }
}

/// `#[query]`, `#[query("q")]`, `#[query(name = "q", explode = false, style = "form")]`.
fn parse_location(attr: &Attribute, location: &str) -> syn::Result<Vec<(String, String)>> {
    let mut name = String::new();
    let mut extra = Vec::new();
    if let syn::Meta::List(_) = &attr.meta {
        attr.parse_args_with(|input: ParseStream| {
            if input.peek(LitStr) {
                name = input.parse::<LitStr>()?.value();
                if !input.is_empty() {
                    input.parse::<Token![,]>()?;
                }
            }
            while !input.is_empty() {
                let key: syn::Ident = input.parse()?;
                input.parse::<Token![=]>()?;
                match key.to_string().as_str() {
                    "name" => name = input.parse::<LitStr>()?.value(),
                    "explode" => {
                        let v: LitBool = input.parse()?;
                        extra.push(("explode".to_string(), v.value.to_string()));
                    }
                    "style" => {
                        let v: LitStr = input.parse()?;
                        extra.push(("style".to_string(), v.value()));
                    }
                    _ => {
                        return Err(syn::Error::new_spanned(
                            key,
                            "expected `name`, `explode` or `style`",
                        ))
                    }
                }
                if !input.is_empty() {
                    input.parse::<Token![,]>()?;
                }
            }
            Ok(())
        })?;
    }
    let mut tags = vec![(location.to_string(), name)];
    tags.extend(extra);
    Ok(tags)
}

/// Value of `rename = "x"` or the `serialize` half of
/// `rename(serialize = "x", deserialize = "y")`.
fn rename_value(meta: &syn::meta::ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse()?));
    }
    let mut out = None;
    meta.parse_nested_meta(|inner| {
        let lit: LitStr = inner.value()?.parse()?;
        if inner.path.is_ident("serialize") {
            out = Some(lit);
        }
        Ok(())
    })?;
    Ok(out)
}

/// Consume a serde option this derive does not care about.
fn skip_meta_value(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: TokenStream = content.parse()?;
    }
    Ok(())
}
