//! Where generated code finds the `reflect` module.

use proc_macro2::{Span, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;

/// `::oaidoc` when the facade is a dependency, else `::oaidoc_core` (under
/// whatever name the user gave it).
///
/// Both crates alias themselves with `extern crate self`, so the absolute
/// path also works when the derive is used inside them.
pub fn oaidoc_core_path() -> TokenStream {
    [("oaidoc", "oaidoc"), ("oaidoc-core", "oaidoc_core")]
        .into_iter()
        .find_map(|(package, own)| crate_name(package).ok().map(|found| absolute(found, own)))
        .unwrap_or_else(|| quote!(::oaidoc_core))
}

fn absolute(found: FoundCrate, own: &str) -> TokenStream {
    let name = match &found {
        FoundCrate::Itself => own,
        FoundCrate::Name(name) => name.as_str(),
    };
    let ident = syn::Ident::new(name, Span::call_site());
    quote!(::#ident)
}
