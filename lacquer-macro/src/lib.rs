//! Procedural macros for use in Lacquer.

use proc_macro2::{Span, TokenStream};

use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, FieldsNamed, Ident, LitStr};

/// Derives the `ConfigSection` trait.
///
/// The trait must be in scope where the derive is used.
///
/// ## Example
///
/// ```ignore
/// #[derive(ConfigSection)]
/// pub struct ThemeConfig {
///     #[key] // exposed as "border_width"
///     border_width: i32,
///     #[key(rename = "title-scale")] // exposed as "title-scale"
///     title_scale: f64,
///
///     #[subsection] // exposed as a subsection named "palette"
///     palette: Palette,
///
///     cached: u32 // fields with no attribute are not exposed.
/// }
/// ```
#[proc_macro_derive(ConfigSection, attributes(key, subsection))]
pub fn configsection_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_configsection(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// A field exposed through the section, along with the name it is exposed under.
struct Exposed<'f> {
    ident: &'f Ident,
    name: String,
}

fn expand_configsection(input: DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(datastruct) = input.data else {
        return Err(syn::Error::new(
            Span::call_site(), "ConfigSection can only be derived on structs"))
    };

    let Fields::Named(fields) = datastruct.fields else {
        return Err(syn::Error::new(
            Span::call_site(), "ConfigSection cannot be derived on structs with unnamed fields"))
    };

    let keys = exposed_fields(&fields, "key")?;
    let subsections = exposed_fields(&fields, "subsection")?;

    let key_arms = lookup_arms(&keys);
    let subsection_arms = lookup_arms(&subsections);
    let key_names = keys.iter().map(|k| k.name.as_str());

    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let tokens = quote! {
        impl #impl_generics ConfigSection for #name #ty_generics #where_clause {
            fn get_key(&self, name: &str) -> Option<&dyn ::std::any::Any> {
                #key_arms
            }

            fn subsection(&self, name: &str) -> Option<&dyn ConfigSection> {
                #subsection_arms
            }

            fn keys(&self) -> &'static [&'static str] {
                &[#(#key_names),*]
            }
        }
    };

    Ok(tokens)
}

fn lookup_arms(exposed: &[Exposed<'_>]) -> TokenStream {
    if exposed.is_empty() {
        return quote! { { let _ = name; None } }
    }

    let arms = exposed.iter().map(|e| {
        let ident = e.ident;
        let name = &e.name;
        quote! { #name => Some(&self.#ident), }
    });

    quote! {
        match name {
            #(#arms)*
            _ => None
        }
    }
}

/// Collects every field tagged with `#[helper]` or `#[helper(rename = "...")]`.
fn exposed_fields<'f>(fields: &'f FieldsNamed, helper: &str) -> syn::Result<Vec<Exposed<'f>>> {
    let mut ret = Vec::new();

    for field in fields.named.iter() {
        let Some(ident) = field.ident.as_ref() else {
            continue
        };

        for attr in field.attrs.iter().filter(|a| a.path().is_ident(helper)) {
            let mut name = ident.to_string();

            // bare `#[key]` has no arguments to parse
            if !matches!(attr.meta, syn::Meta::Path(_)) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        let lit: LitStr = meta.value()?.parse()?;
                        name = lit.value();
                        Ok(())
                    } else {
                        Err(meta.error("unsupported attribute argument, expected `rename`"))
                    }
                })?;
            }

            ret.push(Exposed { ident, name });
        }
    }

    Ok(ret)
}
