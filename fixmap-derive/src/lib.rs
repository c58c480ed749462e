/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # FixMap Derive
//!
//! Procedural macros for the FixMap field container.
//!
//! ## Macros
//!
//! - `#[derive(FixField)]` - Implements the `FixField` trait for a newtype

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitInt, LitStr, Path, parse_macro_input};

/// Derives the `FixField` trait for a single-field tuple struct.
///
/// The wrapped type becomes `FixField::Value` and must implement
/// `FieldConvert`.
///
/// # Attributes
///
/// - `#[fix(tag = N)]` - The field tag number (required, > 0)
/// - `#[fix(name = "Name")]` - The dictionary name (defaults to the type name)
/// - `#[fix(crate = "path")]` - Path to the core crate (defaults to `::fixmap_core`)
///
/// # Example
///
/// ```ignore
/// #[derive(FixField)]
/// #[fix(tag = 37, name = "OrderID")]
/// pub struct OrderId(String);
/// ```
#[proc_macro_derive(FixField, attributes(fix))]
pub fn derive_fix_field(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_fix_field(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Values read from `#[fix(...)]`.
struct FieldAttrs {
    tag: u32,
    name: Option<String>,
    krate: Option<Path>,
}

fn parse_field_attrs(input: &DeriveInput) -> syn::Result<FieldAttrs> {
    let mut tag = None;
    let mut name = None;
    let mut krate = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("fix")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("tag") {
                let lit: LitInt = meta.value()?.parse()?;
                let value: u32 = lit.base10_parse()?;
                if value == 0 {
                    return Err(syn::Error::new_spanned(lit, "tag must be positive"));
                }
                tag = Some(value);
            } else if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                name = Some(lit.value());
            } else if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                krate = Some(lit.parse()?);
            } else {
                return Err(meta.error("unsupported fix attribute"));
            }
            Ok(())
        })?;
    }

    let tag = tag.ok_or_else(|| {
        syn::Error::new_spanned(&input.ident, "missing #[fix(tag = N)] attribute")
    })?;
    Ok(FieldAttrs { tag, name, krate })
}

fn expand_fix_field(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let value_ty = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => &fields.unnamed[0].ty,
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "FixField can only be derived for a single-field tuple struct",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "FixField can only be derived for a single-field tuple struct",
            ));
        }
    };

    let attrs = parse_field_attrs(input)?;
    let tag = attrs.tag;
    let name = attrs.name.unwrap_or_else(|| ident.to_string());
    let krate = attrs
        .krate
        .map_or_else(|| quote!(::fixmap_core), |path| quote!(#path));
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::FixField for #ident #ty_generics #where_clause {
            const TAG: u32 = #tag;
            const NAME: &'static str = #name;
            type Value = #value_ty;

            #[inline]
            fn new(value: Self::Value) -> Self {
                Self(value)
            }

            #[inline]
            fn value(&self) -> &Self::Value {
                &self.0
            }

            #[inline]
            fn into_value(self) -> Self::Value {
                self.0
            }
        }
    })
}
