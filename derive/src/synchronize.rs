//! Implementation of the `Synchronize` derive macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse2, parse_quote, Data, DeriveInput, Error, Field, Fields, Index, Member, Result};

/// Implements `Synchronize` for a struct by visiting each field in order.
pub fn synchronize(input: TokenStream) -> Result<TokenStream> {
    let input = parse2::<DeriveInput>(input)?;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(Error::new_spanned(
                data.enum_token,
                "Synchronize can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(Error::new_spanned(
                data.union_token,
                "Synchronize can only be derived for structs",
            ));
        }
    };

    let mut generics = input.generics.clone();
    let generic = !generics.params.is_empty();
    let mut visits = Vec::new();
    for (member, field) in members(fields) {
        if is_skipped(field)? {
            continue;
        }
        visits.push(quote! {
            ::cyclesim::Synchronize::sync(&mut self.#member);
        });
        // Concrete field types are checked where they are used; generic
        // shapes need the bound spelled out.
        if generic {
            let ty = &field.ty;
            generics
                .make_where_clause()
                .predicates
                .push(parse_quote! { #ty: ::cyclesim::Synchronize });
        }
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::cyclesim::Synchronize for #ident #ty_generics #where_clause {
            fn sync(&mut self) {
                #(#visits)*
            }
        }
    })
}

/// Pairs each field with the member expression used to reach it.
pub(crate) fn members(fields: &Fields) -> Vec<(Member, &Field)> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(Index::from(i)),
            };
            (member, field)
        })
        .collect()
}

fn is_skipped(field: &Field) -> Result<bool> {
    let mut skip = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("sync") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unknown sync attribute, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}
