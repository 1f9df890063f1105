//! Implementation of the `ModuleState` derive macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse2, parse_quote, Data, DeriveInput, Error, Field, Member, Result};

use crate::synchronize::members;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Group {
    Input,
    Output,
    Private,
}

impl Group {
    const ALL: [Group; 3] = [Group::Input, Group::Output, Group::Private];

    fn name(self) -> &'static str {
        match self {
            Group::Input => "input",
            Group::Output => "output",
            Group::Private => "private",
        }
    }
}

/// Implements `ModuleState` by synchronizing the tagged state groups in
/// input, output, private order.
pub fn module_state(input: TokenStream) -> Result<TokenStream> {
    let input = parse2::<DeriveInput>(input)?;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "ModuleState can only be derived for structs",
            ));
        }
    };

    let mut tagged: Vec<(Group, Member, &Field)> = Vec::new();
    for (member, field) in members(fields) {
        if let Some(group) = group_of(field)? {
            tagged.push((group, member, field));
        }
    }

    if tagged.is_empty() {
        return Err(Error::new_spanned(
            &input.ident,
            "module has no state: tag at least one field with #[input], #[output] or #[private]",
        ));
    }

    let mut generics = input.generics.clone();
    let generic = !generics.params.is_empty();
    let mut visits = Vec::new();
    for group in Group::ALL {
        for (_, member, field) in tagged.iter().filter(|(g, _, _)| *g == group) {
            visits.push(quote! {
                ::cyclesim::Synchronize::sync(&mut self.#member);
            });
            if generic {
                let ty = &field.ty;
                generics
                    .make_where_clause()
                    .predicates
                    .push(parse_quote! { #ty: ::cyclesim::Synchronize });
            }
        }
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::cyclesim::ModuleState for #ident #ty_generics #where_clause {
            fn commit(&mut self) {
                #(#visits)*
            }
        }
    })
}

fn group_of(field: &Field) -> Result<Option<Group>> {
    let mut found: Option<Group> = None;
    for attr in &field.attrs {
        let Some(group) = Group::ALL
            .into_iter()
            .find(|g| attr.path().is_ident(g.name()))
        else {
            continue;
        };
        attr.meta.require_path_only()?;
        if let Some(previous) = found {
            return Err(Error::new_spanned(
                attr,
                format!(
                    "field is already tagged #[{}]; a field belongs to one state group",
                    previous.name()
                ),
            ));
        }
        found = Some(group);
    }
    Ok(found)
}
