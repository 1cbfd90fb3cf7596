//! Builds a [`TypeDescriptor`] from a parsed Rust struct.

use super::attributes::{parse_field_ignore, parse_type_attributes};
use crate::descriptor::{
    ConstructorDescriptor, FieldDescriptor, QualifiedName, TypeDescriptor, Visibility,
};
use quote::ToTokens;
use std::collections::BTreeSet;
use syn::{Data, DeriveInput, Fields, spanned::Spanned};
use tracing::{debug, trace};

/// Maps Rust visibility onto the descriptor model.
///
/// Inherited (and `pub(self)`) visibility is the private case; every other
/// restricted form stays inside the crate and counts as package visibility.
pub fn map_visibility(vis: &syn::Visibility) -> Visibility {
    match vis {
        syn::Visibility::Public(_) => Visibility::Public,
        syn::Visibility::Restricted(restricted) if restricted.path.is_ident("self") => {
            Visibility::Private
        }
        syn::Visibility::Restricted(_) => Visibility::Package,
        syn::Visibility::Inherited => Visibility::Private,
    }
}

/// Describes a struct for builder generation.
///
/// Constructors come from `#[builder(constructor = "..")]` / `#[builder(default)]`
/// when present, otherwise from `discovered`. The derive macro cannot see impl
/// blocks and passes `None`, in which case the type's `Default` impl is assumed.
pub fn describe(
    input: &DeriveInput,
    package: &str,
    discovered: Option<Vec<ConstructorDescriptor>>,
) -> Result<TypeDescriptor, syn::Error> {
    let ident = &input.ident;
    debug!("Describing struct {}", ident);

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            ident.span(),
            format!(
                "AutoBuilder does not support generic types; remove the type parameters from {}",
                ident
            ),
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Some(&named.named),
            Fields::Unit => None,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new(
                    ident.span(),
                    format!(
                        "AutoBuilder only supports structs with named fields.\n\nExample of a valid struct:\n\nstruct {} {{\n    name: String,\n}}",
                        ident
                    ),
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                ident.span(),
                "AutoBuilder can only be used on structs",
            ));
        }
    };

    let type_attributes = parse_type_attributes(&input.attrs)?;
    let constructors = if type_attributes.declares_constructor() {
        match type_attributes.constructor {
            Some(name) => vec![ConstructorDescriptor::associated(name, Visibility::Package)],
            None => vec![ConstructorDescriptor::default_trait()],
        }
    } else {
        discovered.unwrap_or_else(|| vec![ConstructorDescriptor::default_trait()])
    };
    trace!("{} constructors for {}", constructors.len(), ident);

    let mut descriptor = TypeDescriptor::new(QualifiedName::new(package, ident.to_string()))
        .with_visibility(map_visibility(&input.vis));
    descriptor.constructors = constructors;

    for field in fields.into_iter().flatten() {
        let Some(field_ident) = field.ident.as_ref() else {
            return Err(syn::Error::new(
                field.span(),
                "Internal error: Field identifier is missing. This should not happen with named fields.",
            ));
        };
        let mut described = FieldDescriptor::new(
            field_ident.to_string(),
            field.ty.to_token_stream().to_string(),
        )
        .with_visibility(map_visibility(&field.vis));
        if parse_field_ignore(&field.attrs)? {
            described = described.excluded();
        }
        trace!(
            "Field {} ({}) visibility {:?} excluded {}",
            described.name, described.ty, described.visibility, described.excluded
        );
        descriptor.fields.push(described);
    }

    let mut seen = BTreeSet::new();
    for field in &descriptor.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(syn::Error::new(
                ident.span(),
                format!("Field '{}' is declared more than once", field.name),
            ));
        }
    }

    Ok(descriptor)
}
