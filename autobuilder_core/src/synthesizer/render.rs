//! Rust rendering of a [`GeneratedSource`].

use super::{BuilderField, BuilderMethod, ConstructorCall, GeneratedSource};
use crate::descriptor::Visibility;
use crate::error::{AutobuilderError, Result};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use tracing::{debug, trace};

fn ident(name: &str) -> Result<Ident> {
    syn::parse_str::<Ident>(name).map_err(|_| AutobuilderError::InvalidIdentifier(name.to_string()))
}

fn field_type(field: &BuilderField) -> Result<syn::Type> {
    syn::parse_str::<syn::Type>(&field.ty).map_err(|e| AutobuilderError::InvalidFieldType {
        field: field.name.clone(),
        ty: field.ty.clone(),
        message: e.to_string(),
    })
}

fn visibility_tokens(visibility: Visibility) -> TokenStream {
    match visibility {
        Visibility::Public => quote! { pub },
        Visibility::Package | Visibility::Protected => quote! { pub(crate) },
        Visibility::Private => quote! {},
    }
}

impl GeneratedSource {
    /// Builder struct plus its inherent impl, ready to be placed next to
    /// the target type.
    pub fn to_tokens(&self) -> Result<TokenStream> {
        debug!("Rendering {} to tokens", self.name);
        let builder = ident(&self.name.name)?;
        let target = ident(&self.target.name)?;
        let vis = visibility_tokens(self.visibility);
        let doc = format!(" Fluent builder for [`{}`].", self.target.name);

        let mut names = Vec::with_capacity(self.fields.len());
        let mut slots = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let name = ident(&field.name)?;
            let ty = field_type(field)?;
            slots.push(quote! { #name: ::core::option::Option<#ty> });
            names.push(name);
        }

        let mut methods = Vec::with_capacity(self.methods.len());
        for method in &self.methods {
            trace!("Rendering method {}", method.name());
            methods.push(render_method(method, &target, &names)?);
        }

        Ok(quote! {
            #[doc = #doc]
            #vis struct #builder {
                #(#slots,)*
            }

            impl #builder {
                #(#methods)*
            }
        })
    }

    /// Formatted builder items, for placement next to the target type.
    pub fn to_pretty_source(&self) -> Result<String> {
        let file: syn::File = syn::parse2(self.to_tokens()?)?;
        Ok(prettyplease::unparse(&file))
    }

    /// Glob import of the target's module, so a builder written to a
    /// separate file resolves the target and its field types.
    ///
    /// `None` when the package is empty or is not a Rust module path
    /// (descriptor files may use foreign names such as `com.example`).
    pub fn package_import(&self) -> Option<TokenStream> {
        let package = self.target.package.as_str();
        if package.is_empty() {
            return None;
        }
        match syn::parse_str::<syn::Path>(package) {
            Ok(path) => Some(quote! {
                #[allow(unused_imports)]
                use #path::*;
            }),
            Err(_) => {
                debug!("Package {} is not a module path, no import emitted", package);
                None
            }
        }
    }

    /// Formatted standalone file: package import followed by the builder.
    pub fn to_file_source(&self) -> Result<String> {
        let import = self.package_import();
        let items = self.to_tokens()?;
        let file: syn::File = syn::parse2(quote! {
            #import
            #items
        })?;
        Ok(prettyplease::unparse(&file))
    }
}

fn render_method(method: &BuilderMethod, target: &Ident, slots: &[Ident]) -> Result<TokenStream> {
    let tokens = match method {
        BuilderMethod::Factory { name } => {
            let name = ident(name)?;
            quote! {
                pub fn #name() -> Self {
                    Self {
                        #(#slots: ::core::option::Option::None,)*
                    }
                }
            }
        }
        BuilderMethod::Setter { name, field } => {
            let name = ident(name)?;
            let slot = ident(&field.name)?;
            let ty = field_type(field)?;
            quote! {
                pub fn #name(mut self, #slot: #ty) -> Self {
                    self.#slot = ::core::option::Option::Some(#slot);
                    self
                }
            }
        }
        BuilderMethod::Terminal {
            name,
            constructor,
            assignments,
            ..
        } => {
            let name = ident(name)?;
            let construct = match constructor {
                ConstructorCall::Default => {
                    quote! { <#target as ::core::default::Default>::default() }
                }
                ConstructorCall::Associated(function) => {
                    let function = ident(function)?;
                    quote! { #target::#function() }
                }
            };

            if assignments.is_empty() {
                quote! {
                    pub fn #name(self) -> #target {
                        #construct
                    }
                }
            } else {
                let slots = assignments
                    .iter()
                    .map(|slot| ident(slot))
                    .collect::<Result<Vec<_>>>()?;
                quote! {
                    pub fn #name(self) -> #target {
                        let mut instance = #construct;
                        #(
                            if let ::core::option::Option::Some(value) = self.#slots {
                                instance.#slots = value;
                            }
                        )*
                        instance
                    }
                }
            }
        }
    };
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use crate::descriptor::{ConstructorDescriptor, FieldDescriptor, QualifiedName, TypeDescriptor, Visibility};
    use crate::error::AutobuilderError;
    use crate::synthesizer::synthesize;

    fn person() -> TypeDescriptor {
        TypeDescriptor::new(QualifiedName::new("crate::bean", "Person"))
            .with_field(FieldDescriptor::new("name", "String"))
            .with_field(FieldDescriptor::new("age", "i32"))
            .with_field(FieldDescriptor::new("tags", "Vec < String >"))
            .with_constructor(ConstructorDescriptor::default_trait())
            .with_visibility(Visibility::Public)
    }

    #[test]
    fn rendered_source_parses_and_is_stable() {
        let source = synthesize(&person()).unwrap();
        let first = source.to_pretty_source().unwrap();
        let second = source.to_pretty_source().unwrap();
        assert_eq!(first, second);

        let file = syn::parse_file(&first).expect("generated source must parse");
        assert_eq!(file.items.len(), 2);
        assert!(first.contains("pub struct PersonBuilder"));
        assert!(first.contains("pub fn builder() -> Self"));
        assert!(first.contains("pub fn name(mut self, name: String) -> Self"));
        assert!(first.contains("pub fn build(self) -> Person"));
        assert!(first.contains("<Person as ::core::default::Default>::default()"));
    }

    #[test]
    fn setters_are_rendered_in_field_order() {
        let rendered = synthesize(&person()).unwrap().to_pretty_source().unwrap();
        let positions: Vec<usize> = ["fn name(", "fn age(", "fn tags("]
            .iter()
            .map(|needle| rendered.find(needle).expect("setter present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn private_target_gets_private_builder() {
        let ty = person().with_visibility(Visibility::Private);
        let rendered = synthesize(&ty).unwrap().to_pretty_source().unwrap();
        assert!(rendered.contains("\nstruct PersonBuilder"));
        assert!(!rendered.contains("pub struct PersonBuilder"));
    }

    #[test]
    fn package_target_gets_crate_visible_builder() {
        let ty = person().with_visibility(Visibility::Package);
        let rendered = synthesize(&ty).unwrap().to_pretty_source().unwrap();
        assert!(rendered.contains("pub(crate) struct PersonBuilder"));
    }

    #[test]
    fn associated_constructor_is_called_by_name() {
        let ty = TypeDescriptor::new(QualifiedName::new("", "Session"))
            .with_field(FieldDescriptor::new("user", "String"))
            .with_constructor(ConstructorDescriptor::associated("open", Visibility::Public));
        let rendered = synthesize(&ty).unwrap().to_pretty_source().unwrap();
        assert!(rendered.contains("let mut instance = Session::open();"));
    }

    #[test]
    fn empty_builder_renders_without_mutable_instance() {
        let ty = TypeDescriptor::new(QualifiedName::new("", "Marker"))
            .with_constructor(ConstructorDescriptor::default_trait());
        let rendered = synthesize(&ty).unwrap().to_pretty_source().unwrap();
        assert!(syn::parse_file(&rendered).is_ok());
        assert!(!rendered.contains("let mut instance"));
    }

    #[test]
    fn raw_identifier_fields_render() {
        let ty = TypeDescriptor::new(QualifiedName::new("", "Token"))
            .with_field(FieldDescriptor::new("r#type", "String"))
            .with_constructor(ConstructorDescriptor::default_trait());
        let rendered = synthesize(&ty).unwrap().to_pretty_source().unwrap();
        assert!(rendered.contains("pub fn r#type(mut self, r#type: String) -> Self"));
    }

    #[test]
    fn file_source_imports_the_target_package() {
        let rendered = synthesize(&person()).unwrap().to_file_source().unwrap();
        assert!(rendered.contains("use crate::bean::*;"));
        let file = syn::parse_file(&rendered).expect("generated file must parse");
        assert_eq!(file.items.len(), 3);
        assert!(matches!(file.items[0], syn::Item::Use(_)));
    }

    #[test]
    fn file_source_skips_import_for_empty_or_foreign_package() {
        let root = TypeDescriptor::new(QualifiedName::new("", "Marker"))
            .with_constructor(ConstructorDescriptor::default_trait());
        let rendered = synthesize(&root).unwrap().to_file_source().unwrap();
        assert!(!rendered.contains("use "));

        let foreign = TypeDescriptor::new(QualifiedName::new("com.example", "Marker"))
            .with_constructor(ConstructorDescriptor::default_trait());
        let source = synthesize(&foreign).unwrap();
        assert!(source.package_import().is_none());
        assert!(syn::parse_file(&source.to_file_source().unwrap()).is_ok());
    }

    #[test]
    fn invalid_field_type_is_reported() {
        let ty = TypeDescriptor::new(QualifiedName::new("", "Broken"))
            .with_field(FieldDescriptor::new("value", "Vec<"))
            .with_constructor(ConstructorDescriptor::default_trait());
        let err = synthesize(&ty).unwrap().to_tokens().unwrap_err();
        assert!(matches!(err, AutobuilderError::InvalidFieldType { .. }));
    }

    #[test]
    fn keyword_field_name_is_an_invalid_identifier() {
        let ty = TypeDescriptor::new(QualifiedName::new("", "Broken"))
            .with_field(FieldDescriptor::new("match", "u8"))
            .with_constructor(ConstructorDescriptor::default_trait());
        let err = synthesize(&ty).unwrap().to_tokens().unwrap_err();
        assert!(matches!(err, AutobuilderError::InvalidIdentifier(name) if name == "match"));
    }
}
