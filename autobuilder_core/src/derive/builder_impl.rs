use super::descriptor_parser::describe;
use crate::synthesizer::synthesize;
use proc_macro2::TokenStream;
use syn::DeriveInput;
use tracing::{error, info};

/// Expansion of `#[derive(AutoBuilder)]`.
pub fn generate_builder_impl(input: DeriveInput) -> TokenStream {
    let ident = input.ident.clone();
    info!("Generating builder implementation for: {}", ident);

    let descriptor = match describe(&input, "", None) {
        Ok(descriptor) => descriptor,
        Err(err) => return err.to_compile_error(),
    };

    let source = match synthesize(&descriptor) {
        Ok(source) => source,
        Err(violation) => {
            return syn::Error::new(ident.span(), violation.message).to_compile_error();
        }
    };

    match source.to_tokens() {
        Ok(tokens) => {
            info!("Successfully generated {} for {}", source.name, ident);
            tokens
        }
        Err(err) => {
            error!("Failed to render builder for {}: {}", ident, err);
            syn::Error::new(ident.span(), err.to_string()).to_compile_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn expands_to_builder_struct_and_impl() {
        let input: DeriveInput = parse_quote! {
            #[derive(Default)]
            pub struct Person {
                pub(crate) name: String,
                pub(crate) age: i32,
                #[builder(ignore)]
                pub(crate) id: i64,
            }
        };

        let file: syn::File = syn::parse2(generate_builder_impl(input)).unwrap();
        assert_eq!(file.items.len(), 2);
        match &file.items[0] {
            syn::Item::Struct(item) => {
                assert_eq!(item.ident, "PersonBuilder");
                assert_eq!(item.fields.len(), 2);
            }
            other => panic!(
                "expected builder struct, got {}",
                quote::ToTokens::to_token_stream(other)
            ),
        }
    }

    #[test]
    fn collision_becomes_compile_error() {
        let input: DeriveInput = parse_quote! {
            pub struct Job {
                pub build: u32,
            }
        };
        let expanded = generate_builder_impl(input).to_string();
        assert!(expanded.contains("compile_error"));
        assert!(expanded.contains("collides with the generated"));
    }
}
