use autobuilder_core::derive::builder_impl;
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Generates a fluent `<Type>Builder` for a struct with named fields.
///
/// The builder gets a `builder()` factory, one consuming setter per eligible
/// field and a `build()` method. Private fields and fields marked
/// `#[builder(ignore)]` are skipped.
///
/// The instance is created through `Default` unless the struct says otherwise:
///
/// ```rust,ignore
/// #[derive(AutoBuilder)]
/// #[builder(constructor = "new")]
/// pub struct Session {
///     pub(crate) user: String,
/// }
/// ```
#[proc_macro_derive(AutoBuilder, attributes(builder))]
pub fn autobuilder_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    builder_impl::generate_builder_impl(input).into()
}
