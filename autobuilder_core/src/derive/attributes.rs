use proc_macro2::Ident;
use syn::{Attribute, Expr, ExprLit, Lit, Meta, punctuated::Punctuated, spanned::Spanned};
use tracing::{debug, trace};

/// Type-level `#[builder(...)]` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeAttributes {
    /// Associated no-argument function used instead of `Default`.
    pub constructor: Option<String>,
    /// Explicitly declares the `Default` constructor.
    pub default: bool,
}

impl TypeAttributes {
    pub fn declares_constructor(&self) -> bool {
        self.constructor.is_some() || self.default
    }
}

fn builder_metas(attr: &Attribute) -> Result<Punctuated<Meta, syn::Token![,]>, syn::Error> {
    attr.parse_args_with(Punctuated::parse_terminated)
        .map_err(|err| {
            syn::Error::new(
                attr.span(),
                format!(
                    "Failed to parse builder attribute: {}\n\nExample usage:\n#[builder(ignore)]\n#[builder(constructor = \"new\")]",
                    err
                ),
            )
        })
}

pub fn parse_type_attributes(attrs: &[Attribute]) -> Result<TypeAttributes, syn::Error> {
    let mut parsed = TypeAttributes::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("builder")) {
        debug!("Found type-level builder attribute");
        for meta in builder_metas(attr)? {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("constructor") => {
                    let Expr::Lit(ExprLit {
                        lit: Lit::Str(lit), ..
                    }) = &nv.value
                    else {
                        return Err(syn::Error::new(
                            nv.value.span(),
                            "The 'constructor' parameter must be a string literal.\n\nExample: #[builder(constructor = \"new\")]",
                        ));
                    };
                    let name = lit.value();
                    if syn::parse_str::<Ident>(&name).is_err() {
                        return Err(syn::Error::new(
                            lit.span(),
                            format!("'{}' is not a valid function name", name),
                        ));
                    }
                    trace!("Builder constructor: {}", name);
                    parsed.constructor = Some(name);
                }
                Meta::Path(path) if path.is_ident("default") => {
                    parsed.default = true;
                }
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "Unknown builder attribute on type.\n\nValid parameters are: constructor = \"...\", default",
                    ));
                }
            }
        }
    }

    if parsed.constructor.is_some() && parsed.default {
        return Err(syn::Error::new(
            attrs
                .iter()
                .find(|attr| attr.path().is_ident("builder"))
                .map(|attr| attr.span())
                .unwrap_or_else(proc_macro2::Span::call_site),
            "Use either #[builder(default)] or #[builder(constructor = \"...\")], not both",
        ));
    }

    Ok(parsed)
}

/// Whether a field carries `#[builder(ignore)]`.
pub fn parse_field_ignore(attrs: &[Attribute]) -> Result<bool, syn::Error> {
    let mut ignored = false;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("builder")) {
        for meta in builder_metas(attr)? {
            match &meta {
                Meta::Path(path) if path.is_ident("ignore") => ignored = true,
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "Unknown builder attribute on field.\n\nValid parameters are: ignore",
                    ));
                }
            }
        }
    }

    Ok(ignored)
}
