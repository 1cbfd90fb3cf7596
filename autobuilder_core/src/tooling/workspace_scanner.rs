//! Workspace scanning for structs marked for builder generation.

use super::DiscoveredType;
use crate::derive::descriptor_parser::{describe, map_visibility};
use crate::descriptor::{ConstructorDescriptor, ParameterDescriptor};
use crate::error::{AutobuilderError, Result};
use quote::ToTokens;
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use syn::{
    Attribute, DeriveInput, FnArg, ImplItem, Item, ItemImpl, ItemStruct, Pat, ReturnType, Type,
    punctuated::Punctuated,
};
use tracing::{debug, info, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Finds marked structs in Rust sources and turns them into descriptors.
#[derive(Debug, Clone)]
pub struct WorkspaceScanner {
    root: PathBuf,
    markers: Vec<String>,
}

impl WorkspaceScanner {
    pub fn new(root: impl Into<PathBuf>, markers: Vec<String>) -> Self {
        Self {
            root: root.into(),
            markers,
        }
    }

    /// Walks every `.rs` file under the root in file-name order.
    pub fn scan(&self) -> Result<Vec<DiscoveredType>> {
        info!("Scanning {:?} for builder types", self.root);
        if !self.root.exists() {
            return Err(AutobuilderError::workspace_scan(format!(
                "scan path {:?} does not exist",
                self.root
            )));
        }

        let mut discovered = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry));

        for entry in walker {
            let entry = entry.map_err(|e| AutobuilderError::workspace_scan(e.to_string()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "rs") {
                continue;
            }

            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Error reading file {:?}: {}", path, e);
                    continue;
                }
            };

            let module = module_path_for(&self.root, path);
            trace!("Scanning {:?} as module {}", path, module);
            let syntax = match syn::parse_file(&content) {
                Ok(syntax) => syntax,
                Err(e) => {
                    warn!("Error parsing file {:?}: {}", path, e);
                    continue;
                }
            };

            discovered.extend(self.scan_items(&syntax.items, &module, path)?);
        }

        info!("Found {} builder types", discovered.len());
        Ok(discovered)
    }

    /// Scans already-parsed items belonging to `module`.
    pub fn scan_items(
        &self,
        items: &[Item],
        module: &str,
        file: &Path,
    ) -> Result<Vec<DiscoveredType>> {
        let mut marked = Vec::new();
        let mut constructors = HashMap::new();
        collect(items, module, &self.markers, &mut marked, &mut constructors);

        marked
            .into_iter()
            .map(|(item, module)| {
                let key = (module.clone(), item.ident.to_string());
                let discovered = constructors.remove(&key).unwrap_or_default();
                let input = DeriveInput::from(item);
                let descriptor = describe(&input, &module, Some(discovered))
                    .map_err(|e| AutobuilderError::parse_error(file, e.to_string()))?;
                debug!(
                    "Discovered {} with {} fields and {} constructors",
                    descriptor.name,
                    descriptor.fields.len(),
                    descriptor.constructors.len()
                );
                Ok(DiscoveredType {
                    descriptor,
                    origin: file.to_path_buf(),
                })
            })
            .collect()
    }
}

type ConstructorMap = HashMap<(String, String), Vec<ConstructorDescriptor>>;

fn collect(
    items: &[Item],
    module: &str,
    markers: &[String],
    marked: &mut Vec<(ItemStruct, String)>,
    constructors: &mut ConstructorMap,
) {
    for item in items {
        match item {
            Item::Struct(item_struct) => {
                let derives = derived_names(&item_struct.attrs);
                if derives.iter().any(|name| name == "Default") {
                    constructors
                        .entry((module.to_string(), item_struct.ident.to_string()))
                        .or_default()
                        .push(ConstructorDescriptor::default_trait());
                }
                if derives.iter().any(|name| markers.contains(name)) {
                    trace!("Found marked struct {}", item_struct.ident);
                    marked.push((item_struct.clone(), module.to_string()));
                }
            }
            Item::Impl(item_impl) => {
                if let Some(type_name) = self_type_name(item_impl) {
                    let found = impl_constructors(item_impl, &type_name);
                    if !found.is_empty() {
                        constructors
                            .entry((module.to_string(), type_name))
                            .or_default()
                            .extend(found);
                    }
                }
            }
            Item::Mod(item_mod) => {
                if let Some((_, nested)) = &item_mod.content {
                    let nested_module = format!("{}::{}", module, item_mod.ident);
                    collect(nested, &nested_module, markers, marked, constructors);
                }
            }
            _ => {}
        }
    }
}

/// Last path segment of every entry in `#[derive(...)]`.
fn derived_names(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<syn::Path, syn::Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .filter_map(|path| path.segments.last().map(|segment| segment.ident.to_string()))
        .collect()
}

fn self_type_name(item_impl: &ItemImpl) -> Option<String> {
    match item_impl.self_ty.as_ref() {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

fn returns_self(output: &ReturnType, type_name: &str) -> bool {
    match output {
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Path(type_path) => type_path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Self" || segment.ident == type_name),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

fn impl_constructors(item_impl: &ItemImpl, type_name: &str) -> Vec<ConstructorDescriptor> {
    if let Some((_, trait_path, _)) = &item_impl.trait_ {
        let is_default = trait_path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Default");
        return if is_default {
            vec![ConstructorDescriptor::default_trait()]
        } else {
            Vec::new()
        };
    }

    item_impl
        .items
        .iter()
        .filter_map(|item| match item {
            ImplItem::Fn(function) => Some(function),
            _ => None,
        })
        .filter(|function| function.sig.receiver().is_none())
        .filter(|function| returns_self(&function.sig.output, type_name))
        .map(|function| ConstructorDescriptor {
            name: Some(function.sig.ident.to_string()),
            params: function
                .sig
                .inputs
                .iter()
                .filter_map(|input| match input {
                    FnArg::Typed(typed) => Some(ParameterDescriptor {
                        name: match typed.pat.as_ref() {
                            Pat::Ident(pat) => pat.ident.to_string(),
                            other => other.to_token_stream().to_string(),
                        },
                        ty: typed.ty.to_token_stream().to_string(),
                    }),
                    FnArg::Receiver(_) => None,
                })
                .collect(),
            visibility: map_visibility(&function.vis),
        })
        .collect()
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "target"
}

/// Module path of a source file, following Cargo's `src/` layout.
pub fn module_path_for(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let components: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let start = components
        .iter()
        .rposition(|part| part == "src")
        .map(|index| index + 1)
        .unwrap_or(0);

    let mut segments = vec!["crate".to_string()];
    let tail = &components[start.min(components.len())..];
    for (index, part) in tail.iter().enumerate() {
        let is_file = index + 1 == tail.len();
        if !is_file {
            segments.push(part.clone());
            continue;
        }
        let stem = part.trim_end_matches(".rs");
        let is_root = start > 0 && index == 0 && (stem == "lib" || stem == "main");
        if stem != "mod" && !is_root {
            segments.push(stem.to_string());
        }
    }

    segments.join("::")
}
