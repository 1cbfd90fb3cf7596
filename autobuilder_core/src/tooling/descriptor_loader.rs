//! Loads type descriptors from TOML and JSON files.
//!
//! A descriptor file holds a `types` array:
//!
//! ```toml
//! [[types]]
//! package = "com.example"
//! name = "Person"
//! constructors = [{ visibility = "public" }]
//!
//! [[types.fields]]
//! name = "name"
//! type = "String"
//! ```

use super::DiscoveredType;
use crate::descriptor::TypeDescriptor;
use crate::error::{AutobuilderError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct DescriptorFile {
    #[serde(default)]
    types: Vec<TypeDescriptor>,
}

/// Parses one descriptor file, picking the format from its extension.
pub fn load_descriptor_file(path: &Path) -> Result<Vec<TypeDescriptor>> {
    let contents = fs::read_to_string(path)?;
    let file: DescriptorFile = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&contents)
            .map_err(|e| AutobuilderError::parse_error(path, e.to_string()))?,
        _ => toml::from_str(&contents)
            .map_err(|e| AutobuilderError::parse_error(path, e.to_string()))?,
    };

    for ty in &file.types {
        if let Some(field) = ty.duplicate_field_name() {
            return Err(AutobuilderError::duplicate_definition(format!(
                "field '{}' is declared more than once in {} ({})",
                field,
                ty.name,
                path.display()
            )));
        }
    }

    debug!("Loaded {} descriptors from {:?}", file.types.len(), path);
    Ok(file.types)
}

/// Loads every `.toml` and `.json` file under `dir`, in file-name order.
pub fn load_descriptors(dir: &Path) -> Result<Vec<DiscoveredType>> {
    info!("Loading descriptors from {:?}", dir);
    if !dir.exists() {
        warn!("Descriptor directory {:?} does not exist", dir);
        return Ok(Vec::new());
    }

    let mut discovered = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| AutobuilderError::workspace_scan(e.to_string()))?;
        let path = entry.path();
        let is_descriptor = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "toml" || ext == "json");
        if !entry.file_type().is_file() || !is_descriptor {
            continue;
        }

        discovered.extend(
            load_descriptor_file(path)?
                .into_iter()
                .map(|descriptor| DiscoveredType {
                    descriptor,
                    origin: path.to_path_buf(),
                }),
        );
    }

    Ok(discovered)
}
