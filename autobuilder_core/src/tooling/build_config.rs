//! Build-time configuration for builder generation.

use crate::config::{AutobuilderConfig, FailurePolicy, SourceKind};
use crate::error::AutobuilderError;
use std::env;
use std::path::{Path, PathBuf};

/// Resolved configuration for a generation pass.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Root path to scan for Rust types.
    pub scan_path: PathBuf,

    /// Directory holding TOML/JSON descriptor files.
    pub descriptor_path: PathBuf,

    /// Output directory for generated builder files.
    pub output_path: PathBuf,

    /// Derive names that mark a struct for generation.
    pub markers: Vec<String>,

    /// Where types are discovered.
    pub source: SourceKind,

    /// Behaviour on rule violations.
    pub failure_policy: FailurePolicy,

    /// Run the per-type pipeline in parallel.
    pub parallel: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::from_config(&AutobuilderConfig::default(), Path::new("."))
    }
}

impl BuildConfig {
    /// Creates a new BuildConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from autobuilder.toml.
    ///
    /// Searches for autobuilder.toml starting from `CARGO_MANIFEST_DIR` (if set)
    /// or the current directory, walking upward to the filesystem root.
    ///
    /// # Errors
    ///
    /// Returns `AutobuilderError::ConfigNotFound` if no autobuilder.toml is found.
    /// Returns `AutobuilderError::Config` if the file cannot be parsed.
    pub fn from_toml() -> Result<Self, AutobuilderError> {
        dotenv::dotenv().ok();
        let start_dir = match env::var("CARGO_MANIFEST_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::current_dir()?,
        };

        let path = AutobuilderConfig::find_config_file(&start_dir)?;
        Self::from_toml_path(path)
    }

    /// Loads configuration from a specific autobuilder.toml file.
    pub fn from_toml_path(path: impl AsRef<Path>) -> Result<Self, AutobuilderError> {
        let path = path.as_ref();
        let config = AutobuilderConfig::from_path(path)?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Ok(Self::from_config(&config, base_dir))
    }

    /// Resolves relative paths from the config file's directory.
    pub fn from_config(config: &AutobuilderConfig, base_dir: &Path) -> Self {
        Self {
            scan_path: base_dir.join(&config.source.scan_path),
            descriptor_path: base_dir.join(&config.source.descriptor_path),
            output_path: base_dir.join(&config.output.path),
            markers: config.general.markers.clone(),
            source: config.general.source,
            failure_policy: config.driver.failure_policy,
            parallel: config.driver.parallel,
        }
    }

    /// Creates a builder for programmatic configuration.
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder::new()
    }
}

/// Builder for creating BuildConfig programmatically.
#[derive(Debug, Clone, Default)]
pub struct BuildConfigBuilder {
    config: BuildConfig,
}

impl BuildConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: BuildConfig::default(),
        }
    }

    /// Sets the scan path for finding Rust types.
    pub fn scan_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.scan_path = path.into();
        self
    }

    /// Sets the directory holding descriptor files.
    pub fn descriptor_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.descriptor_path = path.into();
        self
    }

    /// Sets the output path for generated files.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Adds a derive marker.
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.config.markers.push(marker.into());
        self
    }

    pub fn source(mut self, source: SourceKind) -> Self {
        self.config.source = source;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Builds the final BuildConfig.
    pub fn build(self) -> BuildConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert_eq!(config.markers, vec!["AutoBuilder".to_string()]);
        assert_eq!(config.source, SourceKind::Rust);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert!(config.parallel);
        assert_eq!(config.output_path, PathBuf::from("./src/generated/"));
    }

    #[test]
    fn test_builder_custom_settings() {
        let config = BuildConfig::builder()
            .scan_path("/custom/scan")
            .output_path("/custom/output")
            .marker("Buildable")
            .source(SourceKind::Descriptors)
            .failure_policy(FailurePolicy::Continue)
            .parallel(false)
            .build();

        assert_eq!(config.scan_path, PathBuf::from("/custom/scan"));
        assert_eq!(config.output_path, PathBuf::from("/custom/output"));
        assert_eq!(config.markers.len(), 2);
        assert_eq!(config.source, SourceKind::Descriptors);
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
        assert!(!config.parallel);
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("autobuilder.toml");
        fs::write(
            &path,
            r#"
[source]
scan_path = "crates"

[output]
path = "gen"
"#,
        )
        .unwrap();

        let config = BuildConfig::from_toml_path(&path).expect("Should parse successfully");
        assert_eq!(config.scan_path, dir.path().join("crates"));
        assert_eq!(config.output_path, dir.path().join("gen"));
        assert_eq!(config.descriptor_path, dir.path().join("./descriptors"));
    }
}
