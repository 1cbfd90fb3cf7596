use crate::error::{AutobuilderError, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, trace, warn};

pub const CONFIG_FILE_NAME: &str = "autobuilder.toml";

/// Where the build driver discovers types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Rust structs carrying one of the configured derive markers
    #[default]
    Rust,
    /// TOML/JSON descriptor files
    Descriptors,
}

/// What the driver does when a type violates a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the whole pass on the first violation, writing nothing
    #[default]
    Abort,
    /// Report violating types and generate the rest
    Continue,
}

fn default_markers() -> Vec<String> {
    vec!["AutoBuilder".to_string()]
}

fn default_scan_path() -> String {
    ".".to_string()
}

fn default_descriptor_path() -> String {
    "./descriptors".to_string()
}

fn default_output_path() -> String {
    "./src/generated/".to_string()
}

fn default_parallel() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Derive names that mark a struct for builder generation
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,

    #[serde(default)]
    pub source: SourceKind,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            markers: default_markers(),
            source: SourceKind::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Root scanned for Rust sources
    #[serde(default = "default_scan_path")]
    pub scan_path: String,

    /// Directory holding descriptor files
    #[serde(default = "default_descriptor_path")]
    pub descriptor_path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            scan_path: default_scan_path(),
            descriptor_path: default_descriptor_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriverConfig {
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Run the per-type pipeline on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            parallel: default_parallel(),
        }
    }
}

/// Contents of `autobuilder.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AutobuilderConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub driver: DriverConfig,
}

impl AutobuilderConfig {
    /// Load configuration by searching for autobuilder.toml in the current
    /// directory and its ancestors.
    pub fn new() -> Result<(AutobuilderConfig, PathBuf)> {
        info!("Loading AutoBuilder configuration");
        dotenv::dotenv().ok();
        debug!("Environment variables loaded from .env if present");

        let config_path = Self::find_config_file(&env::current_dir()?)?;
        info!("Found configuration file at: {:?}", config_path);
        let config = Self::from_path(&config_path)?;
        Ok((config, config_path))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<AutobuilderConfig> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read configuration file {:?}: {}", path, e);
            AutobuilderError::from(e)
        })?;
        debug!("Configuration file size: {} bytes", contents.len());
        Self::parse(&contents)
    }

    /// Parses TOML and substitutes environment variables in path settings.
    pub fn parse(contents: &str) -> Result<AutobuilderConfig> {
        let mut config: AutobuilderConfig = toml::from_str(contents).map_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
            AutobuilderError::config(e.to_string())
        })?;

        config.source.scan_path = Self::substitute_env_vars(&config.source.scan_path)?;
        config.source.descriptor_path = Self::substitute_env_vars(&config.source.descriptor_path)?;
        config.output.path = Self::substitute_env_vars(&config.output.path)?;

        debug!(
            "Source: {:?}, markers: {:?}, failure policy: {:?}, parallel: {}",
            config.general.source,
            config.general.markers,
            config.driver.failure_policy,
            config.driver.parallel
        );
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Searches for `autobuilder.toml` starting from `start` and
    /// traversing up to the root.
    pub fn find_config_file(start: &Path) -> Result<PathBuf> {
        debug!("Starting config file search from: {:?}", start);

        for path in start.ancestors() {
            let config_path = path.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", config_path);
            if config_path.exists() {
                return Ok(config_path);
            }
        }

        Err(AutobuilderError::ConfigNotFound {
            search_start: start.to_path_buf(),
        })
    }

    /// Substitute environment variables in config strings
    /// Supports ${VAR_NAME:-default} syntax
    fn substitute_env_vars(value: &str) -> Result<String> {
        trace!("Substituting environment variables in: {}", value);
        let mut result = value.to_string();

        // Pattern to match ${VAR_NAME} or ${VAR_NAME:-default}
        let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")?;

        for cap in re.captures_iter(value) {
            let var_name = &cap[1];
            let default_value = cap.get(2).map(|m| m.as_str());

            let replacement = match env::var(var_name) {
                Ok(val) => {
                    debug!("Resolved environment variable: {}", var_name);
                    val
                }
                Err(_) => match default_value {
                    Some(default) => {
                        warn!(
                            "Environment variable {} not set, using default: {}",
                            var_name, default
                        );
                        default.to_string()
                    }
                    None => {
                        error!(
                            "Environment variable {} not set and no default provided",
                            var_name
                        );
                        return Err(AutobuilderError::EnvVarNotSet(var_name.to_string()));
                    }
                },
            };

            result = result.replace(&cap[0], &replacement);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AutobuilderConfig::parse("").unwrap();
        assert_eq!(config.general.markers, vec!["AutoBuilder".to_string()]);
        assert_eq!(config.general.source, SourceKind::Rust);
        assert_eq!(config.source.scan_path, ".");
        assert_eq!(config.output.path, "./src/generated/");
        assert_eq!(config.driver.failure_policy, FailurePolicy::Abort);
        assert!(config.driver.parallel);
    }

    #[test]
    fn sections_override_defaults() {
        let config = AutobuilderConfig::parse(
            r#"
            [general]
            markers = ["AutoBuilder", "Buildable"]
            source = "descriptors"

            [source]
            descriptor_path = "./schema"

            [driver]
            failure_policy = "continue"
            parallel = false
            "#,
        )
        .unwrap();

        assert_eq!(config.general.markers.len(), 2);
        assert_eq!(config.general.source, SourceKind::Descriptors);
        assert_eq!(config.source.descriptor_path, "./schema");
        assert_eq!(config.driver.failure_policy, FailurePolicy::Continue);
        assert!(!config.driver.parallel);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = AutobuilderConfig::parse("[driver\nparallel = 1").unwrap_err();
        assert!(matches!(err, AutobuilderError::Config(_)));
    }

    #[test]
    fn serialized_defaults_parse_back() {
        let text = AutobuilderConfig::default().to_toml_string().unwrap();
        assert!(text.contains("[general]"));
        let parsed = AutobuilderConfig::parse(&text).unwrap();
        assert_eq!(parsed.output.path, "./src/generated/");
    }

    #[test]
    fn find_config_walks_up_from_nested_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let found = AutobuilderConfig::find_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn substitute_env_vars_basic() {
        temp_env::with_var("AUTOBUILDER_TEST_OUT", Some("/tmp/out"), || {
            let result = AutobuilderConfig::substitute_env_vars("${AUTOBUILDER_TEST_OUT}/gen").unwrap();
            assert_eq!(result, "/tmp/out/gen");
        });
    }

    #[test]
    fn substitute_env_vars_uses_default() {
        temp_env::with_var_unset("AUTOBUILDER_TEST_UNSET", || {
            let result =
                AutobuilderConfig::substitute_env_vars("${AUTOBUILDER_TEST_UNSET:-./gen}").unwrap();
            assert_eq!(result, "./gen");
        });
    }

    #[test]
    fn substitute_env_vars_missing_returns_error() {
        temp_env::with_var_unset("AUTOBUILDER_TEST_MISSING", || {
            let err = AutobuilderConfig::substitute_env_vars("${AUTOBUILDER_TEST_MISSING}").unwrap_err();
            assert!(matches!(err, AutobuilderError::EnvVarNotSet(name) if name == "AUTOBUILDER_TEST_MISSING"));
        });
    }

    #[test]
    fn output_path_is_substituted_on_parse() {
        temp_env::with_var("AUTOBUILDER_TEST_GEN", Some("generated"), || {
            let config = AutobuilderConfig::parse("[output]\npath = \"./${AUTOBUILDER_TEST_GEN}/\"").unwrap();
            assert_eq!(config.output.path, "./generated/");
        });
    }
}
