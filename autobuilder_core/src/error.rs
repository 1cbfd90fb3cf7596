use crate::rules::RuleViolation;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutobuilderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in file {file}: {message}")]
    ParseError { file: PathBuf, message: String },

    #[error("Syn parse error: {0}")]
    SynParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file autobuilder.toml not found (searched upwards from {search_start:?})")]
    ConfigNotFound { search_start: PathBuf },

    #[error(transparent)]
    RuleViolation(#[from] RuleViolation),

    #[error("Invalid field type '{ty}' for field '{field}': {message}")]
    InvalidFieldType {
        field: String,
        ty: String,
        message: String,
    },

    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("Workspace scan error: {0}")]
    WorkspaceScan(String),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Invalid regex pattern: {0}")]
    Regex(String),
}

impl From<syn::Error> for AutobuilderError {
    fn from(err: syn::Error) -> Self {
        AutobuilderError::SynParse(err.to_string())
    }
}

impl From<regex::Error> for AutobuilderError {
    fn from(err: regex::Error) -> Self {
        AutobuilderError::Regex(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AutobuilderError>;

impl AutobuilderError {
    pub fn parse_error(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        AutobuilderError::ParseError {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AutobuilderError::Config(message.into())
    }

    pub fn duplicate_definition(message: impl Into<String>) -> Self {
        AutobuilderError::DuplicateDefinition(message.into())
    }

    pub fn workspace_scan(message: impl Into<String>) -> Self {
        AutobuilderError::WorkspaceScan(message.into())
    }

    /// Returns the rule violation carried by this error, if any.
    pub fn as_rule_violation(&self) -> Option<&RuleViolation> {
        match self {
            AutobuilderError::RuleViolation(violation) => Some(violation),
            _ => None,
        }
    }
}
