// AutoBuilder - structural validation and builder type synthesis

// Descriptor model and pipeline
pub mod descriptor;
pub mod rules;
pub mod selector;
pub mod synthesizer;

// Common modules
pub mod config;
pub mod derive;
pub mod error;

// Build-time discovery and file output
#[cfg(feature = "tooling")]
pub mod tooling;

// Re-export commonly used items for convenience
pub use descriptor::{
    ConstructorDescriptor, FieldDescriptor, FieldModifier, ParameterDescriptor, QualifiedName,
    TypeDescriptor, TypeModifier, Visibility,
};
pub use error::{AutobuilderError, Result};
pub use rules::{Rule, RuleEngine, RuleKind, RuleViolation, ValidatedType};
pub use selector::{ExclusionReason, FieldSelector};
pub use synthesizer::{BuilderMethod, BuilderSynthesizer, GeneratedSource, synthesize};
