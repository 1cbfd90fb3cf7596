//! Synthesis of the companion builder type.
//!
//! [`BuilderSynthesizer::generate`] is a pure transform from a validated
//! descriptor plus its eligible fields to a [`GeneratedSource`] model. The
//! model is rendered to Rust by the [`render`] module.

pub mod render;

use crate::descriptor::{ConstructorDescriptor, FieldDescriptor, QualifiedName, TypeDescriptor, Visibility};
use crate::rules::{RuleEngine, RuleViolation, ValidatedType};
use crate::selector::FieldSelector;
use serde::Serialize;
use tracing::{debug, info};

pub const BUILDER_SUFFIX: &str = "Builder";
pub const FACTORY_METHOD: &str = "builder";
pub const TERMINAL_METHOD: &str = "build";

/// Storage slot of the builder, mirroring one eligible field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// How the terminal method obtains a fresh target instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructorCall {
    Default,
    Associated(String),
}

impl From<&ConstructorDescriptor> for ConstructorCall {
    fn from(constructor: &ConstructorDescriptor) -> Self {
        match &constructor.name {
            Some(name) => ConstructorCall::Associated(name.clone()),
            None => ConstructorCall::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuilderMethod {
    /// Parameterless static method returning an empty builder.
    Factory { name: String },
    /// Stores one value and hands the same builder back.
    Setter { name: String, field: BuilderField },
    /// Constructs the target and copies every stored value into it.
    Terminal {
        name: String,
        returns: QualifiedName,
        constructor: ConstructorCall,
        assignments: Vec<String>,
    },
}

impl BuilderMethod {
    pub fn name(&self) -> &str {
        match self {
            BuilderMethod::Factory { name }
            | BuilderMethod::Setter { name, .. }
            | BuilderMethod::Terminal { name, .. } => name,
        }
    }
}

/// The synthesized builder type, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSource {
    pub name: QualifiedName,
    pub target: QualifiedName,
    pub visibility: Visibility,
    pub fields: Vec<BuilderField>,
    pub methods: Vec<BuilderMethod>,
}

impl GeneratedSource {
    pub fn factory(&self) -> Option<&BuilderMethod> {
        self.methods
            .iter()
            .find(|m| matches!(m, BuilderMethod::Factory { .. }))
    }

    pub fn terminal(&self) -> Option<&BuilderMethod> {
        self.methods
            .iter()
            .find(|m| matches!(m, BuilderMethod::Terminal { .. }))
    }

    pub fn setters(&self) -> impl Iterator<Item = &BuilderMethod> {
        self.methods
            .iter()
            .filter(|m| matches!(m, BuilderMethod::Setter { .. }))
    }
}

/// Deterministic builder synthesis. Performs no validation of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuilderSynthesizer;

impl BuilderSynthesizer {
    pub fn builder_name(target: &QualifiedName) -> QualifiedName {
        QualifiedName::new(
            target.package.clone(),
            format!("{}{}", target.name, BUILDER_SUFFIX),
        )
    }

    pub fn generate(validated: &ValidatedType<'_>, eligible: &[&FieldDescriptor]) -> GeneratedSource {
        let ty = validated.descriptor();
        let name = Self::builder_name(&ty.name);
        debug!(
            "Synthesizing {} with {} eligible fields",
            name,
            eligible.len()
        );

        let fields: Vec<BuilderField> = eligible
            .iter()
            .map(|field| BuilderField {
                name: field.name.clone(),
                ty: field.ty.clone(),
            })
            .collect();

        let mut methods = Vec::with_capacity(fields.len() + 2);
        methods.push(BuilderMethod::Factory {
            name: FACTORY_METHOD.to_string(),
        });
        methods.extend(fields.iter().map(|field| BuilderMethod::Setter {
            name: field.name.clone(),
            field: field.clone(),
        }));
        methods.push(BuilderMethod::Terminal {
            name: TERMINAL_METHOD.to_string(),
            returns: ty.name.clone(),
            constructor: ConstructorCall::from(validated.constructor()),
            assignments: fields.iter().map(|field| field.name.clone()).collect(),
        });

        GeneratedSource {
            name,
            target: ty.name.clone(),
            visibility: ty.visibility,
            fields,
            methods,
        }
    }
}

/// Validate, select and generate in one step.
pub fn synthesize(ty: &TypeDescriptor) -> Result<GeneratedSource, RuleViolation> {
    let validated = RuleEngine::default().validate(ty)?;
    let eligible = FieldSelector::select(ty);
    let source = BuilderSynthesizer::generate(&validated, &eligible);
    info!("Generated {} for {}", source.name, ty.name);
    Ok(source)
}
