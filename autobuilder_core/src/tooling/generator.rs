//! Builder generation for build-time usage.

use super::{BuildConfig, DiscoveredType, WorkspaceScanner, load_descriptors};
use crate::config::{FailurePolicy, SourceKind};
use crate::descriptor::QualifiedName;
use crate::error::{AutobuilderError, Result};
use crate::rules::{RuleEngine, RuleViolation};
use crate::synthesizer::{BuilderSynthesizer, GeneratedSource};
use crate::selector::FieldSelector;
use convert_case::{Case, Casing};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Information about a generated file.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFile {
    /// The path where the file was written.
    pub path: PathBuf,
    /// The number of bytes written.
    pub bytes_written: usize,
    /// The builder type the file defines.
    pub builder: QualifiedName,
}

/// Report of the generation process.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    /// List of files that were generated.
    pub files: Vec<GeneratedFile>,
    /// Number of types discovered.
    pub types_processed: usize,
    /// Types skipped under [`FailurePolicy::Continue`].
    pub violations: Vec<RuleViolation>,
}

impl GenerationReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Outcome of running the pipeline on one discovered type.
#[derive(Debug)]
pub struct Synthesized {
    pub origin: PathBuf,
    pub outcome: std::result::Result<GeneratedSource, RuleViolation>,
}

/// Discovers annotated types and writes one builder file per type.
pub struct BuilderGenerator {
    config: BuildConfig,
    engine: RuleEngine,
}

impl BuilderGenerator {
    /// Creates a new BuilderGenerator with the default rule chain.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_engine(config, RuleEngine::default())
    }

    pub fn with_engine(config: BuildConfig, engine: RuleEngine) -> Self {
        Self { config, engine }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Collects descriptors from the configured source.
    ///
    /// Two types with the same qualified name are a `DuplicateDefinition`.
    pub fn discover(&self) -> Result<Vec<DiscoveredType>> {
        let discovered = match self.config.source {
            SourceKind::Rust => {
                WorkspaceScanner::new(&self.config.scan_path, self.config.markers.clone()).scan()?
            }
            SourceKind::Descriptors => load_descriptors(&self.config.descriptor_path)?,
        };

        let mut seen = BTreeMap::new();
        for ty in &discovered {
            if let Some(previous) = seen.insert(&ty.descriptor.name, &ty.origin) {
                return Err(AutobuilderError::duplicate_definition(format!(
                    "type {} is defined in both {} and {}",
                    ty.descriptor.name,
                    previous.display(),
                    ty.origin.display()
                )));
            }
        }

        Ok(discovered)
    }

    /// Runs validation, selection and synthesis for every type.
    ///
    /// Results keep discovery order whether or not the pass runs in parallel.
    pub fn synthesize_all(&self, types: &[DiscoveredType]) -> Vec<Synthesized> {
        let run = |ty: &DiscoveredType| Synthesized {
            origin: ty.origin.clone(),
            outcome: self.synthesize_one(ty),
        };

        if self.config.parallel {
            types.par_iter().map(run).collect()
        } else {
            types.iter().map(run).collect()
        }
    }

    fn synthesize_one(
        &self,
        ty: &DiscoveredType,
    ) -> std::result::Result<GeneratedSource, RuleViolation> {
        let validated = self.engine.validate(&ty.descriptor)?;
        let eligible = FieldSelector::select(validated.descriptor());
        Ok(BuilderSynthesizer::generate(&validated, &eligible))
    }

    /// Validates every type without generating anything.
    pub fn check(&self, types: &[DiscoveredType]) -> Vec<RuleViolation> {
        let run = |ty: &DiscoveredType| self.engine.validate(&ty.descriptor).err();
        if self.config.parallel {
            types.par_iter().filter_map(run).collect()
        } else {
            types.iter().filter_map(run).collect()
        }
    }

    /// Discovers, synthesizes and writes all builders.
    pub fn generate_all(&self) -> Result<GenerationReport> {
        info!("Starting builder generation");
        let types = self.discover()?;
        let mut report = GenerationReport {
            types_processed: types.len(),
            ..GenerationReport::default()
        };

        let mut sources = Vec::new();
        for synthesized in self.synthesize_all(&types) {
            match synthesized.outcome {
                Ok(source) => sources.push((source, synthesized.origin)),
                Err(violation) => match self.config.failure_policy {
                    FailurePolicy::Abort => {
                        error!("Aborting generation: {}", violation);
                        return Err(violation.into());
                    }
                    FailurePolicy::Continue => {
                        warn!("Skipping {}: {}", violation.type_name, violation);
                        report.violations.push(violation);
                    }
                },
            }
        }

        let mut file_names = BTreeSet::new();
        let mut rendered = Vec::with_capacity(sources.len());
        for (source, origin) in &sources {
            let file_name = builder_file_name(&source.name);
            if !file_names.insert(file_name.clone()) {
                return Err(AutobuilderError::duplicate_definition(format!(
                    "{} maps to {}, which is already generated for another type",
                    source.name, file_name
                )));
            }
            rendered.push((file_name, &source.name, render_file(source, origin)?));
        }

        fs::create_dir_all(&self.config.output_path)?;
        for (file_name, builder, contents) in rendered {
            let path = self.config.output_path.join(&file_name);
            fs::write(&path, &contents)?;
            info!("{} written to {:?}", builder, path);
            report.files.push(GeneratedFile {
                path,
                bytes_written: contents.len(),
                builder: builder.clone(),
            });
        }

        info!(
            "Generation complete. Generated {} files, skipped {} types",
            report.files.len(),
            report.violations.len()
        );
        Ok(report)
    }
}

/// `PersonBuilder` becomes `person_builder.rs`.
pub fn builder_file_name(builder: &QualifiedName) -> String {
    format!("{}.rs", builder.name.to_case(Case::Snake))
}

fn render_file(source: &GeneratedSource, origin: &Path) -> Result<String> {
    debug!("Rendering {}", source.name);
    Ok(format!(
        "// @generated by autobuilder from {}. Do not edit.\n\n{}",
        origin.display(),
        source.to_file_source()?
    ))
}
