//! Structural rules a type must satisfy before a builder is generated.
//!
//! The [`RuleEngine`] runs an ordered chain of [`Rule`]s and stops at the
//! first rejection. A successful run yields a [`ValidatedType`], the only
//! input the synthesizer accepts.

mod abstract_type;
mod collision;
mod constructor;

pub use abstract_type::NoAbstractType;
pub use collision::NoMethodNameCollision;
pub use constructor::RequiresAccessibleNoArgConstructor;

use crate::descriptor::{ConstructorDescriptor, QualifiedName, TypeDescriptor};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, trace};

/// Identity of a built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleKind {
    NoAbstractType,
    RequiresAccessibleNoArgConstructor,
    NoMethodNameCollision,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::NoAbstractType => "NoAbstractType",
            RuleKind::RequiresAccessibleNoArgConstructor => "RequiresAccessibleNoArgConstructor",
            RuleKind::NoMethodNameCollision => "NoMethodNameCollision",
        };
        f.write_str(name)
    }
}

/// A rejected type: which rule failed, for which type, and why.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct RuleViolation {
    pub rule: RuleKind,
    pub type_name: QualifiedName,
    pub message: String,
}

impl RuleViolation {
    pub fn new(rule: RuleKind, type_name: &QualifiedName, message: impl Into<String>) -> Self {
        Self {
            rule,
            type_name: type_name.clone(),
            message: message.into(),
        }
    }
}

/// A stateless structural check over a whole type.
pub trait Rule: Send + Sync {
    fn kind(&self) -> RuleKind;

    fn evaluate(&self, ty: &TypeDescriptor) -> Result<(), RuleViolation>;
}

/// Proof that a descriptor passed the rule chain.
///
/// Only [`RuleEngine::validate`] can produce one. It also pins down the
/// constructor the generated terminal method will call.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedType<'a> {
    descriptor: &'a TypeDescriptor,
    constructor: &'a ConstructorDescriptor,
}

impl<'a> ValidatedType<'a> {
    pub fn descriptor(&self) -> &'a TypeDescriptor {
        self.descriptor
    }

    pub fn constructor(&self) -> &'a ConstructorDescriptor {
        self.constructor
    }
}

/// Ordered, fail-fast rule chain.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::with_rules(vec![
            Box::new(NoAbstractType),
            Box::new(RequiresAccessibleNoArgConstructor),
            Box::new(NoMethodNameCollision),
        ])
    }
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.kinds())
            .finish()
    }
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Rule identities in evaluation order.
    pub fn kinds(&self) -> Vec<RuleKind> {
        self.rules.iter().map(|rule| rule.kind()).collect()
    }

    /// Runs every rule in order and surfaces the first rejection.
    pub fn validate<'a>(&self, ty: &'a TypeDescriptor) -> Result<ValidatedType<'a>, RuleViolation> {
        debug!("Validating {} against {} rules", ty.name, self.rules.len());

        for rule in &self.rules {
            trace!("Evaluating rule {} for {}", rule.kind(), ty.name);
            if let Err(violation) = rule.evaluate(ty) {
                error!("Rule {} rejected {}: {}", rule.kind(), ty.name, violation);
                return Err(violation);
            }
        }

        // A custom chain may omit the constructor rule; the terminal method
        // still needs a constructor to call.
        let constructor = ty
            .accessible_no_arg_constructor()
            .ok_or_else(|| RequiresAccessibleNoArgConstructor::violation(ty))?;

        debug!("{} passed validation", ty.name);
        Ok(ValidatedType {
            descriptor: ty,
            constructor,
        })
    }
}
