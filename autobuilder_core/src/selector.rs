//! Chooses which fields of a type get a builder slot and setter.

use crate::descriptor::{FieldDescriptor, FieldModifier, TypeDescriptor};
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// Why a field was left out of the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionReason {
    Ignored,
    Static,
    Final,
    Private,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ExclusionReason::Ignored => "marked #[builder(ignore)]",
            ExclusionReason::Static => "static",
            ExclusionReason::Final => "final",
            ExclusionReason::Private => "private",
        };
        f.write_str(reason)
    }
}

pub struct FieldSelector;

impl FieldSelector {
    /// Eligible fields in declaration order.
    pub fn select(ty: &TypeDescriptor) -> Vec<&FieldDescriptor> {
        ty.fields
            .iter()
            .filter(|field| match Self::exclusion_reason(field) {
                Some(reason) => {
                    trace!("Skipping field {}.{}: {}", ty.name, field.name, reason);
                    false
                }
                None => true,
            })
            .collect()
    }

    pub fn exclusion_reason(field: &FieldDescriptor) -> Option<ExclusionReason> {
        if field.excluded {
            Some(ExclusionReason::Ignored)
        } else if field.has_modifier(FieldModifier::Static) {
            Some(ExclusionReason::Static)
        } else if field.has_modifier(FieldModifier::Final) {
            Some(ExclusionReason::Final)
        } else if field.visibility.is_restricted() {
            Some(ExclusionReason::Private)
        } else {
            None
        }
    }
}
