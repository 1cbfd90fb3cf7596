use super::{Rule, RuleKind, RuleViolation};
use crate::descriptor::TypeDescriptor;
use tracing::trace;

/// The generated factory must be able to create the target without
/// arguments. Any non-private zero-parameter constructor will do.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiresAccessibleNoArgConstructor;

impl RequiresAccessibleNoArgConstructor {
    pub(crate) fn violation(ty: &TypeDescriptor) -> RuleViolation {
        RuleViolation::new(
            RuleKind::RequiresAccessibleNoArgConstructor,
            &ty.name,
            format!(
                "The type {} must provide a non-private no-argument constructor",
                ty.name
            ),
        )
    }
}

impl Rule for RequiresAccessibleNoArgConstructor {
    fn kind(&self) -> RuleKind {
        RuleKind::RequiresAccessibleNoArgConstructor
    }

    fn evaluate(&self, ty: &TypeDescriptor) -> Result<(), RuleViolation> {
        trace!("{} declares {} constructors", ty.name, ty.constructors.len());
        match ty.accessible_no_arg_constructor() {
            Some(_) => Ok(()),
            None => Err(Self::violation(ty)),
        }
    }
}
