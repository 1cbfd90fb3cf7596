use super::{Rule, RuleKind, RuleViolation};
use crate::descriptor::TypeDescriptor;

/// Abstract types cannot be instantiated by the generated `build()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAbstractType;

impl Rule for NoAbstractType {
    fn kind(&self) -> RuleKind {
        RuleKind::NoAbstractType
    }

    fn evaluate(&self, ty: &TypeDescriptor) -> Result<(), RuleViolation> {
        if ty.is_abstract() {
            return Err(RuleViolation::new(
                self.kind(),
                &ty.name,
                format!(
                    "The type {} is abstract. You can't derive AutoBuilder for abstract types",
                    ty.name
                ),
            ));
        }
        Ok(())
    }
}
