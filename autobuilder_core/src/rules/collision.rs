use super::{Rule, RuleKind, RuleViolation};
use crate::descriptor::TypeDescriptor;
use crate::selector::FieldSelector;
use crate::synthesizer::{FACTORY_METHOD, TERMINAL_METHOD};

/// Setters share the namespace of the generated factory and terminal
/// methods, and Rust has no overloading to tell them apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMethodNameCollision;

impl Rule for NoMethodNameCollision {
    fn kind(&self) -> RuleKind {
        RuleKind::NoMethodNameCollision
    }

    fn evaluate(&self, ty: &TypeDescriptor) -> Result<(), RuleViolation> {
        for field in FieldSelector::select(ty) {
            let name = field.name.trim_start_matches("r#");
            if let Some(method) = [FACTORY_METHOD, TERMINAL_METHOD]
                .into_iter()
                .find(|method| *method == name)
            {
                return Err(RuleViolation::new(
                    self.kind(),
                    &ty.name,
                    format!(
                        "The field '{}' of {} collides with the generated '{}' method",
                        field.name, ty.name, method
                    ),
                ));
            }
        }
        Ok(())
    }
}
