pub use autobuilder_core::{
    config, descriptor, error, rules, selector, synthesizer, tooling,
};
pub use autobuilder_derive::AutoBuilder;

pub mod prelude {
    pub use autobuilder_core::{
        ConstructorDescriptor, FieldDescriptor, QualifiedName, RuleEngine, TypeDescriptor,
        Visibility, synthesize,
    };
    pub use autobuilder_derive::AutoBuilder;
}
