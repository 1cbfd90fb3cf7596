//! Structural snapshot of one declared type, as handed to the generator.
//!
//! Descriptors are produced by whoever discovers the annotated types (the
//! derive macro, the workspace scanner or a descriptor file) and are never
//! mutated by the core.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Package-qualified type name. `package` is a `::` separated module path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    #[serde(default)]
    pub package: String,
    pub name: String,
}

impl QualifiedName {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.package, self.name)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    #[default]
    Package,
    Protected,
    Public,
}

impl Visibility {
    /// Private members are unreachable from a generated sibling type.
    pub fn is_restricted(self) -> bool {
        matches!(self, Visibility::Private)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldModifier {
    Static,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeModifier {
    Abstract,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub modifiers: BTreeSet<FieldModifier>,
    #[serde(default)]
    pub visibility: Visibility,
    /// Explicit opt-out, `#[builder(ignore)]` on the Rust side.
    #[serde(default)]
    pub excluded: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifiers: BTreeSet::new(),
            visibility: Visibility::Package,
            excluded: false,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_modifier(mut self, modifier: FieldModifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    pub fn has_modifier(&self, modifier: FieldModifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDescriptor {
    /// `None` is the type's `Default` implementation, `Some(name)` an
    /// associated function `Type::name(..)`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub params: Vec<ParameterDescriptor>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl ConstructorDescriptor {
    /// The `Default::default()` constructor, which is always public.
    pub fn default_trait() -> Self {
        Self {
            name: None,
            params: Vec::new(),
            visibility: Visibility::Public,
        }
    }

    pub fn associated(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: Some(name.into()),
            params: Vec::new(),
            visibility,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(ParameterDescriptor {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }

    pub fn is_accessible_no_arg(&self) -> bool {
        self.params.is_empty() && !self.visibility.is_restricted()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    #[serde(flatten)]
    pub name: QualifiedName,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub modifiers: BTreeSet<TypeModifier>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub constructors: Vec<ConstructorDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            visibility: Visibility::default(),
            modifiers: BTreeSet::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_modifier(mut self, modifier: TypeModifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&TypeModifier::Abstract)
    }

    /// First constructor, in declaration order, that takes no arguments and
    /// is not private.
    pub fn accessible_no_arg_constructor(&self) -> Option<&ConstructorDescriptor> {
        self.constructors.iter().find(|c| c.is_accessible_no_arg())
    }

    /// Name of the first field declared more than once, if any.
    pub fn duplicate_field_name(&self) -> Option<&str> {
        let mut seen = BTreeSet::new();
        self.fields
            .iter()
            .map(|field| field.name.as_str())
            .find(|name| !seen.insert(*name))
    }
}
