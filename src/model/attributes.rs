//! Attribute data attached to method symbols.
//!
//! This module contains the types used for representing applied attributes, including
//! positional (constructor) arguments and named arguments. The shape follows the
//! constructor/named split of ECMA-335 II.23.3, with type arguments resolved to hook type
//! symbols instead of serialized type names.

use crate::model::symbols::HookTypeRc;

/// Represents an applied attribute with its arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeValue {
    /// Fully qualified name of the attribute class, without `global::`
    pub class_name: String,
    /// Fixed arguments from the constructor call
    pub fixed_args: Vec<AttributeArgument>,
    /// Named arguments (fields and properties)
    pub named_args: Vec<AttributeNamedArgument>,
}

impl AttributeValue {
    /// An attribute with no arguments.
    pub fn new(class_name: &str) -> Self {
        AttributeValue {
            class_name: class_name.to_string(),
            fixed_args: Vec::new(),
            named_args: Vec::new(),
        }
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn with_fixed(mut self, arg: AttributeArgument) -> Self {
        self.fixed_args.push(arg);
        self
    }

    /// Appends a named property argument.
    #[must_use]
    pub fn with_named(mut self, name: &str, value: AttributeArgument) -> Self {
        self.named_args.push(AttributeNamedArgument {
            is_field: false,
            name: name.to_string(),
            value,
        });
        self
    }

    /// Looks up the value of a named argument.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&AttributeArgument> {
        self.named_args
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }
}

/// Represents a single attribute argument value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeArgument {
    /// `null`
    Null,
    /// Boolean value
    Bool(bool),
    /// Signed 32-bit integer
    I4(i32),
    /// Signed 64-bit integer
    I8(i64),
    /// UTF-8 string
    String(String),
    /// `typeof(...)` reference, resolved to the hook type symbol
    Type(HookTypeRc),
    /// Array of arguments
    Array(Vec<AttributeArgument>),
}

impl AttributeArgument {
    /// The string payload, if this is a string argument.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeArgument::String(value) => Some(value),
            _ => None,
        }
    }

    /// The type payload, if this is a `typeof` argument.
    #[must_use]
    pub fn as_type(&self) -> Option<&HookTypeRc> {
        match self {
            AttributeArgument::Type(ty) => Some(ty),
            _ => None,
        }
    }

    /// A short name for the argument's kind, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttributeArgument::Null => "null",
            AttributeArgument::Bool(_) => "bool",
            AttributeArgument::I4(_) => "int",
            AttributeArgument::I8(_) => "long",
            AttributeArgument::String(_) => "string",
            AttributeArgument::Type(_) => "type",
            AttributeArgument::Array(_) => "array",
        }
    }
}

/// Represents a named argument (field or property) of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeNamedArgument {
    /// Whether this is a field (true) or property (false)
    pub is_field: bool,
    /// Name of the field or property
    pub name: String,
    /// Value of the argument
    pub value: AttributeArgument,
}
