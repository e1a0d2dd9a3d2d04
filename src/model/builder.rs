//! Fluent builders for the host symbol model.
//!
//! Host adapters (and tests) use [`HostTypeBuilder`] and [`HostMethodBuilder`] to assemble
//! symbols without spelling out every field. By default the builders also produce a syntax
//! piece that matches what a user would have written, so the emitted headers take the
//! "original text" path; [`HostTypeBuilder::symbol_only`] drops the syntax to exercise the
//! synthesized path.
//!
//! # Example
//!
//! ```rust
//! use dotweave::model::{HookType, HostMethodBuilder, HostTypeBuilder, TypeRef};
//! use std::sync::Arc;
//!
//! let hook = Arc::new(HookType::new("TestWrapper"));
//! let service = HostTypeBuilder::class("MyService")
//!     .namespace("MyApp")
//!     .modifiers(&["public", "partial"])
//!     .build();
//!
//! let method = HostMethodBuilder::new("Add", &service)
//!     .declaration(&["public", "partial"])
//!     .returns(TypeRef::int())
//!     .parameter("a", TypeRef::int())
//!     .parameter("b", TypeRef::int())
//!     .wrapped_by(&hook)
//!     .build();
//!
//! assert_eq!(method.container_name(), "MyService");
//! ```

use std::sync::Arc;

use crate::{
    config::{default_attribute_full_name, IMPLEMENTATION_NAME_OPTION},
    model::{
        attributes::{AttributeArgument, AttributeValue},
        symbols::{
            ContainerKind, HookTypeRc, HostMethod, HostType, HostTypeRc, MemberSymbol,
            MethodDeclaration, TypeDeclaration, TypeModifiers,
        },
        types::{HostParameter, HostTypeParameter, RefKind, TypeRef},
    },
};

/// Provides a fluent API for building container symbols
pub struct HostTypeBuilder {
    name: String,
    namespace: String,
    kind: ContainerKind,
    modifiers: Vec<String>,
    type_parameters: Vec<HostTypeParameter>,
    constraint_clauses: Vec<String>,
    members: Vec<MemberSymbol>,
    containing: Option<HostTypeRc>,
    with_syntax: bool,
}

impl HostTypeBuilder {
    fn new(name: &str, kind: ContainerKind) -> Self {
        HostTypeBuilder {
            name: name.to_string(),
            namespace: String::new(),
            kind,
            modifiers: Vec::new(),
            type_parameters: Vec::new(),
            constraint_clauses: Vec::new(),
            members: Vec::new(),
            containing: None,
            with_syntax: true,
        }
    }

    /// Start building a class
    pub fn class(name: &str) -> Self {
        Self::new(name, ContainerKind::Class)
    }

    /// Start building a struct
    pub fn structure(name: &str) -> Self {
        Self::new(name, ContainerKind::Struct)
    }

    /// Start building a record
    pub fn record(name: &str) -> Self {
        Self::new(name, ContainerKind::Record)
    }

    /// Start building a record struct
    pub fn record_struct(name: &str) -> Self {
        Self::new(name, ContainerKind::RecordStruct)
    }

    /// Set the containing namespace
    #[must_use]
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    /// Append modifier keywords in source order
    #[must_use]
    pub fn modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers
            .extend(modifiers.iter().map(|m| (*m).to_string()));
        self
    }

    /// Append a generic type parameter
    #[must_use]
    pub fn type_parameter(mut self, parameter: HostTypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    /// Append a constraint clause as written in source
    #[must_use]
    pub fn constraint_clause(mut self, clause: &str) -> Self {
        self.constraint_clauses.push(clause.to_string());
        self
    }

    /// Append a member symbol
    #[must_use]
    pub fn member(mut self, member: MemberSymbol) -> Self {
        self.members.push(member);
        self
    }

    /// Nest this container inside another; the namespace is inherited
    #[must_use]
    pub fn nested_in(mut self, parent: &HostTypeRc) -> Self {
        self.namespace.clone_from(&parent.namespace);
        self.containing = Some(Arc::clone(parent));
        self
    }

    /// Do not produce a syntax piece, only symbol information
    #[must_use]
    pub fn symbol_only(mut self) -> Self {
        self.with_syntax = false;
        self
    }

    /// Finish the container
    pub fn build(self) -> HostTypeRc {
        let modifiers = TypeModifiers::from_keywords(self.modifiers.iter().map(String::as_str));

        let declarations = if self.with_syntax {
            let type_parameter_list = if self.type_parameters.is_empty() {
                None
            } else {
                let names = self
                    .type_parameters
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(format!("<{names}>"))
            };

            vec![TypeDeclaration {
                modifiers: self.modifiers,
                keyword: self.kind.keyword().to_string(),
                identifier: self.name.clone(),
                type_parameter_list,
                constraint_clauses: self.constraint_clauses,
            }]
        } else {
            Vec::new()
        };

        Arc::new(HostType {
            name: self.name,
            namespace: self.namespace,
            kind: self.kind,
            modifiers,
            type_parameters: self.type_parameters,
            declarations,
            members: self.members,
            containing: self.containing,
        })
    }
}

/// Provides a fluent API for building method symbols
pub struct HostMethodBuilder {
    name: String,
    is_static: bool,
    is_async: bool,
    return_type: TypeRef,
    parameters: Vec<HostParameter>,
    type_parameters: Vec<HostTypeParameter>,
    declarations: Vec<MethodDeclaration>,
    attributes: Vec<AttributeValue>,
    containing_type: HostTypeRc,
}

impl HostMethodBuilder {
    /// Start building a `void` method inside the given container
    pub fn new(name: &str, containing_type: &HostTypeRc) -> Self {
        HostMethodBuilder {
            name: name.to_string(),
            is_static: false,
            is_async: false,
            return_type: TypeRef::void(),
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            declarations: Vec::new(),
            attributes: Vec::new(),
            containing_type: Arc::clone(containing_type),
        }
    }

    /// Add a partial declaration with the given modifier keywords
    ///
    /// A `static` keyword on any declaration makes the symbol static.
    #[must_use]
    pub fn declaration(self, modifiers: &[&str]) -> Self {
        self.declaration_piece(MethodDeclaration::new(modifiers))
    }

    /// Add a fully specified partial declaration
    #[must_use]
    pub fn declaration_piece(mut self, declaration: MethodDeclaration) -> Self {
        if declaration.has_modifier("static") {
            self.is_static = true;
        }
        self.declarations.push(declaration);
        self
    }

    /// Set the return type
    #[must_use]
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = ty;
        self
    }

    /// Append a by-value parameter
    #[must_use]
    pub fn parameter(mut self, name: &str, ty: TypeRef) -> Self {
        self.parameters.push(HostParameter::new(name, ty));
        self
    }

    /// Append a `ref`, `out` or `in` parameter
    #[must_use]
    pub fn ref_parameter(mut self, name: &str, ty: TypeRef, ref_kind: RefKind) -> Self {
        self.parameters
            .push(HostParameter::with_ref_kind(name, ty, ref_kind));
        self
    }

    /// Append a `params` array parameter
    #[must_use]
    pub fn params_parameter(mut self, name: &str, ty: TypeRef) -> Self {
        let mut parameter = HostParameter::new(name, ty);
        parameter.is_params = true;
        self.parameters.push(parameter);
        self
    }

    /// Append a method type parameter
    #[must_use]
    pub fn type_parameter(mut self, parameter: HostTypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    /// Mark the symbol static without adding a declaration
    #[must_use]
    pub fn is_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Apply an arbitrary attribute
    #[must_use]
    pub fn attribute(mut self, attribute: AttributeValue) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Apply the default marker attribute naming the given hook type
    #[must_use]
    pub fn wrapped_by(self, hook: &HookTypeRc) -> Self {
        let attribute = AttributeValue::new(&default_attribute_full_name())
            .with_fixed(AttributeArgument::Type(Arc::clone(hook)));
        self.attribute(attribute)
    }

    /// Apply the default marker attribute with a positional implementation name
    #[must_use]
    pub fn wrapped_by_with_impl(self, hook: &HookTypeRc, implementation: &str) -> Self {
        let attribute = AttributeValue::new(&default_attribute_full_name())
            .with_fixed(AttributeArgument::Type(Arc::clone(hook)))
            .with_fixed(AttributeArgument::String(implementation.to_string()));
        self.attribute(attribute)
    }

    /// Apply the default marker attribute with a named implementation name
    #[must_use]
    pub fn wrapped_by_with_named_impl(self, hook: &HookTypeRc, implementation: &str) -> Self {
        let attribute = AttributeValue::new(&default_attribute_full_name())
            .with_fixed(AttributeArgument::Type(Arc::clone(hook)))
            .with_named(
                IMPLEMENTATION_NAME_OPTION,
                AttributeArgument::String(implementation.to_string()),
            );
        self.attribute(attribute)
    }

    /// Finish the method
    pub fn build(self) -> HostMethod {
        HostMethod {
            name: self.name,
            is_static: self.is_static,
            is_async: self.is_async,
            return_type: self.return_type,
            parameters: self.parameters,
            type_parameters: self.type_parameters,
            declarations: self.declarations,
            attributes: self.attributes,
            containing_type: self.containing_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_builder_syntax() {
        let ty = HostTypeBuilder::class("MyGeneric")
            .namespace("MyApp")
            .modifiers(&["public", "partial"])
            .type_parameter(HostTypeParameter::new("T"))
            .type_parameter(HostTypeParameter::new("U"))
            .constraint_clause("where T : class")
            .build();

        assert_eq!(ty.declarations.len(), 1);
        let decl = &ty.declarations[0];
        assert_eq!(decl.keyword, "class");
        assert_eq!(decl.type_parameter_list.as_deref(), Some("<T, U>"));
        assert_eq!(decl.constraint_clauses, vec!["where T : class"]);
        assert!(ty.modifiers.contains(TypeModifiers::PARTIAL));
    }

    #[test]
    fn test_symbol_only_has_no_syntax() {
        let ty = HostTypeBuilder::structure("Point")
            .modifiers(&["partial"])
            .symbol_only()
            .build();
        assert!(ty.declarations.is_empty());
        assert!(ty.is_partial());
    }

    #[test]
    fn test_nested_inherits_namespace() {
        let outer = HostTypeBuilder::class("Outer")
            .namespace("Deep.Space")
            .modifiers(&["partial"])
            .build();
        let inner = HostTypeBuilder::class("Inner")
            .nested_in(&outer)
            .modifiers(&["partial"])
            .build();
        assert_eq!(inner.namespace, "Deep.Space");
        assert_eq!(inner.containing.as_ref().map(|t| t.name.as_str()), Some("Outer"));
    }

    #[test]
    fn test_static_declaration_marks_symbol() {
        let ty = HostTypeBuilder::class("S").modifiers(&["static", "partial"]).build();
        let method = HostMethodBuilder::new("Run", &ty)
            .declaration(&["public", "static", "partial"])
            .build();
        assert!(method.is_static);
    }
}
