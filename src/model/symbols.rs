//! Container, member and method symbols of the host symbol model.
//!
//! These types are the read-only view the host adapter hands to the weaver. Symbol-level
//! facts (kind, static-ness, type parameters, members) live next to the optional syntax
//! pieces ([`TypeDeclaration`], [`MethodDeclaration`]) that carry the user's exact header and
//! constraint text. A symbol can have several syntax pieces (one per partial declaration) or
//! none at all when the adapter only had semantic information.

use std::sync::Arc;

use bitflags::bitflags;
use strum::{AsRefStr, EnumIter};

use crate::model::{
    attributes::AttributeValue,
    types::{HostParameter, HostTypeParameter, TypeRef},
};

/// A reference-counted container symbol
pub type HostTypeRc = Arc<HostType>;
/// A reference-counted hook type symbol
pub type HookTypeRc = Arc<HookType>;

/// Classification of a container that can host a partial method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ContainerKind {
    /// `class`
    Class,
    /// `struct`
    Struct,
    /// `record` or `record class`
    Record,
    /// `record struct`
    #[strum(serialize = "record struct")]
    RecordStruct,
}

impl ContainerKind {
    /// The keyword used to declare this kind of container.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            ContainerKind::Class => "class",
            ContainerKind::Struct => "struct",
            ContainerKind::Record => "record",
            ContainerKind::RecordStruct => "record struct",
        }
    }

    /// Returns `true` for value types.
    #[must_use]
    pub fn is_value_type(self) -> bool {
        matches!(self, ContainerKind::Struct | ContainerKind::RecordStruct)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Symbol-level modifiers of a container, merged across all partial declarations
    pub struct TypeModifiers: u16 {
        /// `static`
        const STATIC = 0x0001;
        /// `partial` on at least one declaration
        const PARTIAL = 0x0002;
        /// `abstract`
        const ABSTRACT = 0x0004;
        /// `sealed`
        const SEALED = 0x0008;
        /// `readonly` (structs)
        const READONLY = 0x0010;
        /// `ref` (structs)
        const REF = 0x0020;
        /// `unsafe`
        const UNSAFE = 0x0040;
    }
}

impl TypeModifiers {
    /// Collects the symbol-level modifiers implied by a list of modifier keywords.
    pub fn from_keywords<'a>(keywords: impl IntoIterator<Item = &'a str>) -> Self {
        keywords
            .into_iter()
            .fold(TypeModifiers::empty(), |acc, keyword| match keyword {
                "static" => acc | TypeModifiers::STATIC,
                "partial" => acc | TypeModifiers::PARTIAL,
                "abstract" => acc | TypeModifiers::ABSTRACT,
                "sealed" => acc | TypeModifiers::SEALED,
                "readonly" => acc | TypeModifiers::READONLY,
                "ref" => acc | TypeModifiers::REF,
                "unsafe" => acc | TypeModifiers::UNSAFE,
                _ => acc,
            })
    }
}

/// One syntactic declaration of a container (one per `partial` piece).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDeclaration {
    /// Modifier keywords in source order (`public`, `static`, `partial`, ...)
    pub modifiers: Vec<String>,
    /// The kind keyword as written (`class`, `struct`, `record`)
    pub keyword: String,
    /// The identifier as written
    pub identifier: String,
    /// The type parameter list as written, including angle brackets
    pub type_parameter_list: Option<String>,
    /// Constraint clauses as written, possibly spanning several lines
    pub constraint_clauses: Vec<String>,
}

impl TypeDeclaration {
    /// Returns `true` if this piece is declared `partial`.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.modifiers.iter().any(|m| m == "partial")
    }
}

/// One syntactic declaration of a method (one per `partial` piece).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MethodDeclaration {
    /// Modifier keywords in source order
    pub modifiers: Vec<String>,
    /// Constraint clauses as written
    pub constraint_clauses: Vec<String>,
}

impl MethodDeclaration {
    /// A declaration with the given modifier keywords.
    pub fn new(modifiers: &[&str]) -> Self {
        MethodDeclaration {
            modifiers: modifiers.iter().map(|m| (*m).to_string()).collect(),
            constraint_clauses: Vec::new(),
        }
    }

    /// Adds a constraint clause as it appears in source.
    #[must_use]
    pub fn with_constraint(mut self, clause: &str) -> Self {
        self.constraint_clauses.push(clause.to_string());
        self
    }

    /// Returns `true` if the given modifier keyword is present.
    #[must_use]
    pub fn has_modifier(&self, keyword: &str) -> bool {
        self.modifiers.iter().any(|m| m == keyword)
    }
}

/// Kind of a member symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum MemberKind {
    /// Ordinary method
    Method,
    /// Property
    Property,
    /// Field
    Field,
    /// Event
    Event,
    /// Nested type
    NestedType,
}

/// A member of a container or hook type, as far as the weaver needs to know it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberSymbol {
    /// Member name
    pub name: String,
    /// Member kind
    pub kind: MemberKind,
    /// Declared with the `async` modifier
    pub is_async: bool,
    /// Declared `static`
    pub is_static: bool,
    /// Return type for methods, member type otherwise
    pub return_type: TypeRef,
    /// Parameter types for methods, in order
    pub parameters: Vec<TypeRef>,
}

impl MemberSymbol {
    /// A static method member with no parameters returning `void`.
    pub fn method(name: &str) -> Self {
        MemberSymbol {
            name: name.to_string(),
            kind: MemberKind::Method,
            is_async: false,
            is_static: true,
            return_type: TypeRef::void(),
            parameters: Vec::new(),
        }
    }

    /// A non-method member.
    pub fn other(name: &str, kind: MemberKind, ty: TypeRef) -> Self {
        MemberSymbol {
            kind,
            return_type: ty,
            ..Self::method(name)
        }
    }

    /// Appends a parameter type.
    #[must_use]
    pub fn parameter(mut self, ty: TypeRef) -> Self {
        self.parameters.push(ty);
        self
    }

    /// Sets the return type.
    #[must_use]
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = ty;
        self
    }

    /// Marks the member as `async`.
    #[must_use]
    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    /// Marks the member as an instance member.
    #[must_use]
    pub fn instance(mut self) -> Self {
        self.is_static = false;
        self
    }
}

/// A named container (class, struct or record) that encloses a wrapped method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostType {
    /// Simple name
    pub name: String,
    /// Containing namespace, empty for the global namespace
    pub namespace: String,
    /// Container classification
    pub kind: ContainerKind,
    /// Symbol-level modifiers
    pub modifiers: TypeModifiers,
    /// Generic type parameters, in order
    pub type_parameters: Vec<HostTypeParameter>,
    /// Syntax pieces, one per partial declaration; may be empty
    pub declarations: Vec<TypeDeclaration>,
    /// Members of the container (all partial pieces merged)
    pub members: Vec<MemberSymbol>,
    /// The enclosing container for nested types
    pub containing: Option<HostTypeRc>,
}

impl HostType {
    /// Returns `true` if the container is declared `partial`.
    ///
    /// Syntax wins when it is available; symbol-only containers fall back to the
    /// symbol-level flag.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        if self.declarations.is_empty() {
            self.modifiers.contains(TypeModifiers::PARTIAL)
        } else {
            self.declarations.iter().any(TypeDeclaration::is_partial)
        }
    }

    /// Returns `true` if the container is declared `static`.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(TypeModifiers::STATIC)
    }

    /// Returns `true` if the container lives in the global namespace.
    #[must_use]
    pub fn is_global_namespace(&self) -> bool {
        self.namespace.is_empty()
    }

    /// The nesting chain ending at this container, ordered outermost to innermost.
    #[must_use]
    pub fn chain(&self) -> Vec<&HostType> {
        let mut chain = vec![self];
        let mut current = self.containing.as_deref();
        while let Some(parent) = current {
            chain.push(parent);
            current = parent.containing.as_deref();
        }
        chain.reverse();
        chain
    }

    /// Members with the given name.
    pub fn members_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MemberSymbol> {
        self.members.iter().filter(move |member| member.name == name)
    }
}

/// The hook type named by a marker attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HookType {
    /// Fully qualified display name without `global::`, used as the call receiver
    pub display_name: String,
    /// Members of the hook type
    pub members: Vec<MemberSymbol>,
}

impl HookType {
    /// A hook type with no members.
    pub fn new(display_name: &str) -> Self {
        HookType {
            display_name: display_name.to_string(),
            members: Vec::new(),
        }
    }

    /// Adds a member.
    #[must_use]
    pub fn with_member(mut self, member: MemberSymbol) -> Self {
        self.members.push(member);
        self
    }
}

/// A method symbol together with its syntax pieces and applied attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostMethod {
    /// Method name
    pub name: String,
    /// Declared `static`
    pub is_static: bool,
    /// Declared `async`
    pub is_async: bool,
    /// Return type
    pub return_type: TypeRef,
    /// Parameters, in declaration order
    pub parameters: Vec<HostParameter>,
    /// Method type parameters, in declaration order
    pub type_parameters: Vec<HostTypeParameter>,
    /// Syntax pieces, one per partial declaration
    pub declarations: Vec<MethodDeclaration>,
    /// Attributes applied to the method
    pub attributes: Vec<AttributeValue>,
    /// The innermost containing type
    pub containing_type: HostTypeRc,
}

impl HostMethod {
    /// The name of the innermost containing type.
    #[must_use]
    pub fn container_name(&self) -> &str {
        &self.containing_type.name
    }

    /// A deterministic ordering key: namespace, container chain, method name and parameter
    /// types with their `ref`/`out`/`in`/`params` modifiers. Distinguishes overloads and same-named containers in different scopes.
    #[must_use]
    pub fn sort_key(&self) -> String {
        let chain = self
            .containing_type
            .chain()
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join("+");
        let parameters = self
            .parameters
            .iter()
            .map(|p| {
                let mut rendered = String::new();
                if p.is_params {
                    rendered.push_str("params ");
                }
                if let Some(keyword) = p.ref_kind.keyword() {
                    rendered.push_str(keyword);
                    rendered.push(' ');
                }
                rendered.push_str(&p.ty.display);
                rendered
            })
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}|{}|{}({})",
            self.containing_type.namespace, chain, self.name, parameters
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{nested_type, partial_class};

    #[test]
    fn test_type_modifiers_from_keywords() {
        let flags = TypeModifiers::from_keywords(["public", "static", "partial"]);
        assert!(flags.contains(TypeModifiers::STATIC));
        assert!(flags.contains(TypeModifiers::PARTIAL));
        assert!(!flags.contains(TypeModifiers::SEALED));
    }

    #[test]
    fn test_partial_prefers_syntax() {
        let mut ty = (*partial_class("MyService")).clone();
        assert!(ty.is_partial());

        // Syntax without partial wins over a symbol flag that claims otherwise
        ty.declarations[0].modifiers.retain(|m| m != "partial");
        ty.modifiers |= TypeModifiers::PARTIAL;
        assert!(!ty.is_partial());

        // Without syntax the symbol flag decides
        ty.declarations.clear();
        assert!(ty.is_partial());
    }

    #[test]
    fn test_chain_order() {
        let outer = partial_class("Outer");
        let inner = nested_type("Inner", &outer);
        let names: Vec<_> = inner.chain().iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["Outer", "Inner"]);
    }

    #[test]
    fn test_sort_key_distinguishes_parameter_modifiers() {
        use crate::model::{HostMethodBuilder, RefKind, TypeRef};

        let calc = partial_class("Calc");
        let by_value = HostMethodBuilder::new("Bump", &calc)
            .parameter("value", TypeRef::int())
            .build();
        let by_ref = HostMethodBuilder::new("Bump", &calc)
            .ref_parameter("value", TypeRef::int(), RefKind::Ref)
            .build();
        let spread = HostMethodBuilder::new("Bump", &calc)
            .params_parameter("value", TypeRef::array_of(TypeRef::int()))
            .build();

        assert_eq!(by_value.sort_key(), "MyApp|Calc|Bump(int)");
        assert_eq!(by_ref.sort_key(), "MyApp|Calc|Bump(ref int)");
        assert_eq!(spread.sort_key(), "MyApp|Calc|Bump(params int[])");
    }

    #[test]
    fn test_container_keywords() {
        assert_eq!(ContainerKind::Class.keyword(), "class");
        assert_eq!(ContainerKind::Record.as_ref(), "record");
        assert!(ContainerKind::Struct.is_value_type());
        assert!(!ContainerKind::Record.is_value_type());
        assert!(ContainerKind::RecordStruct.is_value_type());
        assert_eq!(ContainerKind::RecordStruct.keyword(), "record struct");
        assert_eq!(ContainerKind::RecordStruct.as_ref(), "record struct");
    }
}
