//! Host symbol model consumed by the weaver.
//!
//! The host toolchain parses source into symbols; an adapter populates these read-only
//! types once and hands them to the [`crate::WrapperGenerator`]. Nothing in the weaver talks
//! back to the host, so the whole model is plain data: hashable, cloneable and shared
//! across worker threads through [`std::sync::Arc`].
//!
//! # Key Components
//!
//! - [`TypeRef`]: A resolved type as it appears in a signature
//! - [`HostType`]: A container (class, struct or record) with its syntax pieces and members
//! - [`HostMethod`]: A method symbol together with its partial declarations and attributes
//! - [`HookType`]: The type named by the marker attribute, probed for hook members
//! - [`AttributeValue`]: An applied attribute with positional and named arguments
//! - [`HostTypeBuilder`] / [`HostMethodBuilder`]: Fluent construction of the above
//!
//! # Syntax versus Symbols
//!
//! Containers and methods carry optional syntax pieces ([`TypeDeclaration`],
//! [`MethodDeclaration`]) next to the symbol facts. Where syntax is present the weaver
//! reproduces it verbatim; where it is missing the weaver synthesizes equivalent text from
//! the symbol.

mod attributes;
mod builder;
mod symbols;
mod types;

pub use attributes::{AttributeArgument, AttributeNamedArgument, AttributeValue};
pub use builder::{HostMethodBuilder, HostTypeBuilder};
pub use symbols::{
    ContainerKind, HookType, HookTypeRc, HostMethod, HostType, HostTypeRc, MemberKind,
    MemberSymbol, MethodDeclaration, TypeDeclaration, TypeModifiers,
};
pub use types::{
    GenericConstraints, HostParameter, HostTypeParameter, RefKind, SpecialType, TypeRef,
    TASKS_NAMESPACE,
};
