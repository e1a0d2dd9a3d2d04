//! # dotweave Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! dotweave library. Import it to get quick access to the host model builders, the generator
//! and its results.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotweave operations
pub use crate::Error;

/// The result type used throughout dotweave
pub use crate::Result;

/// Weaver configuration
pub use crate::{HookNames, WeaverConfig};

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The generator and the artifacts of a run
pub use crate::generator::{Artifact, ArtifactKind, GeneratorRun, RunStats, WrapperGenerator};

/// Diagnostics reported by a run
pub use crate::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};

// ================================================================================================
// Host Symbol Model
// ================================================================================================

/// Builders for containers and methods
pub use crate::model::{HostMethodBuilder, HostTypeBuilder};

/// Symbols
pub use crate::model::{
    ContainerKind, HookType, HookTypeRc, HostMethod, HostType, HostTypeRc, MemberKind,
    MemberSymbol, MethodDeclaration, TypeDeclaration,
};

/// Types, parameters and generic constraints
pub use crate::model::{GenericConstraints, HostTypeParameter, RefKind, SpecialType, TypeRef};

/// Attribute values
pub use crate::model::{AttributeArgument, AttributeValue};

// ================================================================================================
// Descriptors
// ================================================================================================

/// The intermediate representation handed to synthesis
pub use crate::descriptor::{
    Accessibility, AsyncShape, HookCapabilities, MethodDescriptor, ReturnKind,
};
