//! Normalized method descriptions and the analyses that build them.
//!
//! This module turns host symbols into a [`MethodDescriptor`]: a self-contained, immutable
//! record of everything the synthesizer needs for one wrapper.
//!
//! # Key Components
//!
//! - [`extract`]: Discovery, marker attribute parsing and descriptor assembly
//! - [`accessibility`]: Reconciles accessibility across partial declarations
//! - [`asyncness`]: Classifies the wrapper as synchronous, awaited or fire-and-forget
//! - [`hooks`]: Probes a hook type for the hook members it exposes
//! - [`structure`]: Rebuilds the container chain, headers and constraint clauses
//!
//! # Examples
//!
//! ```rust
//! use dotweave::descriptor::{extract, ReturnKind};
//! use dotweave::model::{HookType, HostMethodBuilder, HostTypeBuilder, TypeRef};
//! use dotweave::WeaverConfig;
//! use std::sync::Arc;
//!
//! let hook = Arc::new(HookType::new("Hooks"));
//! let ty = HostTypeBuilder::class("Svc").modifiers(&["partial"]).build();
//! let method = HostMethodBuilder::new("Get", &ty)
//!     .declaration(&["public", "partial"])
//!     .returns(TypeRef::string())
//!     .wrapped_by(&hook)
//!     .build();
//!
//! let descriptor = extract::extract(&method, &WeaverConfig::default())?
//!     .expect("method is a candidate");
//! assert_eq!(descriptor.return_kind, ReturnKind::Sync);
//! # Ok::<(), dotweave::Error>(())
//! ```

pub mod accessibility;
pub mod asyncness;
pub mod extract;
pub mod hooks;
mod method;
pub mod structure;

pub use accessibility::Accessibility;
pub use asyncness::AsyncShape;
pub use extract::WrapperConfiguration;
pub use hooks::HookCapabilities;
pub use method::{MethodDescriptor, ParameterDescriptor, ReturnKind, TypeParameterDescriptor};
pub use structure::{ContainerHeader, TypeDescriptor};
