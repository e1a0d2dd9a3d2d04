// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
#![allow(clippy::too_many_arguments)]

//! # dotweave
//!
//! [![Crates.io](https://img.shields.io/crates/v/dotweave.svg)](https://crates.io/crates/dotweave)
//! [![Documentation](https://docs.rs/dotweave/badge.svg)](https://docs.rs/dotweave)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/dotweave/blob/main/LICENSE-APACHE)
//!
//! A compile-time method interception weaver for C#. Methods declared as `partial` and marked
//! with a wrapper attribute get a synthesized body that calls the user's implementation method
//! and brackets the call with `OnEnter`, `OnExit` and `OnError` hooks plus a stopwatch.
//!
//! The crate is host-agnostic: a compiler integration translates its semantic model into the
//! [`model`] types, runs a [`WrapperGenerator`] and hands the returned artifacts back to the
//! compilation.
//!
//! ## Features
//!
//! - **Faithful reconstruction** - Container headers, nesting and constraint clauses are reproduced from user text
//! - **Partial-aware accessibility** - Accessibility is reconciled across every partial declaration
//! - **Async support** - `Task`, `Task<T>` and fire-and-forget implementations are awaited correctly
//! - **Hook probing** - Only hooks that exist on the hook type are called
//! - **Incremental** - Unchanged declarations reuse their previous output
//! - **Parallel** - Candidates are processed on the rayon pool
//!
//! ## Quick Start
//!
//! ```rust
//! use dotweave::prelude::*;
//! use std::sync::Arc;
//!
//! let hook = Arc::new(
//!     HookType::new("MyApp.TestWrapper")
//!         .with_member(MemberSymbol::method("OnExit"))
//!         .with_member(MemberSymbol::method("OnError")),
//! );
//! let service = HostTypeBuilder::class("MyService")
//!     .namespace("MyApp")
//!     .modifiers(&["public", "partial"])
//!     .build();
//! let add = HostMethodBuilder::new("Add", &service)
//!     .declaration(&["public", "partial"])
//!     .returns(TypeRef::int())
//!     .parameter("a", TypeRef::int())
//!     .parameter("b", TypeRef::int())
//!     .wrapped_by(&hook)
//!     .build();
//!
//! let generator = WrapperGenerator::new(WeaverConfig::default());
//! let attribute = generator.initialize();
//! let run = generator.run(&[add]);
//!
//! assert_eq!(attribute.hint_name, "WrapperAttribute.g.cs");
//! let source = run.source("MyService.Add.g.cs").unwrap();
//! assert!(source.contains("var methodResult = Add_Implementation(a, b);"));
//! ```
//!
//! ## Error Handling
//!
//! Per-method failures never abort a run. They are reported as [`Diagnostic`]s on the
//! [`GeneratorRun`], while the lower-level building blocks return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use dotweave::{descriptor::extract, model::*, Error, WeaverConfig};
//!
//! let ty = HostTypeBuilder::class("Svc").modifiers(&["partial"]).build();
//! let method = HostMethodBuilder::new("Run", &ty)
//!     .attribute(AttributeValue::new("DotWeave.WrapperAttribute"))
//!     .build();
//!
//! match extract::extract(&method, &WeaverConfig::default()) {
//!     Err(Error::MissingHookType { method }) => assert_eq!(method, "Run"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use dotweave::prelude::*;
///
/// let generator = WrapperGenerator::new(WeaverConfig::sequential());
/// assert!(generator.run(&[]).is_empty());
/// ```
pub mod prelude;

/// Weaver configuration: attribute identity, hook names and processing options.
pub mod config;

/// Method descriptors and the stages that build them.
///
/// Extraction reads a marked [`model::HostMethod`] and produces a
/// [`descriptor::MethodDescriptor`] by running accessibility reconciliation, async
/// classification, structural reconstruction and hook probing.
pub mod descriptor;

/// Diagnostics reported by a generator run.
pub mod diagnostics;

/// The weaving pipeline: discovery, parallel processing, caching and artifact naming.
pub mod generator;

/// The host symbol model the weaver consumes.
///
/// # Key Types
///
/// - [`model::HostType`] / [`model::HostTypeBuilder`] - Containers and their syntax pieces
/// - [`model::HostMethod`] / [`model::HostMethodBuilder`] - Methods, declarations and attributes
/// - [`model::HookType`] - The type named by the marker attribute
/// - [`model::TypeRef`] - Type references with their display text
pub mod model;

/// Utilities shared across modules.
pub mod utils;

/// Source text emission for wrappers, conflict stubs and the marker attribute.
pub mod weave;

/// `dotweave` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`]. This is used consistently throughout the crate.
///
/// # Examples
///
/// ```rust
/// use dotweave::{Result, WeaverConfig};
///
/// fn implementation_name(method: &str) -> Result<String> {
///     Ok(WeaverConfig::default().implementation_name(method))
/// }
/// assert_eq!(implementation_name("Add").unwrap(), "Add_Implementation");
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `dotweave` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;

pub use config::{HookNames, WeaverConfig};
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};
pub use generator::{Artifact, ArtifactKind, GeneratorRun, RunStats, WrapperGenerator};
