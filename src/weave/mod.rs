//! Source text emission.
//!
//! Everything in this module is a pure function of its inputs: descriptors and configuration
//! in, text out. No host symbols are consulted here.
//!
//! # Key Components
//!
//! - [`synthesize`]: The wrapper source file for one [`crate::descriptor::MethodDescriptor`]
//! - [`conflict_stub`]: The `#error` artifact emitted for an accessibility conflict
//! - [`attribute_source`]: The marker attribute declaration
//! - [`SourceWriter`]: Indentation-aware line builder
//! - [`names`]: Keyword escaping and local name hygiene

mod attribute;
pub mod names;
mod synthesizer;
mod writer;

pub use attribute::{attribute_hint_name, attribute_source};
pub use synthesizer::{
    conflict_stub, forwarding_call, required_usings, signature, synthesize, AUTO_GENERATED_MARKER,
};
pub use writer::SourceWriter;
