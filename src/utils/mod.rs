//! Shared helpers used across the weaving pipeline.

mod hash;

pub use hash::ContentHash;
