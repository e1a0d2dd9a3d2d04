//! Async classification of the wrapper.
//!
//! Task-returning methods get an `async` wrapper that awaits the forwarding call. A `void`
//! method is treated as fire-and-forget when its implementation is declared `async void`:
//! the wrapper is marked `async` so the host compiler accepts the pattern, but the call is
//! not awaited. Exceptions the implementation raises after its first suspension point are
//! therefore not observed by the wrapper's error handling.

use crate::{
    descriptor::method::ReturnKind,
    model::{HostType, MemberKind},
};

/// How the wrapper relates to asynchrony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsyncShape {
    /// Plain synchronous wrapper
    Synchronous,
    /// `async` wrapper that awaits the forwarding call
    Awaited,
    /// `async` wrapper around an `async void` implementation; the call is not awaited
    FireAndForget,
}

impl AsyncShape {
    /// Returns `true` if the wrapper carries the `async` modifier.
    #[must_use]
    pub fn is_async(self) -> bool {
        self != AsyncShape::Synchronous
    }

    /// Returns `true` if the forwarding call is awaited.
    #[must_use]
    pub fn awaits_call(self) -> bool {
        self == AsyncShape::Awaited
    }
}

/// Returns `true` if the container declares `implementation` as an `async void` method.
///
/// This is a heuristic on declared modifiers only; it does not look at the body.
#[must_use]
pub fn is_fire_and_forget(container: &HostType, implementation: &str) -> bool {
    container.members_named(implementation).any(|member| {
        member.kind == MemberKind::Method && member.is_async && member.return_type.is_void()
    })
}

/// Classifies the wrapper for a method with the given return kind.
///
/// # Arguments
///
/// * `return_kind` - Shape of the wrapped method's return type
/// * `container` - Innermost container, searched for the implementation method
/// * `implementation` - Name of the implementation method
#[must_use]
pub fn classify(return_kind: ReturnKind, container: &HostType, implementation: &str) -> AsyncShape {
    match return_kind {
        ReturnKind::Task | ReturnKind::TaskOfT => AsyncShape::Awaited,
        ReturnKind::Void if is_fire_and_forget(container, implementation) => {
            AsyncShape::FireAndForget
        }
        ReturnKind::Void | ReturnKind::Sync => AsyncShape::Synchronous,
    }
}
