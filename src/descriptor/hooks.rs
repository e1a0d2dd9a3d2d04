//! Capability probing of hook types.
//!
//! A hook type may expose any subset of the enter, exit and error hooks. The wrapper only
//! calls what exists, so the hook type's members are probed once and the result is passed
//! to the synthesizer explicitly.

use crate::{
    config::HookNames,
    model::{HookType, MemberKind, MemberSymbol, SpecialType},
};

/// The hook members available on a hook type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct HookCapabilities {
    /// `OnEnter(string, object[])`
    pub has_enter_with_args: bool,
    /// `OnEnter(string)`
    pub has_enter_no_args: bool,
    /// A member named `OnExit`
    pub has_on_exit: bool,
    /// A member named `OnError`
    pub has_on_error: bool,
}

impl HookCapabilities {
    /// A hook type exposing every hook.
    #[must_use]
    pub fn all() -> Self {
        HookCapabilities {
            has_enter_with_args: true,
            has_enter_no_args: true,
            has_on_exit: true,
            has_on_error: true,
        }
    }

    /// Returns `true` if neither enter hook exists.
    #[must_use]
    pub fn has_no_enter(&self) -> bool {
        !self.has_enter_with_args && !self.has_enter_no_args
    }
}

fn is_enter_with_args(member: &MemberSymbol) -> bool {
    member.kind == MemberKind::Method
        && member.parameters.len() == 2
        && member.parameters[0].special == SpecialType::String
        && member.parameters[1].is_object_array()
}

fn is_enter_no_args(member: &MemberSymbol) -> bool {
    member.kind == MemberKind::Method
        && member.parameters.len() == 1
        && member.parameters[0].special == SpecialType::String
}

/// Probes a hook type for the configured hook members.
///
/// Enter hooks are matched by name and signature; exit and error hooks by name alone, since
/// the host compiler reports a mismatched signature at the call site.
#[must_use]
pub fn probe(hook: &HookType, names: &HookNames) -> HookCapabilities {
    let mut capabilities = HookCapabilities::default();

    for member in &hook.members {
        if member.name == names.on_enter {
            capabilities.has_enter_with_args |= is_enter_with_args(member);
            capabilities.has_enter_no_args |= is_enter_no_args(member);
        }
        if member.name == names.on_exit {
            capabilities.has_on_exit = true;
        }
        if member.name == names.on_error {
            capabilities.has_on_error = true;
        }
    }

    capabilities
}
