//! Symbol model extraction.
//!
//! Turns a [`HostMethod`] carrying the marker attribute into a [`MethodDescriptor`]. The
//! extractor is the only component that reads the host model; everything downstream works
//! from the descriptor.
//!
//! # Outcomes
//!
//! - `Ok(None)`: the method is not a candidate (no marker attribute, or a container in the
//!   nesting chain is not partial). This is a filtering miss and not reported.
//! - `Err(_)`: the method is a candidate but cannot be woven, because the marker attribute
//!   is malformed or the partial declarations disagree on accessibility.
//! - `Ok(Some(_))`: a descriptor ready for synthesis.

use log::debug;

use crate::{
    config::{WeaverConfig, IMPLEMENTATION_NAME_OPTION},
    descriptor::{
        accessibility, asyncness,
        hooks::{self, HookCapabilities},
        method::{MethodDescriptor, ParameterDescriptor, ReturnKind},
        structure,
    },
    model::{AttributeArgument, AttributeValue, HookType, HookTypeRc, HostMethod},
    Error, Result,
};

/// The arguments of a well-formed marker attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperConfiguration {
    /// The hook type named by the first positional argument
    pub hook: HookTypeRc,
    /// The implementation method name, explicit or by convention
    pub implementation_name: String,
}

/// Returns the marker attribute applied to `method`, if any.
#[must_use]
pub fn find_marker<'a>(method: &'a HostMethod, config: &WeaverConfig) -> Option<&'a AttributeValue> {
    let full_name = config.attribute_full_name();
    method
        .attributes
        .iter()
        .find(|attribute| attribute.class_name == full_name)
}

/// Returns `true` if `method` is marked for wrapping and every container around it is
/// partial.
#[must_use]
pub fn is_candidate(method: &HostMethod, config: &WeaverConfig) -> bool {
    !method.attributes.is_empty()
        && find_marker(method, config).is_some()
        && structure::is_partial_chain(&method.containing_type)
}

/// Reads the hook type and implementation name from a marker attribute.
///
/// An explicit implementation name is taken from the second positional argument, or from
/// the named argument when no positional one is given. Empty names fall back to the
/// convention `<MethodName><suffix>`.
///
/// # Errors
///
/// Returns [`Error::MissingHookType`] if there is no positional argument, and
/// [`Error::InvalidAttributeArgument`] if the first argument is not a type.
pub fn read_configuration(
    method: &HostMethod,
    attribute: &AttributeValue,
    config: &WeaverConfig,
) -> Result<WrapperConfiguration> {
    let hook = match attribute.fixed_args.first() {
        None => {
            return Err(Error::MissingHookType {
                method: method.name.clone(),
            })
        }
        Some(AttributeArgument::Type(hook)) => hook.clone(),
        Some(other) => {
            return Err(Error::InvalidAttributeArgument {
                method: method.name.clone(),
                message: format!("expected a hook type, found {}", other.kind_name()),
            })
        }
    };

    let explicit = match attribute.fixed_args.get(1) {
        Some(AttributeArgument::String(name)) => Some(name.as_str()),
        _ => attribute
            .named(IMPLEMENTATION_NAME_OPTION)
            .and_then(AttributeArgument::as_str),
    };

    let implementation_name = match explicit {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => config.implementation_name(&method.name),
    };

    Ok(WrapperConfiguration {
        hook,
        implementation_name,
    })
}

/// Extracts a descriptor, probing the hook type directly.
///
/// # Errors
///
/// See [`extract_with`].
pub fn extract(method: &HostMethod, config: &WeaverConfig) -> Result<Option<MethodDescriptor>> {
    extract_with(method, config, |hook| hooks::probe(hook, &config.hook_names))
}

/// Extracts a descriptor, obtaining hook capabilities from `capabilities`.
///
/// The generator passes a memoizing probe here so each hook type is probed once per run.
///
/// # Errors
///
/// Returns an error if the marker attribute is malformed, the partial declarations disagree
/// on accessibility, or the container chain exceeds the configured nesting depth.
pub fn extract_with<F>(
    method: &HostMethod,
    config: &WeaverConfig,
    capabilities: F,
) -> Result<Option<MethodDescriptor>>
where
    F: FnOnce(&HookType) -> HookCapabilities,
{
    let Some(attribute) = find_marker(method, config) else {
        debug!("{}: no wrapper attribute, skipping", method.name);
        return Ok(None);
    };

    if !structure::is_partial_chain(&method.containing_type) {
        debug!(
            "{}.{}: containing type chain is not partial, skipping",
            method.container_name(),
            method.name
        );
        return Ok(None);
    }

    if method.name.is_empty() {
        return Err(malformed_error!(
            "wrapped method in {} has an empty name",
            method.container_name()
        ));
    }

    let WrapperConfiguration {
        hook,
        implementation_name,
    } = read_configuration(method, attribute, config)?;

    let container = &method.containing_type;
    let return_kind = ReturnKind::classify(&method.return_type);
    let accessibility = accessibility::resolve(
        &method.name,
        &method.declarations,
        container.kind,
        return_kind,
    )?;
    let async_shape = asyncness::classify(return_kind, container, &implementation_name);
    let containers = structure::reconstruct(container, config.max_nesting_depth)?;
    let (type_parameters, constraint_clauses) = structure::method_constraints(method);

    let namespace = if container.is_global_namespace() {
        None
    } else {
        Some(container.namespace.clone())
    };

    Ok(Some(MethodDescriptor {
        name: method.name.clone(),
        containers,
        namespace,
        is_static: method.is_static,
        type_parameters,
        constraint_clauses,
        parameters: method
            .parameters
            .iter()
            .map(ParameterDescriptor::from)
            .collect(),
        return_kind,
        return_type_text: method.return_type.display.clone(),
        accessibility,
        async_shape,
        implementation_name,
        hook_type: hook.display_name.clone(),
        hooks: capabilities(&hook),
    }))
}
