//! Weaver configuration
//!
//! This module provides the options that shape discovery and emission: which attribute marks
//! a method for wrapping, how the implementation method is named by convention, the hook
//! member names probed on the hook type, and how the run is scheduled.

/// Namespace the marker attribute is declared in by default.
pub const DEFAULT_ATTRIBUTE_NAMESPACE: &str = "DotWeave";
/// Class name of the marker attribute by default.
pub const DEFAULT_ATTRIBUTE_NAME: &str = "WrapperAttribute";
/// Suffix appended to the method name to form the conventional implementation name.
pub const DEFAULT_IMPLEMENTATION_SUFFIX: &str = "_Implementation";
/// Named attribute argument that overrides the implementation name.
pub const IMPLEMENTATION_NAME_OPTION: &str = "ImplementationMethodName";

/// Fully qualified name of the default marker attribute.
#[must_use]
pub fn default_attribute_full_name() -> String {
    format!("{DEFAULT_ATTRIBUTE_NAMESPACE}.{DEFAULT_ATTRIBUTE_NAME}")
}

/// Member names probed on the hook type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HookNames {
    /// Called before the forwarding call
    pub on_enter: String,
    /// Called after the forwarding call, on success and failure
    pub on_exit: String,
    /// Called when the forwarding call raises
    pub on_error: String,
}

impl Default for HookNames {
    fn default() -> Self {
        Self {
            on_enter: "OnEnter".to_string(),
            on_exit: "OnExit".to_string(),
            on_error: "OnError".to_string(),
        }
    }
}

/// Configuration for a [`crate::WrapperGenerator`]
///
/// The configuration is part of every cache key, so changing any option invalidates all
/// cached artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct WeaverConfig {
    /// Namespace of the marker attribute, also used for the emitted attribute declaration
    pub attribute_namespace: String,

    /// Class name of the marker attribute
    pub attribute_name: String,

    /// Suffix of the conventional implementation method name (`Add` -> `Add_Implementation`)
    pub implementation_suffix: String,

    /// Hook member names
    pub hook_names: HookNames,

    /// Spaces per indentation level in emitted text (default: 4)
    pub indent_width: usize,

    /// Maximum number of containers around a method before it is rejected (default: 64)
    pub max_nesting_depth: usize,

    /// Process candidates on the rayon thread pool
    pub parallel: bool,

    /// Reuse artifacts of unchanged declarations across runs
    pub incremental: bool,
}

impl Default for WeaverConfig {
    fn default() -> Self {
        Self {
            attribute_namespace: DEFAULT_ATTRIBUTE_NAMESPACE.to_string(),
            attribute_name: DEFAULT_ATTRIBUTE_NAME.to_string(),
            implementation_suffix: DEFAULT_IMPLEMENTATION_SUFFIX.to_string(),
            hook_names: HookNames::default(),
            indent_width: 4,
            max_nesting_depth: 64,
            parallel: true,
            incremental: true,
        }
    }
}

impl WeaverConfig {
    /// Creates a configuration that processes candidates on the calling thread
    ///
    /// Useful for deterministic logging and for hosts that already parallelize per project.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Creates a configuration that recomputes every artifact on each run
    #[must_use]
    pub fn uncached() -> Self {
        Self {
            incremental: false,
            ..Self::default()
        }
    }

    /// Fully qualified name of the marker attribute.
    #[must_use]
    pub fn attribute_full_name(&self) -> String {
        if self.attribute_namespace.is_empty() {
            self.attribute_name.clone()
        } else {
            format!("{}.{}", self.attribute_namespace, self.attribute_name)
        }
    }

    /// The conventional implementation name for a method.
    #[must_use]
    pub fn implementation_name(&self, method: &str) -> String {
        format!("{method}{}", self.implementation_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weaver_config_presets() {
        let default = WeaverConfig::default();
        assert!(default.parallel);
        assert!(default.incremental);
        assert_eq!(default.indent_width, 4);

        let sequential = WeaverConfig::sequential();
        assert!(!sequential.parallel);
        assert!(sequential.incremental);

        let uncached = WeaverConfig::uncached();
        assert!(uncached.parallel);
        assert!(!uncached.incremental);
    }

    #[test]
    fn test_attribute_full_name() {
        let mut config = WeaverConfig::default();
        assert_eq!(config.attribute_full_name(), "DotWeave.WrapperAttribute");
        assert_eq!(config.attribute_full_name(), default_attribute_full_name());

        config.attribute_namespace.clear();
        assert_eq!(config.attribute_full_name(), "WrapperAttribute");
    }

    #[test]
    fn test_implementation_name() {
        let config = WeaverConfig::default();
        assert_eq!(config.implementation_name("Add"), "Add_Implementation");
    }
}
