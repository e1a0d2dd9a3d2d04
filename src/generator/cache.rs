//! Incremental cache of weaving outcomes.
//!
//! Outcomes are keyed by a content hash of everything that determines them: the method
//! symbol with its declarations and attributes, the container chain with its members (which
//! covers the sibling implementation method), the hook type, and the configuration. A changed
//! input therefore yields a new key, and the stale entry is evicted at the end of the run.

use std::{collections::HashSet, sync::Arc};

use dashmap::DashMap;

use crate::{
    config::{HookNames, WeaverConfig},
    diagnostics::Diagnostic,
    model::{HookType, HostMethod},
    utils::ContentHash,
};

/// What weaving one candidate method produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// A wrapper body was emitted
    Woven,
    /// Accessibility conflict; a `#error` artifact was emitted
    Conflict,
    /// Malformed declaration; nothing was emitted
    Skipped,
}

/// The cached result of weaving one candidate method.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Classification of the result
    pub kind: OutcomeKind,
    /// `<ContainerName>.<MethodName>`, before collision suffixes
    pub identifier: String,
    /// Deterministic ordering key of the method
    pub sort_key: String,
    /// Emitted text, if any
    pub source: Option<String>,
    /// Diagnostic to report on every run, if any
    pub diagnostic: Option<Diagnostic>,
}

/// Computes the cache key of a method under a configuration.
#[must_use]
pub fn method_key(method: &HostMethod, config: &WeaverConfig) -> u64 {
    ContentHash::new()
        .add_component(method)
        .add_component(config)
        .finalize()
}

/// Computes the cache key of a hook type's capabilities.
#[must_use]
pub fn hook_key(hook: &HookType, names: &HookNames) -> u64 {
    ContentHash::new()
        .add_component(hook)
        .add_component(names)
        .finalize()
}

/// Thread-safe outcome cache shared by the workers of a run.
#[derive(Debug, Default)]
pub struct WeaveCache {
    entries: DashMap<u64, Arc<Outcome>>,
}

impl WeaveCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Looks up an outcome.
    #[must_use]
    pub fn get(&self, key: u64) -> Option<Arc<Outcome>> {
        self.entries.get(&key).map(|entry| Arc::clone(entry.value()))
    }

    /// Stores an outcome, replacing any previous one for the key.
    pub fn insert(&self, key: u64, outcome: Arc<Outcome>) {
        self.entries.insert(key, outcome);
    }

    /// Drops every entry whose key is not in `live`; returns the number evicted.
    pub fn retain_keys(&self, live: &HashSet<u64>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| live.contains(key));
        before.saturating_sub(self.entries.len())
    }

    /// Number of cached outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{HostMethodBuilder, TypeRef},
        test::{full_hook, full_hook_rc, partial_class},
    };

    fn outcome(identifier: &str) -> Arc<Outcome> {
        Arc::new(Outcome {
            kind: OutcomeKind::Woven,
            identifier: identifier.to_string(),
            sort_key: identifier.to_string(),
            source: Some(String::new()),
            diagnostic: None,
        })
    }

    #[test]
    fn test_method_key_tracks_changes() {
        let ty = partial_class("MyService");
        let hook = full_hook_rc();
        let config = WeaverConfig::default();

        let base = HostMethodBuilder::new("Add", &ty)
            .declaration(&["public", "partial"])
            .returns(TypeRef::int())
            .wrapped_by(&hook);
        let method = base.build();
        let same = HostMethodBuilder::new("Add", &ty)
            .declaration(&["public", "partial"])
            .returns(TypeRef::int())
            .wrapped_by(&hook)
            .build();
        let renamed_impl = HostMethodBuilder::new("Add", &ty)
            .declaration(&["public", "partial"])
            .returns(TypeRef::int())
            .wrapped_by_with_impl(&hook, "Sum")
            .build();

        let key = method_key(&method, &config);
        assert_eq!(key, method_key(&same, &config));
        assert_ne!(key, method_key(&renamed_impl, &config));
        assert_ne!(key, method_key(&method, &WeaverConfig::uncached()));
    }

    #[test]
    fn test_hook_key() {
        let names = HookNames::default();
        assert_eq!(hook_key(&full_hook(), &names), hook_key(&full_hook(), &names));
        assert_ne!(
            hook_key(&full_hook(), &names),
            hook_key(&HookType::new("MyApp.TestWrapper"), &names)
        );
    }

    #[test]
    fn test_cache_insert_get_retain() {
        let cache = WeaveCache::new();
        assert!(cache.is_empty());

        cache.insert(1, outcome("A.One"));
        cache.insert(2, outcome("A.Two"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(1).map(|o| o.identifier.clone()).as_deref(), Some("A.One"));
        assert!(cache.get(3).is_none());

        let live: HashSet<u64> = [2].into_iter().collect();
        assert_eq!(cache.retain_keys(&live), 1);
        assert!(cache.get(1).is_none());
        assert!(cache.get(2).is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
