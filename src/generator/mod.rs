//! The weaving pipeline.
//!
//! [`WrapperGenerator`] is the entry point a host integration drives. It is created once per
//! host session, emits the marker attribute declaration on [`WrapperGenerator::initialize`],
//! and is re-run with the current method symbols whenever the host's model changes.
//!
//! # Pipeline
//!
//! 1. **Discovery** keeps methods that carry the marker attribute inside fully partial
//!    container chains.
//! 2. **Processing** runs extraction and synthesis for each candidate, in parallel on the
//!    rayon pool unless configured otherwise. Outcomes of unchanged declarations come from
//!    the incremental cache.
//! 3. **Collection** orders outcomes by their sort key, assigns collision-free hint names,
//!    reports diagnostics and evicts stale cache entries and hook capabilities.
//!
//! # Examples
//!
//! ```rust
//! use dotweave::model::{HookType, HostMethodBuilder, HostTypeBuilder, MemberSymbol};
//! use dotweave::{WeaverConfig, WrapperGenerator};
//! use std::sync::Arc;
//!
//! let hook = Arc::new(
//!     HookType::new("MyApp.Trace").with_member(MemberSymbol::method("OnExit")),
//! );
//! let service = HostTypeBuilder::class("MyService")
//!     .namespace("MyApp")
//!     .modifiers(&["public", "partial"])
//!     .build();
//! let method = HostMethodBuilder::new("Ping", &service)
//!     .declaration(&["public", "partial"])
//!     .wrapped_by(&hook)
//!     .build();
//!
//! let generator = WrapperGenerator::new(WeaverConfig::default());
//! let run = generator.run(&[method]);
//!
//! assert_eq!(run.stats.emitted, 1);
//! assert!(run.source("MyService.Ping.g.cs").is_some());
//! ```

mod cache;
mod identity;

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use log::{debug, info, warn};
use rayon::prelude::*;

pub use cache::{hook_key, method_key, Outcome, OutcomeKind, WeaveCache};
pub use identity::{assign_hint_names, identifier_of, HINT_EXTENSION};

use crate::{
    config::WeaverConfig,
    descriptor::{extract, hooks, HookCapabilities},
    diagnostics::{Diagnostic, Diagnostics},
    model::{AttributeArgument, HookType, HostMethod},
    weave, Error,
};

/// What an artifact contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// The marker attribute declaration
    Attribute,
    /// A wrapper method body
    Wrapper,
    /// A `#error` stub for a method whose declarations conflict
    Conflict,
}

/// One emitted source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name handed to the host, unique within a run
    pub hint_name: String,
    /// Content classification
    pub kind: ArtifactKind,
    /// Source text
    pub source: String,
}

/// Counters describing one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Methods that passed discovery
    pub candidates: usize,
    /// Wrapper bodies emitted
    pub emitted: usize,
    /// Methods rejected for conflicting accessibility
    pub conflicts: usize,
    /// Methods skipped for a malformed declaration
    pub skipped: usize,
    /// Outcomes served from the cache
    pub cache_hits: usize,
    /// Outcomes computed in this run
    pub cache_misses: usize,
    /// Stale cache entries dropped at the end of the run
    pub evicted: usize,
}

/// The result of [`WrapperGenerator::run`].
#[derive(Debug)]
pub struct GeneratorRun {
    /// Artifacts keyed and ordered by hint name
    pub artifacts: SkipMap<String, Artifact>,
    /// Diagnostics raised for the processed methods
    pub diagnostics: Diagnostics,
    /// Run counters
    pub stats: RunStats,
}

impl GeneratorRun {
    /// The source text of the artifact with the given hint name.
    #[must_use]
    pub fn source(&self, hint_name: &str) -> Option<String> {
        self.artifacts
            .get(hint_name)
            .map(|entry| entry.value().source.clone())
    }

    /// All hint names, in order.
    #[must_use]
    pub fn hint_names(&self) -> Vec<String> {
        self.artifacts.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Artifacts emitted for a `<ContainerName>.<MethodName>` identifier, including the
    /// collision-suffixed ones.
    #[must_use]
    pub fn artifacts_for(&self, identifier: &str) -> Vec<Artifact> {
        self.artifacts
            .iter()
            .filter(|entry| identifier_of(entry.key()) == identifier)
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Number of artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns `true` if nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// Drives discovery, extraction, synthesis and caching for a set of method symbols.
#[derive(Debug, Default)]
pub struct WrapperGenerator {
    config: WeaverConfig,
    cache: WeaveCache,
    hooks: DashMap<u64, HookCapabilities>,
}

impl WrapperGenerator {
    /// Creates a generator with an empty cache.
    #[must_use]
    pub fn new(config: WeaverConfig) -> Self {
        WrapperGenerator {
            config,
            cache: WeaveCache::new(),
            hooks: DashMap::new(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &WeaverConfig {
        &self.config
    }

    /// Number of cached outcomes.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Drops all cached outcomes and hook capabilities.
    pub fn clear_cache(&self) {
        self.cache.clear();
        self.hooks.clear();
    }

    /// The fixed artifact declaring the marker attribute.
    ///
    /// Hosts emit it once, before the first [`WrapperGenerator::run`].
    #[must_use]
    pub fn initialize(&self) -> Artifact {
        Artifact {
            hint_name: weave::attribute_hint_name(&self.config),
            kind: ArtifactKind::Attribute,
            source: weave::attribute_source(&self.config),
        }
    }

    /// Hook capabilities of `hook`, probed once per distinct hook type.
    pub fn capabilities(&self, hook: &HookType) -> HookCapabilities {
        let key = hook_key(hook, &self.config.hook_names);
        *self
            .hooks
            .entry(key)
            .or_insert_with(|| hooks::probe(hook, &self.config.hook_names))
    }

    /// Extracts and synthesizes a single method without consulting the cache.
    ///
    /// Returns `None` for a filtering miss.
    #[must_use]
    pub fn weave(&self, method: &HostMethod) -> Option<Outcome> {
        let identifier = format!("{}.{}", method.container_name(), method.name);
        let sort_key = method.sort_key();

        match extract::extract_with(method, &self.config, |hook| self.capabilities(hook)) {
            Ok(None) => None,
            Ok(Some(descriptor)) => Some(Outcome {
                kind: OutcomeKind::Woven,
                source: Some(weave::synthesize(&descriptor, &self.config)),
                identifier,
                sort_key,
                diagnostic: None,
            }),
            Err(error @ Error::AccessibilityConflict { .. }) => {
                warn!("{identifier}: {error}");
                Some(Outcome {
                    kind: OutcomeKind::Conflict,
                    source: Some(weave::conflict_stub(&method.name)),
                    diagnostic: Some(Diagnostic::from_error(&error, &identifier)),
                    identifier,
                    sort_key,
                })
            }
            Err(error) => {
                warn!("{identifier}: {error}, skipping");
                Some(Outcome {
                    kind: OutcomeKind::Skipped,
                    source: None,
                    diagnostic: Some(Diagnostic::from_error(&error, &identifier)),
                    identifier,
                    sort_key,
                })
            }
        }
    }

    fn process(
        &self,
        method: &HostMethod,
        hits: &AtomicUsize,
        misses: &AtomicUsize,
    ) -> Option<(u64, Arc<Outcome>)> {
        if !self.config.incremental {
            misses.fetch_add(1, Ordering::Relaxed);
            return self.weave(method).map(|outcome| (0, Arc::new(outcome)));
        }

        let key = method_key(method, &self.config);
        if let Some(outcome) = self.cache.get(key) {
            debug!("{}: unchanged, reusing cached output", outcome.identifier);
            hits.fetch_add(1, Ordering::Relaxed);
            return Some((key, outcome));
        }

        misses.fetch_add(1, Ordering::Relaxed);
        let outcome = Arc::new(self.weave(method)?);
        self.cache.insert(key, Arc::clone(&outcome));
        Some((key, outcome))
    }

    /// Weaves every candidate among `methods`.
    ///
    /// Methods that are not candidates are ignored. Malformed and conflicting declarations
    /// are reported through [`GeneratorRun::diagnostics`] and never affect other methods.
    #[must_use]
    pub fn run(&self, methods: &[HostMethod]) -> GeneratorRun {
        let candidates: Vec<&HostMethod> = methods
            .iter()
            .filter(|method| extract::is_candidate(method, &self.config))
            .collect();

        let hits = AtomicUsize::new(0);
        let misses = AtomicUsize::new(0);

        let mut outcomes: Vec<(u64, Arc<Outcome>)> = if self.config.parallel {
            candidates
                .par_iter()
                .filter_map(|method| self.process(method, &hits, &misses))
                .collect()
        } else {
            candidates
                .iter()
                .filter_map(|method| self.process(method, &hits, &misses))
                .collect()
        };

        outcomes.sort_by(|(_, a), (_, b)| {
            a.sort_key
                .cmp(&b.sort_key)
                .then_with(|| a.identifier.cmp(&b.identifier))
        });

        let mut stats = RunStats {
            candidates: candidates.len(),
            cache_hits: hits.into_inner(),
            cache_misses: misses.into_inner(),
            ..RunStats::default()
        };

        if self.config.incremental {
            let live: HashSet<u64> = outcomes.iter().map(|(key, _)| *key).collect();
            stats.evicted = self.cache.retain_keys(&live);
        }

        // Cache hits skip probing, so live hook types are read from the markers
        let live_hooks: HashSet<u64> = candidates
            .iter()
            .filter_map(|method| extract::find_marker(method, &self.config))
            .filter_map(|marker| marker.fixed_args.first())
            .filter_map(AttributeArgument::as_type)
            .map(|hook| hook_key(hook, &self.config.hook_names))
            .collect();
        self.hooks.retain(|key, _| live_hooks.contains(key));

        let diagnostics = Diagnostics::new();
        let artifacts = SkipMap::new();

        // Skipped methods emit nothing, so they take no part in name assignment
        let emitting: Vec<&Outcome> = outcomes
            .iter()
            .map(|(_, outcome)| outcome.as_ref())
            .filter(|outcome| outcome.source.is_some())
            .collect();
        let hint_names = assign_hint_names(
            emitting
                .iter()
                .map(|outcome| (outcome.sort_key.as_str(), outcome.identifier.as_str())),
        );

        for (outcome, hint_name) in emitting.iter().zip(hint_names) {
            let kind = match outcome.kind {
                OutcomeKind::Conflict => ArtifactKind::Conflict,
                _ => ArtifactKind::Wrapper,
            };
            if let Some(source) = &outcome.source {
                artifacts.insert(
                    hint_name.clone(),
                    Artifact {
                        hint_name,
                        kind,
                        source: source.clone(),
                    },
                );
            }
        }

        for (_, outcome) in &outcomes {
            match outcome.kind {
                OutcomeKind::Woven => stats.emitted += 1,
                OutcomeKind::Conflict => stats.conflicts += 1,
                OutcomeKind::Skipped => stats.skipped += 1,
            }
            if let Some(diagnostic) = &outcome.diagnostic {
                diagnostics.push(diagnostic.clone());
            }
        }

        info!(
            "wove {} of {} candidate methods ({} conflicts, {} skipped, {} cache hits, {} evicted)",
            stats.emitted,
            stats.candidates,
            stats.conflicts,
            stats.skipped,
            stats.cache_hits,
            stats.evicted
        );

        GeneratorRun {
            artifacts,
            diagnostics,
            stats,
        }
    }
}
