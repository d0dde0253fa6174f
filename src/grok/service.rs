use crate::defaults::default_patterns;
use crate::errors::{GrokError, GrokResult};
use crate::matcher::Matcher;
use crate::pattern::{DenormalizedPattern, PatternSource, PatternStore, denormalize, lookup};
use crate::resolver::{ResolveError, resolve};
use crate::types::PatternLayer;
use crate::value::Value;
use hashbrown::HashMap as FastHashMap;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use smallvec::SmallVec;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::cache::{CacheStats, MatcherCache};
use super::options::GrokOptions;

/// User patterns layered over the shared built-in patterns, with a cache of
/// compiled matchers. User patterns shadow built-ins of the same name.
#[derive(Debug)]
pub struct Grok {
    store: RwLock<Arc<PatternStore>>,
    generation: AtomicU64,
    defaults: Option<Arc<PatternLayer>>,
    cache: Option<RwLock<MatcherCache>>,
    cache_stats: Option<CacheStats>,
    options: GrokOptions,
}

impl Grok {
    pub fn new(options: Option<GrokOptions>) -> GrokResult<Self> {
        let options = options.unwrap_or_default();
        options.validate()?;

        let defaults = if options.with_defaults {
            Some(default_patterns()?)
        } else {
            None
        };
        let cache = options
            .cache_matchers
            .then(|| RwLock::new(MatcherCache::new(options.cache_capacity)));
        let cache_stats = cache.as_ref().map(|_| CacheStats::default());

        Ok(Self {
            store: RwLock::new(Arc::new(PatternStore::from(PatternLayer::default()))),
            generation: AtomicU64::new(0),
            defaults,
            cache,
            cache_stats,
            options,
        })
    }

    pub fn options(&self) -> &GrokOptions {
        &self.options
    }

    pub fn add_pattern(&self, name: &str, body: &str) -> GrokResult<()> {
        let mut guard = self.store.write();

        let pattern = self
            .with_sources(&guard, |sources| denormalize(body, sources))
            .map_err(|source| GrokError::AddPattern {
                name: name.to_string(),
                source,
            })?;

        Arc::make_mut(&mut *guard).set(name, Arc::new(pattern));
        self.invalidate_cache();

        Ok(())
    }

    /// Resolves a batch of interdependent definitions on top of the known
    /// patterns. Resolved definitions are stored; failures are returned.
    pub fn add_patterns<I, K, V>(&self, definitions: I) -> FastHashMap<String, ResolveError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut guard = self.store.write();

        let resolution = self.with_sources(&guard, |sources| resolve(definitions, sources));
        let (resolved, failed) = resolution.into_parts();

        if !resolved.is_empty() {
            let store = Arc::make_mut(&mut *guard);
            for (name, pattern) in resolved {
                store.set(name, pattern);
            }
            self.invalidate_cache();
        }

        failed
    }

    pub fn pattern(&self, name: &str) -> Option<Arc<DenormalizedPattern>> {
        let store = self.snapshot();
        self.with_sources(&store, |sources| lookup(name, sources).cloned())
    }

    pub fn denormalize(&self, query: &str) -> GrokResult<DenormalizedPattern> {
        let store = self.snapshot();
        let pattern = self.with_sources(&store, |sources| denormalize(query, sources))?;
        Ok(pattern)
    }

    #[tracing::instrument(level = "trace", skip(self, query), fields(query=%query))]
    pub fn compile(&self, query: &str) -> GrokResult<Arc<Matcher>> {
        if let Some(cache) = self.cache.as_ref() {
            let guard = cache.upgradable_read();
            if let Some(hit) = guard.peek(query) {
                self.record_cache_lookup(query, true);
                let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
                guard.touch(query);
                return Ok(hit);
            }
            self.record_cache_lookup(query, false);
        }

        // no lock is held while the expression is built
        let generation = self.generation.load(Ordering::Acquire);
        let store = self.snapshot();
        let pattern = self.with_sources(&store, |sources| denormalize(query, sources))?;
        let matcher = Arc::new(Matcher::compile_with(
            Arc::new(pattern),
            &self.options.matcher_options(),
        )?);

        if let Some(cache) = self.cache.as_ref() {
            let mut guard = cache.write();
            if self.generation.load(Ordering::Acquire) == generation {
                guard.insert(query.to_string(), Arc::clone(&matcher));
            }
        }

        Ok(matcher)
    }
    pub fn parse(&self, query: &str, text: &str) -> GrokResult<FastHashMap<String, String>> {
        let matcher = self.compile(query)?;
        let values = matcher.match_text(text, self.options.trim_space)?;
        Ok(matcher.names().iter().cloned().zip(values).collect())
    }

    pub fn parse_typed(
        &self,
        query: &str,
        text: &str,
    ) -> GrokResult<FastHashMap<String, Value>> {
        let matcher = self.compile(query)?;
        let values = matcher.match_typed(text, self.options.trim_space)?;
        Ok(matcher.names().iter().cloned().zip(values).collect())
    }

    pub fn cache_metrics(&self) -> Option<(u64, u64)> {
        self.cache_stats.as_ref().map(|stats| stats.snapshot())
    }

    fn with_sources<R>(
        &self,
        store: &PatternStore,
        f: impl FnOnce(&[&dyn PatternSource]) -> R,
    ) -> R {
        let mut sources: SmallVec<[&dyn PatternSource; 2]> = SmallVec::new();
        sources.push(store);
        if let Some(defaults) = self.defaults.as_deref() {
            sources.push(defaults);
        }
        f(sources.as_slice())
    }

    fn snapshot(&self) -> Arc<PatternStore> {
        Arc::clone(&*self.store.read())
    }

    // bumped before the clear so a matcher built from an older store is never cached
    fn invalidate_cache(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(cache) = self.cache.as_ref() {
            cache.write().clear();
        }
    }

    fn record_cache_lookup(&self, query: &str, hit: bool) {
        if let Some(stats) = &self.cache_stats {
            if hit {
                stats.record_hit();
            } else {
                stats.record_miss();
            }
        }
        if self.options.debug {
            tracing::event!(
                tracing::Level::DEBUG,
                cache = if hit { "hit" } else { "miss" },
                query = %query,
                "matcher cache lookup"
            );
        }
    }
}
