use crate::matcher::Matcher;
use hashbrown::HashMap as FastHashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct MatcherCache {
    capacity: usize,
    map: FastHashMap<String, Arc<Matcher>>,
    order: VecDeque<String>,
}

impl MatcherCache {
    pub fn new(capacity: usize) -> Self {
        let cap = capacity.max(1);
        Self {
            capacity: cap,
            map: FastHashMap::with_capacity(cap),
            order: VecDeque::with_capacity(cap),
        }
    }

    pub fn peek(&self, query: &str) -> Option<Arc<Matcher>> {
        self.map.get(query).cloned()
    }

    pub fn touch(&mut self, query: &str) {
        if self.map.contains_key(query) {
            self.promote(query);
        }
    }

    pub fn insert(&mut self, query: String, matcher: Arc<Matcher>) {
        if let Some(entry) = self.map.get_mut(&query) {
            *entry = matcher;
            self.promote(&query);
            return;
        }

        if self.order.len() == self.capacity
            && let Some(oldest) = self.order.pop_back()
        {
            self.map.remove(&oldest);
        }

        self.order.push_front(query.clone());
        self.map.insert(query, matcher);
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn promote(&mut self, query: &str) {
        if let Some(pos) = self.order.iter().position(|existing| existing == query) {
            if let Some(key) = self.order.remove(pos) {
                self.order.push_front(key);
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStats {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::DenormalizedPattern;

    fn matcher(expr: &str) -> Arc<Matcher> {
        Arc::new(
            Matcher::compile(Arc::new(DenormalizedPattern::literal(expr)))
                .expect("literal should compile"),
        )
    }

    #[test]
    fn peek_returns_value_without_changing_order() {
        let mut cache = MatcherCache::new(4);
        cache.insert("first".to_string(), matcher("a"));
        cache.insert("second".to_string(), matcher("b"));

        let hit = cache.peek("first").expect("entry should be cached");
        assert_eq!(hit.regex().as_str(), "a");
        assert_eq!(cache.order.front().map(String::as_str), Some("second"));
    }

    #[test]
    fn touch_promotes_entry_to_front() {
        let mut cache = MatcherCache::new(4);
        cache.insert("first".to_string(), matcher("a"));
        cache.insert("second".to_string(), matcher("b"));

        cache.touch("first");
        assert_eq!(cache.order.front().map(String::as_str), Some("first"));
    }

    #[test]
    fn insert_beyond_capacity_evicts_least_recent() {
        let mut cache = MatcherCache::new(2);
        cache.insert("first".to_string(), matcher("a"));
        cache.insert("second".to_string(), matcher("b"));
        cache.touch("first");
        cache.insert("third".to_string(), matcher("c"));

        assert_eq!(cache.len(), 2);
        assert!(cache.peek("second").is_none());
        assert!(cache.peek("first").is_some());
        assert!(cache.peek("third").is_some());

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn stats_count_hits_and_misses() {
        let stats = CacheStats::default();
        stats.record_miss();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.snapshot(), (2, 1));
    }
}
