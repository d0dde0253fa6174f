use crate::pattern::PatternStore;
use crate::types::PatternLayer;
use hashbrown::HashMap as FastHashMap;

use super::ResolveError;

/// Outcome of a batch resolution. Every input name lands in exactly one of the
/// two maps.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub resolved: PatternLayer,
    pub failed: FastHashMap<String, ResolveError>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn into_parts(self) -> (PatternLayer, FastHashMap<String, ResolveError>) {
        (self.resolved, self.failed)
    }

    pub fn failure_messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self
            .failed
            .iter()
            .map(|(name, err)| format!("{name}: {err}"))
            .collect();
        messages.sort();
        messages
    }

    pub fn into_store(self) -> PatternStore {
        PatternStore::from(self.resolved)
    }
}
