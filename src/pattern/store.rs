use crate::pattern::DenormalizedPattern;
use crate::types::PatternLayer;
use std::sync::Arc;

pub trait PatternSource {
    fn get_pattern(&self, name: &str) -> Option<&Arc<DenormalizedPattern>>;
}

impl PatternSource for PatternLayer {
    fn get_pattern(&self, name: &str) -> Option<&Arc<DenormalizedPattern>> {
        self.get(name)
    }
}

impl<T: PatternSource + ?Sized> PatternSource for Arc<T> {
    fn get_pattern(&self, name: &str) -> Option<&Arc<DenormalizedPattern>> {
        (**self).get_pattern(name)
    }
}

/// Ordered layers of denormalized patterns. The first layer holding a name wins;
/// [`PatternStore::set`] writes into the last layer.
#[derive(Debug, Clone, Default)]
pub struct PatternStore {
    layers: Vec<PatternLayer>,
}

impl PatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layers(layers: Vec<PatternLayer>) -> Self {
        Self { layers }
    }

    pub fn push_layer(&mut self, layer: PatternLayer) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[PatternLayer] {
        &self.layers
    }

    pub fn get(&self, name: &str) -> Option<&Arc<DenormalizedPattern>> {
        self.layers.iter().find_map(|layer| layer.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn set(&mut self, name: impl Into<String>, pattern: Arc<DenormalizedPattern>) {
        if self.layers.is_empty() {
            self.layers.push(PatternLayer::default());
        }
        if let Some(last) = self.layers.last_mut() {
            last.insert(name.into(), pattern);
        }
    }

    pub fn len(&self) -> usize {
        self.layers.iter().map(PatternLayer::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(PatternLayer::is_empty)
    }
}

impl PatternSource for PatternStore {
    fn get_pattern(&self, name: &str) -> Option<&Arc<DenormalizedPattern>> {
        self.get(name)
    }
}

impl From<PatternLayer> for PatternStore {
    fn from(layer: PatternLayer) -> Self {
        Self {
            layers: vec![layer],
        }
    }
}
