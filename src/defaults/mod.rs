mod table;

pub use table::DEFAULT_PATTERNS;

use crate::errors::{GrokError, GrokResult};
use crate::resolver::resolve;
use crate::types::{Definitions, PatternLayer};
use std::sync::{Arc, OnceLock};

static DEFAULT_LAYER: OnceLock<Result<Arc<PatternLayer>, Vec<String>>> = OnceLock::new();

pub fn default_definitions() -> Definitions {
    DEFAULT_PATTERNS
        .iter()
        .map(|(name, body)| (name.to_string(), body.to_string()))
        .collect()
}

pub fn default_patterns() -> GrokResult<Arc<PatternLayer>> {
    let outcome = DEFAULT_LAYER.get_or_init(|| {
        let resolution = resolve(DEFAULT_PATTERNS.iter().copied(), &[]);
        if resolution.is_complete() {
            Ok(Arc::new(resolution.resolved))
        } else {
            Err(resolution.failure_messages())
        }
    });

    match outcome {
        Ok(layer) => Ok(Arc::clone(layer)),
        Err(failures) => Err(GrokError::DefaultPatterns {
            failures: failures.clone(),
        }),
    }
}
