mod cache;
mod options;
mod service;

pub use cache::{CacheStats, MatcherCache};
pub use options::{DEFAULT_CACHE_CAPACITY, GrokOptions, GrokOptionsBuilder, GrokOptionsError};
pub use service::Grok;
