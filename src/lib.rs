pub mod defaults;
pub mod enums;
pub mod errors;
pub mod grok;
pub mod matcher;
pub mod pattern;
pub mod resolver;
pub mod types;
pub mod value;

pub use defaults::{DEFAULT_PATTERNS, default_definitions, default_patterns};
pub use enums::FieldType;
pub use errors::{GrokError, GrokResult};
pub use grok::{Grok, GrokOptions, GrokOptionsBuilder, GrokOptionsError};
pub use matcher::{Matcher, MatcherError, MatcherOptions, MatcherResult};
pub use pattern::{
    DenormalizedPattern, PatternError, PatternResult, PatternSource, PatternStore, denormalize,
};
pub use resolver::{Resolution, ResolveError, ResolveResult, resolve};
pub use types::{Definitions, FieldTypes, PatternLayer, PatternName};
pub use value::{CoerceError, CoerceResult, Value};
