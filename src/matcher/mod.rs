mod captures;
mod compiled;
mod error;
mod options;

pub use captures::CaptureIndex;
pub use compiled::Matcher;
pub use error::{MatcherError, MatcherResult};
pub use options::MatcherOptions;
