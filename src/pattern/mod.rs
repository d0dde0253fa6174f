mod denormalize;
mod denormalized;
mod error;
mod store;
mod token;

pub(crate) use denormalize::lookup;
pub use denormalize::denormalize;
pub use denormalized::DenormalizedPattern;
pub use error::{PatternError, PatternResult};
pub use store::{PatternSource, PatternStore};
pub use token::{Reference, TokenScanner, TokenSpan, parse_reference, referenced_syntax, scan_tokens};
