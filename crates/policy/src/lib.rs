mod duration;
mod matcher;
mod route;

pub use duration::{Duration, ParseDurationError};
pub use matcher::{MatchOperator, Matcher, MatcherError, Pattern};
pub use route::{LegacyMatchers, Route};
