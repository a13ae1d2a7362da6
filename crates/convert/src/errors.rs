use itertools::Itertools;

use crate::scope::Path;

/// A single conversion failure, located by the field path at which it
/// occurred. Failures never abort the surrounding walk; they are
/// collected into [`Errors`] so that every offending field of a written
/// resource is reported in one pass.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{path}: invalid duration {value:?}: {source}")]
    InvalidDuration {
        path: Path,
        value: String,
        #[source]
        source: policy::ParseDurationError,
    },
    #[error("{path}: unknown matcher type {type_:?}")]
    UnknownMatcherType { path: Path, type_: String },
    #[error("{path}: invalid matcher: {source}")]
    InvalidMatcher {
        path: Path,
        #[source]
        source: policy::MatcherError,
    },
    #[error("{path}: routes are nested deeper than the supported {max} levels")]
    DepthExceeded { path: Path, max: usize },
    #[error("{path}: routes nested deeper than {max} levels are not representable and were dropped")]
    Truncated { path: Path, max: usize },
}

impl Error {
    pub fn path(&self) -> &Path {
        match self {
            Error::InvalidDuration { path, .. }
            | Error::UnknownMatcherType { path, .. }
            | Error::InvalidMatcher { path, .. }
            | Error::DepthExceeded { path, .. }
            | Error::Truncated { path, .. } => path,
        }
    }
}

/// An ordered collection of conversion failures. Walks push into it and
/// keep going; the conversion entry points turn a non-empty collection
/// into an all-or-nothing rejection.
#[must_use]
#[derive(Debug, Default)]
pub struct Errors(Vec<Error>);

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: Error) {
        self.0.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.0.iter()
    }

    /// Resolve into `ok` if nothing was collected, or the collection.
    pub fn into_result<T>(self, ok: T) -> Result<T, Errors> {
        if self.0.is_empty() {
            Ok(ok)
        } else {
            Err(self)
        }
    }
}

impl Extend<Error> for Errors {
    fn extend<I: IntoIterator<Item = Error>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl IntoIterator for Errors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Display for Errors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

impl std::error::Error for Errors {}
