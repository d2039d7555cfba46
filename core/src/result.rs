//! The single value every repository fetch resolves to.

use crate::error::ApiError;

/// Outcome of one fetch: data, or an optional human-readable reason.
///
/// A failure never carries partial data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult<T> {
    Success(T),
    Failure(Option<String>),
}

impl<T> FetchResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        match self {
            FetchResult::Success(data) => FetchResult::Success(f(data)),
            FetchResult::Failure(msg) => FetchResult::Failure(msg),
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            FetchResult::Success(data) => Some(data),
            FetchResult::Failure(_) => None,
        }
    }
}

impl<T> From<Result<T, ApiError>> for FetchResult<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => FetchResult::Success(data),
            Err(e) => FetchResult::Failure(e.message()),
        }
    }
}
