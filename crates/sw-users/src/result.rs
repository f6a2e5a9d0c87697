//! Operation Outcome Type
//!
//! A tagged outcome used uniformly across both backends. `NotFound` is a
//! first-class state rather than a failure: point queries with zero matches
//! and idempotent deletes produce it, and callers are expected to branch on
//! it explicitly.

use crate::error::ApiError;

/// Outcome of a gateway call or of a whole orchestrated operation.
///
/// # Usage
///
/// ```ignore
/// match repo.find_by_username("alice").await {
///     ApiResult::Success(user) => println!("{}", user.guid),
///     ApiResult::NotFound(message) => println!("{}", message),
///     ApiResult::Failure(err) => return Err(err),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Success(T),
    /// Carries a message naming what was looked up
    NotFound(String),
    Failure(ApiError),
}

/// Unwraps a `Success` value or returns the non-success outcome from the
/// enclosing function, converting its payload type.
#[macro_export]
macro_rules! try_api {
    ($expr:expr) => {
        match $expr {
            $crate::ApiResult::Success(value) => value,
            $crate::ApiResult::NotFound(message) => {
                return $crate::ApiResult::NotFound(message)
            }
            $crate::ApiResult::Failure(error) => return $crate::ApiResult::Failure(error),
        }
    };
}

impl<T> ApiResult<T> {
    pub fn success(value: T) -> Self {
        ApiResult::Success(value)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiResult::NotFound(message.into())
    }

    pub fn failure(error: ApiError) -> Self {
        ApiResult::Failure(error)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiResult::NotFound(_))
    }

    /// True only for `Failure`; a not-found outcome is not an error.
    pub fn is_failure(&self) -> bool {
        matches!(self, ApiResult::Failure(_))
    }

    pub fn is_not_successful(&self) -> bool {
        !self.is_success()
    }

    /// Human-readable message for non-success outcomes, empty on success.
    pub fn message(&self) -> &str {
        match self {
            ApiResult::Success(_) => "",
            ApiResult::NotFound(message) => message,
            ApiResult::Failure(error) => error.message(),
        }
    }

    /// HTTP status behind a failure; 404 for not-found; 0 otherwise.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiResult::Success(_) => 0,
            ApiResult::NotFound(_) => 404,
            ApiResult::Failure(error) => error.status_code(),
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            ApiResult::Failure(error) => Some(error),
            _ => None,
        }
    }

    /// Get the success value, consuming self.
    pub fn unwrap(self) -> T {
        match self {
            ApiResult::Success(v) => v,
            ApiResult::NotFound(m) => panic!("Called unwrap on a NotFound: {}", m),
            ApiResult::Failure(e) => panic!("Called unwrap on a Failure: {}", e),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            ApiResult::Success(v) => Some(v),
            _ => None,
        }
    }

    /// Map the success value.
    pub fn map<U, F>(self, f: F) -> ApiResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ApiResult::Success(v) => ApiResult::Success(f(v)),
            ApiResult::NotFound(m) => ApiResult::NotFound(m),
            ApiResult::Failure(e) => ApiResult::Failure(e),
        }
    }

    pub fn and_then<U, F>(self, f: F) -> ApiResult<U>
    where
        F: FnOnce(T) -> ApiResult<U>,
    {
        match self {
            ApiResult::Success(v) => f(v),
            ApiResult::NotFound(m) => ApiResult::NotFound(m),
            ApiResult::Failure(e) => ApiResult::Failure(e),
        }
    }

    /// Convert to a standard Result, with not-found as `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        match self {
            ApiResult::Success(v) => Ok(Some(v)),
            ApiResult::NotFound(_) => Ok(None),
            ApiResult::Failure(e) => Err(e),
        }
    }
}

impl<T> From<ApiError> for ApiResult<T> {
    fn from(error: ApiError) -> Self {
        ApiResult::Failure(error)
    }
}

impl<T> From<Result<T, ApiError>> for ApiResult<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(v) => ApiResult::Success(v),
            Err(e) => ApiResult::Failure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_then_double(input: ApiResult<i32>) -> ApiResult<i32> {
        let value = try_api!(input);
        ApiResult::success(value * 2)
    }

    #[test]
    fn test_success_result() {
        let result: ApiResult<String> = ApiResult::success("test".to_string());
        assert!(result.is_success());
        assert!(!result.is_failure());
        assert_eq!(result.message(), "");
        assert_eq!(result.unwrap(), "test");
    }

    #[test]
    fn test_not_found_is_not_a_failure() {
        let result: ApiResult<()> = ApiResult::not_found("User my-user not found");
        assert!(result.is_not_found());
        assert!(!result.is_failure());
        assert!(result.is_not_successful());
        assert_eq!(result.status_code(), 404);
        assert_eq!(result.into_result(), Ok(None));
    }

    #[test]
    fn test_failure_result() {
        let result: ApiResult<()> =
            ApiResult::failure(ApiError::from_status(500, None, "boom"));
        assert!(result.is_failure());
        assert_eq!(result.message(), "boom");
        assert_eq!(result.status_code(), 500);
        assert!(result.error().is_some());
    }

    #[test]
    fn test_try_api_short_circuits() {
        assert_eq!(first_then_double(ApiResult::success(21)), ApiResult::Success(42));
        assert_eq!(
            first_then_double(ApiResult::not_found("gone")),
            ApiResult::NotFound("gone".to_string())
        );
        assert!(first_then_double(ApiResult::failure(ApiError::decode("bad"))).is_failure());
    }

    #[test]
    fn test_map_and_and_then() {
        let result: ApiResult<i32> = ApiResult::success(42);
        assert_eq!(result.map(|v| v + 1).unwrap(), 43);

        let chained = ApiResult::success(1).and_then(|_| ApiResult::<i32>::not_found("missing"));
        assert!(chained.is_not_found());
    }
}
