//! Mapping SDK errors onto [`StorageError`].

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use bc_error::StorageError;

const NOT_FOUND_CODES: &[&str] = &["NotFound", "NoSuchKey"];
const ACCESS_DENIED_CODES: &[&str] = &["AccessDenied", "Forbidden"];
const THROTTLE_CODES: &[&str] = &[
    "SlowDown",
    "Throttling",
    "ThrottlingException",
    "TooManyRequests",
    "RequestLimitExceeded",
];

/// Map an SDK error for `key` to a [`StorageError`].
///
/// Service responses are classified by HTTP status and error code. Errors
/// that never produced a response (dispatch failure, timeout, construction)
/// become [`StorageError::Transport`].
pub fn map_sdk_error<E>(error: &SdkError<E>, key: &str) -> StorageError
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
{
    let status = error.raw_response().map(|response| response.status().as_u16());

    match error {
        SdkError::ServiceError(context) => {
            let err = context.err();
            classify_response(status, err.code(), err.message(), key)
        }
        SdkError::ResponseError(_) => {
            let detail = DisplayErrorContext(error).to_string();
            classify_response(status, None, Some(&detail), key)
        }
        _ => StorageError::Transport(DisplayErrorContext(error).to_string()),
    }
}

/// Classify a service response by status, error code and message.
pub fn classify_response(
    status: Option<u16>,
    code: Option<&str>,
    message: Option<&str>,
    key: &str,
) -> StorageError {
    let detail = match message {
        Some(m) if !m.is_empty() => format!("{key}: {m}"),
        _ => key.to_string(),
    };

    let code_is = |codes: &[&str]| code.is_some_and(|c| codes.contains(&c));

    if status == Some(404) || code_is(NOT_FOUND_CODES) {
        return StorageError::NotFound(detail);
    }
    if status == Some(403) || code_is(ACCESS_DENIED_CODES) {
        return StorageError::AccessDenied(detail);
    }
    if matches!(status, Some(429) | Some(503)) || code_is(THROTTLE_CODES) {
        return StorageError::Throttled(detail);
    }

    StorageError::Service {
        code: code
            .map(str::to_string)
            .or_else(|| status.map(|s| format!("HTTP {s}")))
            .unwrap_or_else(|| "Unknown".to_string()),
        message: detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_by_status_or_code() {
        // HEAD responses carry no body, so only the status is known.
        assert!(classify_response(Some(404), None, None, "a.csv").is_not_found());
        assert!(classify_response(None, Some("NoSuchKey"), None, "a.csv").is_not_found());
        assert!(classify_response(Some(400), Some("NotFound"), None, "a.csv").is_not_found());
    }

    #[test]
    fn test_access_denied() {
        assert_eq!(
            classify_response(Some(403), None, None, "a.csv"),
            StorageError::AccessDenied("a.csv".to_string())
        );
        assert_eq!(
            classify_response(None, Some("AccessDenied"), Some("Access Denied"), "a.csv"),
            StorageError::AccessDenied("a.csv: Access Denied".to_string())
        );
    }

    #[test]
    fn test_throttling() {
        assert!(matches!(
            classify_response(Some(503), Some("SlowDown"), None, "k"),
            StorageError::Throttled(_)
        ));
        assert!(matches!(
            classify_response(Some(429), None, None, "k"),
            StorageError::Throttled(_)
        ));
        assert!(matches!(
            classify_response(Some(400), Some("Throttling"), None, "k"),
            StorageError::Throttled(_)
        ));
    }

    #[test]
    fn test_other_service_errors() {
        assert_eq!(
            classify_response(Some(500), Some("InternalError"), Some("try again"), "k"),
            StorageError::Service {
                code: "InternalError".to_string(),
                message: "k: try again".to_string(),
            }
        );
        assert_eq!(
            classify_response(Some(400), None, None, "k"),
            StorageError::Service {
                code: "HTTP 400".to_string(),
                message: "k".to_string(),
            }
        );
        assert_eq!(
            classify_response(None, None, None, "k"),
            StorageError::Service {
                code: "Unknown".to_string(),
                message: "k".to_string(),
            }
        );
    }
}
