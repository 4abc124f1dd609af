//! Error handling for the payments API module

use crate::logging::LogLevel;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to decode a JSON body from the server
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP error with status {status}: {message}")]
    Http {
        status: u16,
        message: String,
        /// The `detail` field of the error body, when present
        detail: Option<String>,
    },
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        Self::from_status_and_body(status, message)
    }

    pub fn from_status_and_body(status: u16, message: String) -> ApiError {
        let detail = extract_detail(&message);
        ApiError::Http {
            status,
            message,
            detail,
        }
    }

    /// The server-provided explanation, if the error body carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Short reason suitable for the dashboard's error banner.
    pub fn user_message(&self) -> String {
        if let Some(detail) = self.detail() {
            return detail.to_string();
        }
        match self {
            ApiError::Http { status, .. } => format!("HTTP {}", status),
            ApiError::Reqwest(e) if e.is_timeout() => "request timed out".to_string(),
            ApiError::Reqwest(e) if e.is_connect() => "API unreachable".to_string(),
            ApiError::Reqwest(_) => "network error".to_string(),
            ApiError::Decode(_) => "malformed response".to_string(),
        }
    }

    /// Classify error and determine appropriate log level
    pub fn log_level(&self) -> LogLevel {
        match self {
            // Rate limiting - low priority
            ApiError::Http { status, .. } if *status == 429 => LogLevel::Debug,

            // Server errors - temporary issues
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Authentication errors - critical
            ApiError::Http { status, .. } if *status == 401 || *status == 403 => LogLevel::Error,

            // Network issues - usually temporary
            ApiError::Reqwest(_) => LogLevel::Warn,

            // The server sent something we cannot read
            ApiError::Decode(_) => LogLevel::Error,

            // Other errors
            _ => LogLevel::Warn,
        }
    }
}

/// Pull the `detail` field out of a JSON error body.
///
/// Validation errors carry a structured `detail`; those are kept as compact JSON.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_is_extracted_from_json_body() {
        let err = ApiError::from_status_and_body(
            400,
            r#"{"detail":"count must be positive"}"#.to_string(),
        );
        assert_eq!(err.detail(), Some("count must be positive"));
        assert_eq!(err.user_message(), "count must be positive");
    }

    #[test]
    fn test_non_json_body_falls_back_to_status() {
        let err = ApiError::from_status_and_body(500, "Internal Server Error".to_string());
        assert_eq!(err.detail(), None);
        assert_eq!(err.user_message(), "HTTP 500");
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_structured_detail_is_kept_as_json() {
        let err = ApiError::from_status_and_body(
            422,
            r#"{"detail":[{"loc":["query","count"],"msg":"field required"}]}"#.to_string(),
        );
        assert!(err.detail().unwrap().contains("field required"));
    }

    #[test]
    fn test_log_level_classification() {
        let level = |status| ApiError::from_status_and_body(status, String::new()).log_level();
        assert_eq!(level(429), LogLevel::Debug);
        assert_eq!(level(503), LogLevel::Warn);
        assert_eq!(level(401), LogLevel::Error);
        assert_eq!(level(403), LogLevel::Error);
        assert_eq!(level(404), LogLevel::Warn);

        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(ApiError::from(decode).log_level(), LogLevel::Error);
    }
}
