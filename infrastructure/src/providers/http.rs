//! Shared HTTP plumbing for provider adapters: client construction,
//! error mapping and response decoding.

use consortium_application::ProviderError;
use consortium_domain::excerpt;
use regex::Regex;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;

/// Bytes of an error body kept in `ProviderError::Http`
const ERROR_BODY_BYTES: usize = 500;

/// Build a client whose own timeout matches the provider's.
///
/// The dispatcher enforces the same bound; this one also stops the
/// underlying connection work once the attempt is abandoned.
pub(crate) fn client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

pub(crate) fn map_send_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout
    } else if error.is_decode() {
        ProviderError::MalformedResponse(error.to_string())
    } else {
        ProviderError::Connection(error.to_string())
    }
}

/// Decode a JSON response, mapping non-success statuses to errors.
pub(crate) async fn read_json(response: reqwest::Response) -> Result<Value, ProviderError> {
    let status = response.status();
    let body = response.text().await.map_err(map_send_error)?;

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(parse_rate_limit(&body));
    }
    if !status.is_success() {
        return Err(ProviderError::Http {
            status: status.as_u16(),
            body: excerpt(&body, ERROR_BODY_BYTES),
        });
    }
    serde_json::from_str(&body).map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}

fn used_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)\bused\W*(\d+)").ok())
        .as_ref()
}

fn limit_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)\blimit\W*(\d+)").ok())
        .as_ref()
}

fn capture_number(pattern: Option<&Regex>, body: &str) -> Option<u64> {
    pattern?
        .captures(body)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract `Used N` / `Limit M` from a 429 body when present.
pub(crate) fn parse_rate_limit(body: &str) -> ProviderError {
    ProviderError::RateLimited {
        used: capture_number(used_pattern(), body),
        limit: capture_number(limit_pattern(), body),
    }
}

/// Walk a JSON value by keys and array indices, returning a string leaf.
pub(crate) fn text_at<'a>(value: &'a Value, path: &[PathStep<'_>]) -> Option<&'a str> {
    let mut current = value;
    for step in path {
        current = match step {
            PathStep::Key(key) => current.get(*key)?,
            PathStep::Index(i) => current.get(*i)?,
        };
    }
    current.as_str()
}

pub(crate) enum PathStep<'a> {
    Key(&'a str),
    Index(usize),
}

pub(crate) fn u64_at(value: &Value, keys: &[&str]) -> Option<u64> {
    let mut current = value;
    for key in keys {
        current = current.get(*key)?;
    }
    current.as_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_groq_style_rate_limit_body() {
        let body = r#"{"error":{"message":"Rate limit reached for model `llama-3.3-70b-versatile` on tokens per day (TPD): Limit 100000, Used 99893, Requested 1520. Please try again later.","type":"tokens","code":"rate_limit_exceeded"}}"#;
        assert_eq!(
            parse_rate_limit(body),
            ProviderError::RateLimited {
                used: Some(99893),
                limit: Some(100000),
            }
        );
    }

    #[test]
    fn test_parse_rate_limit_without_numbers() {
        assert_eq!(
            parse_rate_limit("slow down"),
            ProviderError::RateLimited {
                used: None,
                limit: None,
            }
        );
    }

    #[test]
    fn test_text_at_walks_paths() {
        let value = json!({"choices": [{"message": {"content": "hi"}}]});
        let path = [
            PathStep::Key("choices"),
            PathStep::Index(0),
            PathStep::Key("message"),
            PathStep::Key("content"),
        ];
        assert_eq!(text_at(&value, &path), Some("hi"));
        assert_eq!(text_at(&value, &[PathStep::Key("missing")]), None);
    }
}
