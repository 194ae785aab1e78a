//! # Request Correlation
//!
//! Correlation IDs tie every log record of one request together and are
//! echoed back to the caller.

use std::fmt;

use http::HeaderMap;

/// Header carrying the correlation ID, in both directions.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Accepted on input when `x-trace-id` is absent.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Opaque request correlation ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a fresh ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Take the ID from `x-trace-id`, then `x-request-id`, else generate one.
    ///
    /// Blank or non-ASCII header values are ignored.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        [TRACE_ID_HEADER, REQUEST_ID_HEADER]
            .iter()
            .filter_map(|name| headers.get(*name))
            .filter_map(|value| value.to_str().ok())
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(|value| Self(value.to_string()))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_trace_header_preferred() {
        let mut headers = HeaderMap::new();
        headers.insert(TRACE_ID_HEADER, HeaderValue::from_static("trace-1"));
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-1"));

        assert_eq!(CorrelationId::from_headers(&headers).as_str(), "trace-1");
    }

    #[test]
    fn test_request_id_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(TRACE_ID_HEADER, HeaderValue::from_static("  "));
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-1"));

        assert_eq!(CorrelationId::from_headers(&headers).to_string(), "req-1");
    }

    #[test]
    fn test_generated_when_absent() {
        let first = CorrelationId::from_headers(&HeaderMap::new());
        let second = CorrelationId::from_headers(&HeaderMap::new());

        assert!(uuid::Uuid::parse_str(first.as_str()).is_ok());
        assert_ne!(first, second);
    }
}
