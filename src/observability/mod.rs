//! # Observability Infrastructure
//!
//! Structured JSON logging with field redaction, and request correlation for
//! the HTTP surface.

pub mod correlation;
pub mod http_tracing;
pub mod logging;

pub use correlation::{CorrelationId, REQUEST_ID_HEADER, TRACE_ID_HEADER};
pub use http_tracing::trace_http_requests;
pub use logging::{init_logging, is_sensitive, LoggingConfig, RedactingJsonLayer};
