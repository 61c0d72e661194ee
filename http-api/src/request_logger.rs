//! Correlation id and access logging middleware
//!
//! Every request gets a fresh UUID, is timed, and produces one access line:
//! `<id> <path>[?<query>] Time=<ms> ms status_code=<code>`.
//! Handlers report store failures through [`RequestContext::log_error`], which
//! writes `<id> <path>[?<query>] err="<message>"` under the same id.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue, Uri},
    middleware::Next,
    response::Response,
};
use std::fmt::Display;
use std::time::{Duration, Instant};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// Response header carrying the request's correlation id
pub const CORRELATION_ID_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

/// Response extension set by the panic guard, carrying the panic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerPanic(pub String);

/// Per-request data shared between the middleware and the handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    correlation_id: Uuid,
    path: String,
    query: Option<String>,
}

impl RequestContext {
    pub fn new(correlation_id: Uuid, uri: &Uri) -> Self {
        Self {
            correlation_id,
            path: uri.path().to_string(),
            query: uri.query().filter(|q| !q.is_empty()).map(str::to_string),
        }
    }

    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Request path with the query string appended when present
    pub fn target(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }

    /// Emit the error line for a failure observed while handling this request
    pub fn log_error(&self, err: &dyn Display) {
        error!("{}", format_error_line(self, err));
    }
}

/// Access line written once per request
pub fn format_access_line(context: &RequestContext, elapsed: Duration, status: u16) -> String {
    format!(
        "{} {} Time={:.2} ms status_code={}",
        context.correlation_id,
        context.target(),
        elapsed.as_secs_f64() * 1000.0,
        status
    )
}

/// Error line written for each handler-reported failure
pub fn format_error_line(context: &RequestContext, err: &dyn Display) -> String {
    format!(
        "{} {} err=\"{}\"",
        context.correlation_id,
        context.target(),
        err
    )
}

/// Correlation and request logging middleware
///
/// Runs for every route. The response produced by the inner stack is always
/// logged and tagged, whatever its status. A caught panic also gets the
/// error line.
pub async fn correlation_logging_middleware(mut request: Request, next: Next) -> Response {
    let context = RequestContext::new(Uuid::new_v4(), request.uri());
    request.extensions_mut().insert(context.clone());

    let span = info_span!(
        "request",
        correlation_id = %context.correlation_id,
        method = %request.method(),
    );

    let start_time = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;
    let elapsed = start_time.elapsed();

    span.in_scope(|| {
        if let Some(HandlerPanic(message)) = response.extensions_mut().remove::<HandlerPanic>() {
            context.log_error(&message);
        }
        info!(
            "{}",
            format_access_line(&context, elapsed, response.status().as_u16())
        );
    });

    // A hyphenated UUID is always a valid header value
    if let Ok(value) = HeaderValue::from_str(&context.correlation_id.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(uri: &str) -> RequestContext {
        let id = Uuid::parse_str("6f1c9a52-0d0e-4c43-9d5e-0f0a3b1d2c3e").unwrap();
        RequestContext::new(id, &uri.parse::<Uri>().unwrap())
    }

    #[test]
    fn test_target_without_query() {
        assert_eq!(context("/").target(), "/");
        assert_eq!(context("/add?").target(), "/add");
    }

    #[test]
    fn test_target_with_query() {
        assert_eq!(
            context("/edit?todo_id=1&task=Buy%20bread").target(),
            "/edit?todo_id=1&task=Buy%20bread"
        );
    }

    #[test]
    fn test_format_access_line() {
        let line = format_access_line(
            &context("/delete?todo_id=99"),
            Duration::from_micros(1234),
            404,
        );
        assert_eq!(
            line,
            "6f1c9a52-0d0e-4c43-9d5e-0f0a3b1d2c3e /delete?todo_id=99 Time=1.23 ms status_code=404"
        );
    }

    #[test]
    fn test_format_error_line() {
        let line = format_error_line(&context("/"), &"database is locked");
        assert_eq!(
            line,
            "6f1c9a52-0d0e-4c43-9d5e-0f0a3b1d2c3e / err=\"database is locked\""
        );
    }
}
