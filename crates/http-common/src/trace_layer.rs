use std::time::Duration;

use axum::http::{Request, Response, header};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{MakeSpan, OnResponse, TraceLayer},
};
use tracing::{Level, Span, event};

#[derive(Clone, Copy, Default, Debug)]
pub struct CustomMakeSpan;

#[derive(Clone, Copy, Default, Debug)]
pub struct CustomOnResponse;

pub type HttpTraceLayer =
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>, CustomMakeSpan, (), CustomOnResponse>;

/// Request span per call plus one completion event, leveled by status class.
pub fn http_trace_layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(CustomMakeSpan)
        .on_request(())
        .on_response(CustomOnResponse)
}

impl<B> MakeSpan<B> for CustomMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let user_agent = request
            .headers()
            .get(header::USER_AGENT)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
            user_agent = %user_agent,
        )
    }
}

impl<B> OnResponse<B> for CustomOnResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status();
        let latency = latency.as_millis();

        match status.as_u16() {
            500..=599 => {
                event!(Level::ERROR, status = %status, latency = %latency, "request failed")
            }
            400..=499 => {
                event!(Level::WARN, status = %status, latency = %latency, "request rejected")
            }
            _ => event!(Level::INFO, status = %status, latency = %latency, "request finished"),
        }
    }
}
