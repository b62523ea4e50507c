//! Distributed tracing support.
//!
//! # Responsibilities
//! - Open the per-request span tagged with RPC metadata
//! - Extract W3C trace context (`traceparent`) from incoming requests
//! - Mark request spans as failed
//!
//! # Design Decisions
//! - Field names follow the `tracing-opentelemetry` conventions (`otel.*`),
//!   so an exporter layer can be added without touching handlers
//! - Request spans are passed explicitly to computations, never looked up
//!   from ambient context

use axum::http::HeaderMap;
use tracing::{field, Span};

/// Header carrying W3C trace context.
pub const TRACEPARENT: &str = "traceparent";

/// RPC labels attached to every request span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcMetadata {
    pub system: &'static str,
    pub service: &'static str,
    pub method: &'static str,
}

/// Parsed `traceparent` header (version 00).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceParent {
    pub trace_id: String,
    pub parent_id: String,
    pub sampled: bool,
}

impl TraceParent {
    /// Parse `00-<32 hex>-<16 hex>-<2 hex>`.
    ///
    /// All-zero trace or parent ids are invalid per the W3C format.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.trim().split('-');
        let (version, trace_id, parent_id, flags) =
            (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || version != "00" {
            return None;
        }

        let is_hex = |s: &str, len: usize| {
            s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        };
        if !is_hex(trace_id, 32) || !is_hex(parent_id, 16) || !is_hex(flags, 2) {
            return None;
        }
        if trace_id.bytes().all(|b| b == b'0') || parent_id.bytes().all(|b| b == b'0') {
            return None;
        }

        let flags = u8::from_str_radix(flags, 16).ok()?;
        Some(Self {
            trace_id: trace_id.to_string(),
            parent_id: parent_id.to_string(),
            sampled: flags & 0x01 == 0x01,
        })
    }

    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(TRACEPARENT)
            .and_then(|v| v.to_str().ok())
            .and_then(Self::parse)
    }
}

/// Open the server span for one request.
///
/// The RPC labels are set at creation, before any input is parsed, so the
/// request is labelled whether it succeeds or not.
pub fn rpc_span(rpc: &RpcMetadata, headers: &HeaderMap) -> Span {
    let request_id = crate::http::request::request_id(headers).unwrap_or("unknown");

    let span = tracing::info_span!(
        "rpc",
        otel.name = rpc.method,
        otel.kind = "server",
        otel.status_code = field::Empty,
        rpc.system = rpc.system,
        rpc.service = rpc.service,
        rpc.method = rpc.method,
        request_id = %request_id,
        trace_id = field::Empty,
        parent_span_id = field::Empty,
        app.quote.cost.total = field::Empty,
        app.recommendations.count = field::Empty,
    );

    if let Some(parent) = TraceParent::from_headers(headers) {
        span.record("trace_id", parent.trace_id.as_str());
        span.record("parent_span_id", parent.parent_id.as_str());
    }

    span
}

/// Mark a request span as failed.
pub fn mark_error(span: &Span, error: &dyn std::fmt::Display) {
    span.record("otel.status_code", "ERROR");
    tracing::warn!(parent: span, error = %error, "Request failed");
}
