//! Quote service endpoints.

use axum::{body::Bytes, http::HeaderMap, routing::post, Json, Router};

use crate::http::response::ApiError;
use crate::observability::{mark_error, rpc_span, RpcMetadata};
use crate::quoting::{calculate_quote, QuoteRequest, QuoteResult};

pub const RPC: RpcMetadata = RpcMetadata {
    system: "http",
    service: "oteldemo.QuoteService",
    method: "CalculateQuote",
};

/// `POST /` and `POST /quote`.
pub fn routes() -> Router {
    Router::new()
        .route("/", post(calculate))
        .route("/quote", post(calculate))
}

/// Price a shipment.
///
/// The body is taken raw so that an empty or missing body is not a
/// content-type rejection.
pub async fn calculate(headers: HeaderMap, body: Bytes) -> Result<Json<QuoteResult>, ApiError> {
    let span = rpc_span(&RPC, &headers);

    span.in_scope(|| -> Result<Json<QuoteResult>, ApiError> {
        tracing::info!("CalculateQuote request received");

        let items = QuoteRequest::from_body(&body)
            .and_then(|request| request.item_count())
            .inspect_err(|e| mark_error(&span, e))?;

        let quote = calculate_quote(&span, &mut rand::thread_rng(), items);

        span.record("app.quote.cost.total", quote.cost_usd);
        tracing::info!(cost_usd = quote.cost_usd, items, "Quote sent");

        Ok(Json(quote))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::testing::capture_subscriber;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn post_quote(uri: &str, body: &'static str) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_quote_for_three_items() {
        let response = routes()
            .oneshot(post_quote("/", r#"{"numberOfItems": 3}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["items"], 3);
        assert_eq!(body["currency"], "USD");
        let cost = body["cost_usd"].as_f64().unwrap();
        assert!((9.74 - 1e-9..=14.24 + 1e-9).contains(&cost), "{cost}");
    }

    #[tokio::test]
    async fn test_quote_alias_and_defaults() {
        for (body, items) in [("", 1), ("null", 1), ("{}", 1), (r#"{"numberOfUnits": 4}"#, 4)] {
            let response = routes().oneshot(post_quote("/quote", body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{body:?}");
            assert_eq!(body_json(response).await["items"], items, "{body:?}");
        }
    }

    #[tokio::test]
    async fn test_invalid_input_is_400() {
        for body in [r#"{"numberOfItems": -1}"#, r#"{"numberOfItems": "3"}"#, "{not json"] {
            let response = routes().oneshot(post_quote("/", body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body:?}");
            assert_eq!(body_json(response).await["error"], "invalid_input");
        }
    }

    #[tokio::test]
    async fn test_request_span_labels_success() {
        let (subscriber, capture) = capture_subscriber();
        let _guard = tracing::subscriber::set_default(subscriber);

        routes()
            .oneshot(post_quote("/", r#"{"numberOfItems": 2}"#))
            .await
            .unwrap();

        let rpc = capture.span("rpc").unwrap();
        assert_eq!(rpc.fields["rpc.system"], "http");
        assert_eq!(rpc.fields["rpc.service"], "oteldemo.QuoteService");
        assert_eq!(rpc.fields["rpc.method"], "CalculateQuote");
        assert!(rpc.fields.contains_key("app.quote.cost.total"));
        assert!(!rpc.fields.contains_key("otel.status_code"));

        let child = capture.span("calculate-quote").unwrap();
        assert_eq!(child.parent, Some("rpc"));
        assert!(child.closed);
    }

    #[tokio::test]
    async fn test_request_span_marked_on_failure() {
        let (subscriber, capture) = capture_subscriber();
        let _guard = tracing::subscriber::set_default(subscriber);

        let response = routes()
            .oneshot(post_quote("/", r#"{"numberOfItems": 1.5}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let rpc = capture.span("rpc").unwrap();
        assert_eq!(rpc.fields["rpc.method"], "CalculateQuote");
        assert_eq!(rpc.fields["otel.status_code"], "ERROR");
        assert!(capture.span("calculate-quote").is_none());
    }
}
