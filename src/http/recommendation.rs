//! Recommendation service endpoints.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};

use crate::observability::{rpc_span, RpcMetadata};
use crate::recommendation::{
    select_recommendations, Catalog, RecommendationParams, RecommendationRequest,
    RecommendationResult,
};

pub const RPC: RpcMetadata = RpcMetadata {
    system: "grpc",
    service: "oteldemo.RecommendationService",
    method: "ListRecommendations",
};

/// `GET /` and `GET /recommendations` over `catalog`.
pub fn routes(catalog: Catalog) -> Router {
    Router::new()
        .route("/", get(list))
        .route("/recommendations", get(list))
        .with_state(catalog)
}

/// Recommend up to five products not named in `productIds`.
///
/// The query is read as raw pairs so that a repeated key is not a rejection.
pub async fn list(
    State(catalog): State<Catalog>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<RecommendationResult> {
    let span = rpc_span(&RPC, &headers);

    span.in_scope(|| {
        let params = RecommendationParams::from_pairs(pairs);
        let request = RecommendationRequest::from(&params);

        tracing::info!(
            excluded = request.exclude_ids.len(),
            user_id = params.user_id.as_deref().unwrap_or(""),
            "ListRecommendations request received"
        );

        let result =
            select_recommendations(&span, &mut rand::thread_rng(), &catalog, &request.exclude_ids);

        span.record("app.recommendations.count", result.count);
        tracing::info!(
            count = result.count,
            recommendations = ?result.product_ids,
            "Recommendations sent"
        );

        Json(result)
    })
}
