//! Product sampling and the instrumented recommendation call.

use std::collections::HashSet;

use rand::Rng;
use tracing::{field, Span};

use crate::observability::metrics;
use crate::recommendation::catalog::{Catalog, Product};
use crate::recommendation::types::RecommendationResult;

/// Upper bound on products per recommendation list.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Sample up to `limit` products not in `exclude_ids`, without replacement.
///
/// The result is in sampling order, not catalog order.
pub fn sample_products<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    exclude_ids: &HashSet<String>,
    limit: usize,
) -> Vec<&'static Product> {
    let available: Vec<&'static Product> = catalog
        .products()
        .iter()
        .filter(|p| !exclude_ids.contains(p.id))
        .collect();

    let amount = limit.min(available.len());
    rand::seq::index::sample(rng, available.len(), amount)
        .into_iter()
        .map(|i| available[i])
        .collect()
}

/// Select recommendations inside a `get_product_list` span under `parent`.
///
/// Emits, in order: the exclude-count attribute, the result-count attribute,
/// a `recommendations_generated` event, the recommendations counter, then a
/// log line. The span is exited and closed on return.
pub fn select_recommendations<R: Rng + ?Sized>(
    parent: &Span,
    rng: &mut R,
    catalog: &Catalog,
    exclude_ids: &HashSet<String>,
) -> RecommendationResult {
    let span = tracing::info_span!(
        parent: parent,
        "get_product_list",
        otel.kind = "internal",
        exclude.count = exclude_ids.len(),
        app.products.count = field::Empty,
    );
    let _entered = span.enter();

    tracing::info!(excluded = exclude_ids.len(), "Filtering products");

    let picked = sample_products(rng, catalog, exclude_ids, MAX_RECOMMENDATIONS);

    span.record("app.products.count", picked.len());
    tracing::info!(count = picked.len(), "recommendations_generated");
    metrics::record_recommendations(exclude_ids.len());

    tracing::info!(count = picked.len(), "Selected products");

    RecommendationResult::new(picked.iter().map(|p| p.id.to_string()).collect())
}
