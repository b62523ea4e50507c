//! Core logic for pricing shipments and producing instrumented quotes.

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::{field, Span};

use crate::observability::metrics;
use crate::quoting::types::{QuotePricing, QuoteResult};

/// Flat cost of every shipment.
pub const BASE_COST: f64 = 5.99;
/// Mean per-item rate.
pub const PER_ITEM_COST: f64 = 1.50;
/// The per-item rate varies uniformly by up to this much either way.
pub const PER_ITEM_JITTER: f64 = 0.25;
/// Chance that a quote carries a handling fee.
pub const HANDLING_FEE_PROBABILITY: f64 = 0.2;
/// Handling fee bounds, in USD.
pub const HANDLING_FEE_RANGE: RangeInclusive<f64> = 1.0..=3.0;

/// Round to cents, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Draw a price for `items` items.
///
/// The per-item rate is drawn once per quote, not per item.
pub fn price_shipment<R: Rng + ?Sized>(rng: &mut R, items: u32) -> QuotePricing {
    let per_item_cost = PER_ITEM_COST + rng.gen_range(-PER_ITEM_JITTER..=PER_ITEM_JITTER);
    let mut total = BASE_COST + f64::from(items) * per_item_cost;

    let handling_fee = if rng.gen_bool(HANDLING_FEE_PROBABILITY) {
        Some(rng.gen_range(HANDLING_FEE_RANGE))
    } else {
        None
    };
    if let Some(fee) = handling_fee {
        total += fee;
    }

    QuotePricing {
        per_item_cost,
        handling_fee,
        total: round_cents(total),
    }
}

/// Calculate a quote inside a `calculate-quote` span under `parent`.
///
/// Emits, in order: the items attribute, a `handling_fee_applied` event when a
/// fee was drawn, the total-cost attribute, the quote counter and the cost
/// histogram, then a log line. The span is exited and closed on return.
pub fn calculate_quote<R: Rng + ?Sized>(parent: &Span, rng: &mut R, items: u32) -> QuoteResult {
    let span = tracing::info_span!(
        parent: parent,
        "calculate-quote",
        otel.kind = "internal",
        app.quote.items.count = items,
        app.quote.cost.total = field::Empty,
    );
    let _entered = span.enter();

    tracing::info!(items, "Calculating quote");

    let pricing = price_shipment(rng, items);
    if let Some(fee) = pricing.handling_fee {
        tracing::info!(fee, "handling_fee_applied");
    }

    span.record("app.quote.cost.total", pricing.total);
    metrics::record_quote(items, pricing.total);

    tracing::info!(
        cost_usd = pricing.total,
        per_item_cost = pricing.per_item_cost,
        "Quote calculated"
    );

    QuoteResult::new(pricing.total, items)
}
