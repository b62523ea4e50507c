//! Shipping quote calculation.

pub mod engine;
pub mod types;

pub use engine::{calculate_quote, price_shipment};
pub use types::{QuotePricing, QuoteRequest, QuoteResult};
