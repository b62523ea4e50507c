//! Shipping quote types.

use serde::{Deserialize, Serialize};

use crate::http::response::ApiError;

/// Currency every quote is expressed in.
pub const CURRENCY: &str = "USD";

/// Item count used when the request names none.
pub const DEFAULT_ITEM_COUNT: u32 = 1;

/// Request payload for a shipping quote.
///
/// Both counts are optional; see [`QuoteRequest::item_count`] for how they resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub number_of_items: Option<i64>,
    pub number_of_units: Option<i64>,
}

impl QuoteRequest {
    /// Parse a request body. Empty, whitespace-only and `null` bodies mean "no input".
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice::<Option<Self>>(body)
            .map(Option::unwrap_or_default)
            .map_err(|e| ApiError::InvalidInput(format!("invalid quote request: {e}")))
    }

    /// Resolve the number of items to quote.
    ///
    /// The first of `numberOfItems`, `numberOfUnits` that is present and
    /// non-zero wins; otherwise one item. Negative or oversized counts are rejected.
    pub fn item_count(&self) -> Result<u32, ApiError> {
        let candidates = [
            ("numberOfItems", self.number_of_items),
            ("numberOfUnits", self.number_of_units),
        ];

        for (field, value) in candidates {
            match value {
                None | Some(0) => continue,
                Some(n) => {
                    return u32::try_from(n).map_err(|_| {
                        ApiError::InvalidInput(format!(
                            "{field} must be between 0 and {}, got {n}",
                            u32::MAX
                        ))
                    })
                }
            }
        }

        Ok(DEFAULT_ITEM_COUNT)
    }
}

/// A shipping quote as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Total cost, rounded to cents.
    pub cost_usd: f64,
    /// Number of items quoted.
    pub items: u32,
    /// Always "USD".
    pub currency: String,
}

impl QuoteResult {
    pub fn new(cost_usd: f64, items: u32) -> Self {
        Self {
            cost_usd,
            items,
            currency: CURRENCY.to_string(),
        }
    }
}

/// Breakdown of one pricing draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotePricing {
    /// Per-item rate drawn for this quote.
    pub per_item_cost: f64,
    /// Handling fee, when one was applied.
    pub handling_fee: Option<f64>,
    /// Final cost, rounded to cents.
    pub total: f64,
}
