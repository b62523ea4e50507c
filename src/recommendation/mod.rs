//! Product recommendations.
//!
//! # Data Flow
//! ```text
//! ?productIds=a,b
//!     → types.rs (exclude set)
//!     → engine.rs (filter catalog.rs, sample without replacement)
//!     → RecommendationResult
//! ```

pub mod catalog;
pub mod engine;
pub mod types;

pub use catalog::{Catalog, Product};
pub use engine::{sample_products, select_recommendations, MAX_RECOMMENDATIONS};
pub use types::{RecommendationParams, RecommendationRequest, RecommendationResult};
