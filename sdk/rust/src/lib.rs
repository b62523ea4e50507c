//! Rust client for the storefront quote and recommendation services.

pub mod client;

pub use client::{
    ClientError, HealthResponse, QuoteRequest, QuoteResponse, RecommendationsResponse,
    StorefrontClient,
};
