//! Storefront quote and recommendation services.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod quoting;
pub mod recommendation;
pub mod service;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use service::ServiceKind;
