//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign / propagate request ID)
//!     → quote.rs | recommendation.rs (request span, parse, compute)
//!     → response.rs (JSON body or JSON error)
//!     → Send to client
//! ```

pub mod middleware;
pub mod quote;
pub mod recommendation;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::HttpServer;
