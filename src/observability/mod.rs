//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and computations produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → process.rs (CPU, memory, thread gauges, sampled on upkeep)
//!     → tracing.rs (request spans with RPC labels and trace context)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → /metrics (Prometheus scrape)
//!     → any tracing layer attached to the subscriber (e.g., OTLP bridge)
//! ```
//!
//! # Design Decisions
//! - Request ID flows into every request span
//! - Telemetry sinks are thread-safe; computations never synchronize on them

pub mod logging;
pub mod metrics;
pub mod process;
pub mod tracing;

#[cfg(test)]
pub(crate) mod testing;

pub use self::tracing::{mark_error, rpc_span, RpcMetadata, TraceParent};
