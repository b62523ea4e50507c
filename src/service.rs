//! Which storefront service a process is running.

use serde::{Deserialize, Serialize};

/// The two independently deployable services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// Shipping-quote calculator.
    Quote,
    /// Product recommender.
    Recommendation,
}

impl ServiceKind {
    /// Short name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Quote => "quote",
            ServiceKind::Recommendation => "recommendation",
        }
    }

    /// Port used when neither config, `PORT`, nor `--port` choose one.
    pub fn default_port(self) -> u16 {
        match self {
            ServiceKind::Quote => 8093,
            ServiceKind::Recommendation => 8086,
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
