//! CapabilityProbe trait definition.
//!
//! Core trait that every service-specific capability check implements.

use crate::core::Result;
use crate::region::Region;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One capability entry reported for a region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRecord {
    /// Whether the enhanced feature (e.g. zone-redundant HA) is supported
    pub feature_supported: bool,
    /// Edition or tier the entry describes, when the provider reports one
    pub edition: Option<String>,
}

impl CapabilityRecord {
    /// Entry without the enhanced feature.
    pub fn basic() -> Self {
        Self {
            feature_supported: false,
            edition: None,
        }
    }

    /// Entry with the enhanced feature.
    pub fn with_feature() -> Self {
        Self {
            feature_supported: true,
            edition: None,
        }
    }

    /// Set the edition.
    pub fn edition(mut self, edition: &str) -> Self {
        self.edition = Some(edition.to_string());
        self
    }
}

/// Failure of a single probe call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// Provider error carrying a machine-readable code
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    /// Error with a message only (network, decoding, timeout)
    #[error("{message}")]
    Transport { message: String },
}

impl ProbeError {
    /// Create a structured service error.
    pub fn service(code: &str, message: &str) -> Self {
        ProbeError::Service {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an unstructured error.
    pub fn transport(message: &str) -> Self {
        ProbeError::Transport {
            message: message.to_string(),
        }
    }
}

/// Result of one probe call.
pub type ProbeResult = std::result::Result<Vec<CapabilityRecord>, ProbeError>;

/// Service-specific deployability check for one region.
///
/// The reconciler calls `probe` concurrently for disjoint regions, so
/// implementations must not keep per-call mutable state. A probe future may
/// be dropped at any await point when the run is cancelled.
#[async_trait]
pub trait CapabilityProbe: Send + Sync {
    /// Service name used in results and logs.
    fn service(&self) -> &str;

    /// Name of the enhanced feature this service may support.
    fn feature(&self) -> &str;

    /// One-time setup check before any region is probed.
    ///
    /// An error here aborts the whole reconciliation.
    async fn preflight(&self) -> Result<()> {
        Ok(())
    }

    /// Query the capabilities of the service in `region`.
    async fn probe(&self, region: &Region) -> ProbeResult;
}
