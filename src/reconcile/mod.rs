//! Reconciliation Module
//!
//! Provides the region capability reconciliation engine:
//! - Concurrent, failure-isolated per-region probing
//! - Verdicts and keyed results
//! - Cancellation and configuration
//! - Multi-service deployment planning

pub mod cancel;
pub mod config;
pub mod plan;
pub mod reconciler;
pub mod verdict;

pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use config::{CancelPolicy, ReconcilerConfig};
pub use plan::{DeploymentPlan, DeploymentPlanner, ServiceOutcome, ServiceRequirement};
pub use reconciler::RegionReconciler;
pub use verdict::{CapabilityVerdict, ReconciliationResult, RegionVerdict, CANCELLED_REASON};
