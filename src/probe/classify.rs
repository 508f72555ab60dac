//! Verdict classification for completed probe calls.

use crate::probe::capability::{CapabilityRecord, ProbeError, ProbeResult};
use crate::reconcile::verdict::CapabilityVerdict;

/// Reason given when a probe succeeds but reports no capabilities.
pub const NO_CAPABILITIES_REASON: &str = "can't deploy to this location";

/// Classify one probe outcome.
///
/// Structured errors report their code, unstructured ones their message.
/// A non-empty payload is deployable, with the feature when any record
/// supports it.
pub fn classify(outcome: ProbeResult, feature: &str) -> CapabilityVerdict {
    match outcome {
        Err(ProbeError::Service { code, .. }) => CapabilityVerdict::not_deployable(&code),
        Err(ProbeError::Transport { message }) => CapabilityVerdict::not_deployable(&message),
        Ok(records) => classify_records(&records, feature),
    }
}

fn classify_records(records: &[CapabilityRecord], feature: &str) -> CapabilityVerdict {
    if records.is_empty() {
        return CapabilityVerdict::not_deployable(NO_CAPABILITIES_REASON);
    }
    if records.iter().any(|r| r.feature_supported) {
        CapabilityVerdict::DeployableWithFeature {
            feature: feature.to_string(),
        }
    } else {
        CapabilityVerdict::Deployable
    }
}
