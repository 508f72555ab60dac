//! Per-region verdicts and the keyed reconciliation result.

use crate::core::{now, Error, Result, RunId, Timestamp};
use crate::region::{Region, RegionSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reason recorded for regions whose probe was cut short by cancellation.
pub const CANCELLED_REASON: &str = "reconciliation cancelled";

/// Deployability of one service in one region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CapabilityVerdict {
    /// The service can be deployed
    Deployable,
    /// The service can be deployed with the enhanced feature
    DeployableWithFeature { feature: String },
    /// The service cannot be deployed
    NotDeployable { reason: String },
    /// The probe was cut short by cancellation; not deployable
    Cancelled,
}

impl CapabilityVerdict {
    /// Create a not-deployable verdict.
    pub fn not_deployable(reason: &str) -> Self {
        CapabilityVerdict::NotDeployable {
            reason: reason.to_string(),
        }
    }

    /// Verdict for a region whose probe was cancelled.
    pub fn cancelled() -> Self {
        CapabilityVerdict::Cancelled
    }

    pub fn is_deployable(&self) -> bool {
        matches!(
            self,
            CapabilityVerdict::Deployable | CapabilityVerdict::DeployableWithFeature { .. }
        )
    }

    pub fn supports_feature(&self) -> bool {
        matches!(self, CapabilityVerdict::DeployableWithFeature { .. })
    }

    /// Why the region is not deployable, if it isn't.
    pub fn reason(&self) -> Option<&str> {
        match self {
            CapabilityVerdict::NotDeployable { reason } => Some(reason),
            CapabilityVerdict::Cancelled => Some(CANCELLED_REASON),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, CapabilityVerdict::Cancelled)
    }
}

/// A region with its verdict.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionVerdict {
    pub region: Region,
    pub verdict: CapabilityVerdict,
}

/// Verdicts for every input region of one reconciliation.
///
/// Holds exactly one verdict per input code, iterable in input order.
#[derive(Clone, Debug, Serialize)]
pub struct ReconciliationResult {
    /// Run identifier
    pub run_id: RunId,
    /// Service that was probed
    pub service: String,
    /// When the run completed
    pub completed_at: Timestamp,
    entries: Vec<RegionVerdict>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ReconciliationResult {
    /// Pair each region with the verdict at the same position.
    pub(crate) fn from_slots(
        run_id: RunId,
        service: &str,
        regions: &RegionSet,
        verdicts: Vec<CapabilityVerdict>,
    ) -> Result<Self> {
        if verdicts.len() != regions.len() {
            return Err(Error::Internal(format!(
                "{} verdicts for {} regions",
                verdicts.len(),
                regions.len()
            )));
        }

        let entries: Vec<RegionVerdict> = regions
            .iter()
            .cloned()
            .zip(verdicts)
            .map(|(region, verdict)| RegionVerdict { region, verdict })
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.region.code.clone(), i))
            .collect();

        Ok(Self {
            run_id,
            service: service.to_string(),
            completed_at: now(),
            entries,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verdict for a region code.
    pub fn get(&self, code: &str) -> Option<&CapabilityVerdict> {
        self.index.get(code).map(|&i| &self.entries[i].verdict)
    }

    /// Entries in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, RegionVerdict> {
        self.entries.iter()
    }

    fn select(&self, keep: impl Fn(&CapabilityVerdict) -> bool) -> RegionSet {
        RegionSet::dedup_from(
            self.entries
                .iter()
                .filter(|e| keep(&e.verdict))
                .map(|e| e.region.clone()),
        )
    }

    /// Regions where the service is deployable, with or without the feature.
    pub fn deployable(&self) -> RegionSet {
        self.select(CapabilityVerdict::is_deployable)
    }

    /// Regions where the service is deployable with the feature.
    pub fn with_feature(&self) -> RegionSet {
        self.select(CapabilityVerdict::supports_feature)
    }

    /// Regions that are eligible for a requirement.
    pub fn eligible(&self, require_feature: bool) -> RegionSet {
        if require_feature {
            self.with_feature()
        } else {
            self.deployable()
        }
    }

    /// Non-deployable regions with their reasons, in input order.
    pub fn not_deployable(&self) -> Vec<(&Region, &str)> {
        self.entries
            .iter()
            .filter_map(|e| e.verdict.reason().map(|reason| (&e.region, reason)))
            .collect()
    }

    /// Number of regions whose probe was cancelled.
    pub fn cancelled_count(&self) -> usize {
        self.entries.iter().filter(|e| e.verdict.is_cancelled()).count()
    }
}

impl<'a> IntoIterator for &'a ReconciliationResult {
    type Item = &'a RegionVerdict;
    type IntoIter = std::slice::Iter<'a, RegionVerdict>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::new_run_id;
    use crate::probe::capability::ProbeError;
    use crate::probe::classify::classify;

    fn regions() -> RegionSet {
        RegionSet::new(vec![
            Region::new("eastus", "East US"),
            Region::new("westus", "West US"),
            Region::new("norway", "Norway"),
        ])
        .unwrap()
    }

    fn result() -> ReconciliationResult {
        ReconciliationResult::from_slots(
            new_run_id(),
            "postgresql",
            &regions(),
            vec![
                CapabilityVerdict::Deployable,
                CapabilityVerdict::DeployableWithFeature { feature: "ha".to_string() },
                CapabilityVerdict::not_deployable("LocationNotAvailable"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_and_order() {
        let result = result();
        assert_eq!(result.len(), 3);
        assert_eq!(result.get("norway").unwrap().reason(), Some("LocationNotAvailable"));
        let codes: Vec<&str> = result.iter().map(|e| e.region.code.as_str()).collect();
        assert_eq!(codes, vec!["eastus", "westus", "norway"]);
        assert!(result.get("centralus").is_none());
    }

    #[test]
    fn test_subsets() {
        let result = result();
        assert_eq!(result.deployable().codes(), vec!["eastus", "westus"]);
        assert_eq!(result.with_feature().codes(), vec!["westus"]);
        assert_eq!(result.eligible(true).codes(), vec!["westus"]);
        let missing = result.not_deployable();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].0.code, "norway");
    }

    #[test]
    fn test_slot_count_mismatch() {
        let err = ReconciliationResult::from_slots(new_run_id(), "x", &regions(), vec![]).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[test]
    fn test_verdict_serialization() {
        let json = serde_json::to_string(&CapabilityVerdict::not_deployable("nope")).unwrap();
        assert_eq!(json, r#"{"status":"not_deployable","reason":"nope"}"#);
        let json = serde_json::to_string(&CapabilityVerdict::cancelled()).unwrap();
        assert_eq!(json, r#"{"status":"cancelled"}"#);
    }

    #[test]
    fn test_cancelled_is_structural() {
        let cancelled = CapabilityVerdict::cancelled();
        assert!(cancelled.is_cancelled());
        assert!(!cancelled.is_deployable());
        assert_eq!(cancelled.reason(), Some(CANCELLED_REASON));
        assert!(!CapabilityVerdict::Deployable.is_cancelled());

        // A failure that merely reads like a cancellation is not one.
        let lookalike = classify(Err(ProbeError::transport(CANCELLED_REASON)), "ha");
        assert_eq!(lookalike.reason(), Some(CANCELLED_REASON));
        assert!(!lookalike.is_cancelled());

        let result = ReconciliationResult::from_slots(
            new_run_id(),
            "postgresql",
            &regions(),
            vec![CapabilityVerdict::cancelled(), lookalike, CapabilityVerdict::Deployable],
        )
        .unwrap();
        assert_eq!(result.cancelled_count(), 1);
        assert_eq!(result.not_deployable().len(), 2);
        assert_eq!(result.deployable().codes(), vec!["norway"]);
    }
}
