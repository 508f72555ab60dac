//! Deployment planner.
//!
//! Reconciles several services over the same candidates and keeps the
//! regions where all of them can be deployed.

use crate::core::Result;
use crate::probe::capability::CapabilityProbe;
use crate::reconcile::cancel::CancelSignal;
use crate::reconcile::reconciler::RegionReconciler;
use crate::reconcile::verdict::ReconciliationResult;
use crate::region::RegionSet;
use futures::future::try_join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// A service that must be deployable in the chosen regions.
#[derive(Clone)]
pub struct ServiceRequirement {
    /// Probe for the service
    pub probe: Arc<dyn CapabilityProbe>,
    /// Only accept regions where the enhanced feature is supported
    pub require_feature: bool,
}

impl ServiceRequirement {
    /// Require the service to be deployable.
    pub fn deployable(probe: Arc<dyn CapabilityProbe>) -> Self {
        Self {
            probe,
            require_feature: false,
        }
    }

    /// Require the service's enhanced feature.
    pub fn with_feature(probe: Arc<dyn CapabilityProbe>) -> Self {
        Self {
            probe,
            require_feature: true,
        }
    }
}

/// Reconciliation of one service within a plan.
#[derive(Clone, Debug, Serialize)]
pub struct ServiceOutcome {
    pub service: String,
    pub require_feature: bool,
    pub result: ReconciliationResult,
    /// Regions that satisfy this requirement
    pub eligible: RegionSet,
}

/// Combined answer for a set of services.
#[derive(Clone, Debug, Serialize)]
pub struct DeploymentPlan {
    pub candidates: RegionSet,
    pub services: Vec<ServiceOutcome>,
    /// Regions where every service is eligible, in candidate order
    pub common: RegionSet,
    /// Candidates that at least one service rules out
    pub excluded: RegionSet,
}

/// Runs the reconciler for each requirement and intersects the results.
#[derive(Clone, Debug, Default)]
pub struct DeploymentPlanner {
    reconciler: RegionReconciler,
}

impl DeploymentPlanner {
    /// Create a planner around a reconciler.
    pub fn new(reconciler: RegionReconciler) -> Self {
        Self { reconciler }
    }

    /// Reconcile every requirement and compute the common region set.
    ///
    /// Services are reconciled concurrently. A setup failure of any service
    /// fails the plan.
    pub async fn plan(
        &self,
        candidates: &RegionSet,
        requirements: &[ServiceRequirement],
        cancel: &CancelSignal,
    ) -> Result<DeploymentPlan> {
        let runs = requirements.iter().map(|req| {
            let probe = Arc::clone(&req.probe);
            async move {
                let result = self.reconciler.reconcile(candidates, probe, cancel).await?;
                let eligible = result.eligible(req.require_feature);
                Ok::<_, crate::core::Error>(ServiceOutcome {
                    service: result.service.clone(),
                    require_feature: req.require_feature,
                    result,
                    eligible,
                })
            }
        });
        let services = try_join_all(runs).await?;

        let common = candidates.intersect_all(services.iter().map(|s| &s.eligible));
        let excluded = candidates.difference(&common);

        info!(
            services = services.len(),
            candidates = candidates.len(),
            common = common.len(),
            "deployment plan ready"
        );

        Ok(DeploymentPlan {
            candidates: candidates.clone(),
            services,
            common,
            excluded,
        })
    }
}
