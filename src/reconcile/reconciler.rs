//! Region reconciler.
//!
//! Runs one capability probe against every candidate region at once.
//! Each region gets its own task and its own result slot; the slots are
//! only read after every task has been joined. Tasks live in a `JoinSet`,
//! so dropping a reconciliation aborts the probes it started.

use crate::core::{new_run_id, Error, Result};
use crate::probe::capability::{CapabilityProbe, ProbeError, ProbeResult};
use crate::probe::classify::classify;
use crate::reconcile::cancel::CancelSignal;
use crate::reconcile::config::{CancelPolicy, ReconcilerConfig};
use crate::reconcile::verdict::{CapabilityVerdict, ReconciliationResult};
use crate::region::{Region, RegionSet};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Reason recorded for a region whose probe panicked.
pub const PANICKED_REASON: &str = "probe task panicked";

/// Outcome of one region's task.
enum Slot {
    Done(CapabilityVerdict),
    Cancelled,
}

/// Classifies every region of a set against one probe.
#[derive(Clone, Debug, Default)]
pub struct RegionReconciler {
    config: ReconcilerConfig,
}

impl RegionReconciler {
    /// Create a reconciler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reconciler with a validated configuration.
    pub fn with_config(config: ReconcilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Probe every region and return one verdict per region.
    ///
    /// Fails only when the probe's preflight fails, or when the run is
    /// cancelled under [`CancelPolicy::Abort`]. Individual probe failures
    /// become `NotDeployable` verdicts.
    pub async fn reconcile(
        &self,
        regions: &RegionSet,
        probe: Arc<dyn CapabilityProbe>,
        cancel: &CancelSignal,
    ) -> Result<ReconciliationResult> {
        let run_id = new_run_id();
        let service = probe.service().to_string();

        probe.preflight().await.map_err(|e| match e {
            Error::ProbeSetup(_) => e,
            other => Error::ProbeSetup(other.to_string()),
        })?;

        if cancel.is_cancelled() && self.config.cancel_policy == CancelPolicy::Abort {
            return Err(Error::Cancelled);
        }

        debug!(%run_id, service = %service, regions = regions.len(), "starting reconciliation");

        let limiter = self
            .config
            .max_concurrency
            .map(|limit| Arc::new(Semaphore::new(limit)));
        let timeout = self.config.probe_timeout();

        let mut tasks = JoinSet::new();
        for (idx, region) in regions.iter().cloned().enumerate() {
            let probe = Arc::clone(&probe);
            let limiter = limiter.clone();
            let cancel = cancel.clone();
            tasks.spawn(async move {
                let code = region.code.clone();
                let run = AssertUnwindSafe(async move {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => Slot::Cancelled,
                        verdict = probe_region(probe, region, limiter, timeout) => Slot::Done(verdict),
                    }
                });
                let slot = match run.catch_unwind().await {
                    Ok(slot) => slot,
                    Err(_) => {
                        warn!(region = %code, "probe task panicked");
                        Slot::Done(CapabilityVerdict::not_deployable(PANICKED_REASON))
                    }
                };
                (idx, slot)
            });
        }

        // Barrier: no slot is read until the set is drained. Dropping the set
        // before that aborts every task still running.
        let mut slots: Vec<Option<Slot>> = regions.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, slot)) => slots[idx] = Some(slot),
                Err(join_err) => warn!(%run_id, error = %join_err, "probe task failed"),
            }
        }

        let mut cancelled = 0usize;
        let verdicts: Vec<CapabilityVerdict> = slots
            .into_iter()
            .map(|slot| match slot {
                Some(Slot::Done(verdict)) => verdict,
                Some(Slot::Cancelled) => {
                    cancelled += 1;
                    CapabilityVerdict::cancelled()
                }
                None => CapabilityVerdict::not_deployable("probe task failed"),
            })
            .collect();

        if cancelled > 0 && self.config.cancel_policy == CancelPolicy::Abort {
            warn!(%run_id, service = %service, cancelled, "reconciliation aborted");
            return Err(Error::Cancelled);
        }

        let result = ReconciliationResult::from_slots(run_id, &service, regions, verdicts)?;
        info!(
            %run_id,
            service = %service,
            regions = result.len(),
            deployable = result.deployable().len(),
            with_feature = result.with_feature().len(),
            cancelled,
            "reconciliation complete"
        );
        Ok(result)
    }
}

/// Run the probe for one region and classify the outcome.
async fn probe_region(
    probe: Arc<dyn CapabilityProbe>,
    region: Region,
    limiter: Option<Arc<Semaphore>>,
    timeout: Option<Duration>,
) -> CapabilityVerdict {
    let _permit = match limiter {
        Some(semaphore) => match semaphore.acquire_owned().await {
            Ok(permit) => Some(permit),
            Err(_) => return CapabilityVerdict::not_deployable("probe limiter closed"),
        },
        None => None,
    };

    debug!(service = %probe.service(), region = %region.code, "getting capabilities");
    let outcome: ProbeResult = match timeout {
        Some(limit) => match tokio::time::timeout(limit, probe.probe(&region)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProbeError::transport(&format!(
                "probe timed out after {} ms",
                limit.as_millis()
            ))),
        },
        None => probe.probe(&region).await,
    };

    if let Err(err) = &outcome {
        warn!(service = %probe.service(), region = %region.code, error = %err, "probe failed");
    }
    classify(outcome, probe.feature())
}
