//! In-memory probe with scripted per-region responses.
//!
//! Stands in for a provider client in tests and dry runs.

use crate::core::{Error, Result};
use crate::probe::capability::{CapabilityProbe, CapabilityRecord, ProbeError, ProbeResult};
use crate::region::Region;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted outcome for a region.
#[derive(Clone, Debug)]
pub enum ScriptedResponse {
    /// Return these capability records
    Records(Vec<CapabilityRecord>),
    /// Fail with this error
    Fail(ProbeError),
}

/// Probe that answers from a script.
pub struct ScriptedProbe {
    service: String,
    feature: String,
    responses: HashMap<String, ScriptedResponse>,
    fallback: ScriptedResponse,
    latency: Option<Duration>,
    latency_overrides: HashMap<String, Duration>,
    preflight_error: Option<String>,
    preflight_delay: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedProbe {
    /// Create a probe that reports every region as deployable without the feature.
    pub fn new(service: &str, feature: &str) -> Self {
        Self {
            service: service.to_string(),
            feature: feature.to_string(),
            responses: HashMap::new(),
            fallback: ScriptedResponse::Records(vec![CapabilityRecord::basic()]),
            latency: None,
            latency_overrides: HashMap::new(),
            preflight_error: None,
            preflight_delay: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Script the response for one region.
    pub fn respond(mut self, code: &str, response: ScriptedResponse) -> Self {
        self.responses.insert(code.to_string(), response);
        self
    }

    /// Response for regions without a script entry.
    pub fn otherwise(mut self, response: ScriptedResponse) -> Self {
        self.fallback = response;
        self
    }

    /// Delay every call.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Delay calls for one region.
    pub fn latency_for(mut self, code: &str, latency: Duration) -> Self {
        self.latency_overrides.insert(code.to_string(), latency);
        self
    }

    /// Make `preflight` fail.
    pub fn fail_preflight(mut self, reason: &str) -> Self {
        self.preflight_error = Some(reason.to_string());
        self
    }

    /// Delay `preflight` before it answers.
    pub fn preflight_delay(mut self, delay: Duration) -> Self {
        self.preflight_delay = Some(delay);
        self
    }

    /// Number of `probe` calls started.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of `probe` calls currently running.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of concurrent `probe` calls observed.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CapabilityProbe for ScriptedProbe {
    fn service(&self) -> &str {
        &self.service
    }

    fn feature(&self) -> &str {
        &self.feature
    }

    async fn preflight(&self) -> Result<()> {
        if let Some(delay) = self.preflight_delay {
            tokio::time::sleep(delay).await;
        }
        match &self.preflight_error {
            Some(reason) => Err(Error::ProbeSetup(reason.clone())),
            None => Ok(()),
        }
    }

    async fn probe(&self, region: &Region) -> ProbeResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        let delay = self
            .latency_overrides
            .get(&region.code)
            .copied()
            .or(self.latency);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.responses.get(&region.code).unwrap_or(&self.fallback) {
            ScriptedResponse::Records(records) => Ok(records.clone()),
            ScriptedResponse::Fail(err) => Err(err.clone()),
        }
    }
}
