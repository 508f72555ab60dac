//! Capability Probe Module
//!
//! Provides the per-service deployability check:
//! - Probe contract and payload types
//! - Verdict classification policy
//! - Advertised-location and scripted probes
//! - Known service kinds

pub mod advertised;
pub mod capability;
pub mod classify;
pub mod scripted;
pub mod services;

pub use advertised::AdvertisedLocationsProbe;
pub use capability::{CapabilityProbe, CapabilityRecord, ProbeError, ProbeResult};
pub use classify::{classify, NO_CAPABILITIES_REASON};
pub use scripted::{ScriptedProbe, ScriptedResponse};
pub use services::{AppServiceFlavor, OperatingSystem, PublishType, ServiceKind, WorkerFilter, ZONE_REDUNDANT_HA};
