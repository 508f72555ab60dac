//! Probe for services that publish their supported locations.
//!
//! Some services expose a flat list of locations rather than a per-region
//! capability query. The list is usually keyed by display name.

use crate::probe::capability::{CapabilityProbe, CapabilityRecord, ProbeResult};
use crate::region::Region;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::trace;

/// Marks a region deployable when the service advertises it.
pub struct AdvertisedLocationsProbe {
    service: String,
    advertised: HashSet<String>,
}

impl AdvertisedLocationsProbe {
    /// Create a probe from the advertised location names or codes.
    pub fn new<I, S>(service: &str, advertised: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            service: service.to_string(),
            advertised: advertised.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the service advertises `region` by code or display name.
    pub fn advertises(&self, region: &Region) -> bool {
        self.advertised.contains(&region.display_name) || self.advertised.contains(&region.code)
    }
}

#[async_trait]
impl CapabilityProbe for AdvertisedLocationsProbe {
    fn service(&self) -> &str {
        &self.service
    }

    fn feature(&self) -> &str {
        "none"
    }

    async fn probe(&self, region: &Region) -> ProbeResult {
        if self.advertises(region) {
            Ok(vec![CapabilityRecord::basic()])
        } else {
            trace!(service = %self.service, region = %region.code, "location not advertised");
            Ok(Vec::new())
        }
    }
}
