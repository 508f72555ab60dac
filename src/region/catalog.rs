//! Location catalog and candidate selection.
//!
//! The catalog is the upstream "enumerate locations" call. Candidate
//! selection narrows it to what the caller asked for.

use crate::core::Result;
use crate::region::location::{Region, RegionSet};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Source of the locations available to a subscription.
#[async_trait]
pub trait LocationCatalog: Send + Sync {
    /// List every location, in catalog order.
    async fn list_locations(&self) -> Result<RegionSet>;
}

/// Catalog backed by a fixed region set.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    regions: RegionSet,
}

impl StaticCatalog {
    /// Create a catalog over the given regions.
    pub fn new(regions: RegionSet) -> Self {
        Self { regions }
    }
}

#[async_trait]
impl LocationCatalog for StaticCatalog {
    async fn list_locations(&self) -> Result<RegionSet> {
        Ok(self.regions.clone())
    }
}

/// Pick the candidate regions for a reconciliation.
///
/// An empty request selects the whole catalog. Otherwise the requested codes
/// are returned in request order with duplicates dropped. Codes the catalog
/// does not know are kept, named after their code, so that the probe reports
/// on them instead of the run failing.
pub async fn select_candidates(
    catalog: &dyn LocationCatalog,
    requested: &[String],
) -> Result<RegionSet> {
    let all = catalog.list_locations().await?;
    if requested.is_empty() {
        debug!(count = all.len(), "selected all catalog locations");
        return Ok(all);
    }

    let selected = requested.iter().map(|code| match all.get(code) {
        Some(region) => region.clone(),
        None => {
            warn!(code = %code, "location not found in catalog");
            Region::new(code, code)
        }
    });
    Ok(RegionSet::dedup_from(selected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(
            RegionSet::new(vec![
                Region::new("eastus", "East US"),
                Region::new("westus", "West US"),
                Region::new("norwayeast", "Norway East"),
            ])
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_select_all_when_nothing_requested() {
        let selected = select_candidates(&catalog(), &[]).await.unwrap();
        assert_eq!(selected.codes(), vec!["eastus", "westus", "norwayeast"]);
    }

    #[tokio::test]
    async fn test_select_requested_in_request_order() {
        let requested = vec!["norwayeast".to_string(), "eastus".to_string(), "eastus".to_string()];
        let selected = select_candidates(&catalog(), &requested).await.unwrap();
        assert_eq!(selected.codes(), vec!["norwayeast", "eastus"]);
        assert_eq!(selected.get("norwayeast").unwrap().display_name, "Norway East");
    }

    #[tokio::test]
    async fn test_unknown_location_kept_by_code() {
        let requested = vec!["marsnorth".to_string()];
        let selected = select_candidates(&catalog(), &requested).await.unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.get("marsnorth").unwrap().display_name, "marsnorth");
    }
}
