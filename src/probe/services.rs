//! Known managed services and their deployment options.

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Enhanced feature checked for PostgreSQL flexible servers.
pub const ZONE_REDUNDANT_HA: &str = "zone-redundant-ha";

/// App Service worker operating system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatingSystem {
    Linux,
    Windows,
}

impl FromStr for OperatingSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linux" => Ok(OperatingSystem::Linux),
            "windows" => Ok(OperatingSystem::Windows),
            other => Err(Error::InvalidChoice(format!("operating system: {other}"))),
        }
    }
}

impl std::fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatingSystem::Linux => write!(f, "Linux"),
            OperatingSystem::Windows => write!(f, "Windows"),
        }
    }
}

/// How an App Service web app is published.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublishType {
    Code,
    Container,
}

impl FromStr for PublishType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "code" => Ok(PublishType::Code),
            "container" => Ok(PublishType::Container),
            other => Err(Error::InvalidChoice(format!("publish type: {other}"))),
        }
    }
}

impl std::fmt::Display for PublishType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishType::Code => write!(f, "Code"),
            PublishType::Container => write!(f, "Container"),
        }
    }
}

/// Worker pools a geo-region listing must be filtered on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerFilter {
    pub linux_workers: bool,
    pub xenon_workers: bool,
}

/// App Service flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppServiceFlavor {
    pub os: OperatingSystem,
    pub publish: PublishType,
}

impl AppServiceFlavor {
    /// Worker filter for listing the geo-regions of this flavour.
    ///
    /// Windows containers run on Xenon workers.
    pub fn worker_filter(&self) -> WorkerFilter {
        WorkerFilter {
            linux_workers: self.os == OperatingSystem::Linux,
            xenon_workers: self.os == OperatingSystem::Windows && self.publish == PublishType::Container,
        }
    }
}

/// A managed service whose regional availability can be checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    /// PostgreSQL flexible server, optionally requiring zone-redundant HA
    PostgresqlFlexibleServer { high_availability: bool },
    /// Cache for Redis
    Redis,
    /// App Service web app
    AppService(AppServiceFlavor),
}

impl ServiceKind {
    /// Short service name used in results.
    pub fn service_name(&self) -> &'static str {
        match self {
            ServiceKind::PostgresqlFlexibleServer { .. } => "postgresql",
            ServiceKind::Redis => "redis",
            ServiceKind::AppService(_) => "web-app",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> String {
        match self {
            ServiceKind::PostgresqlFlexibleServer { high_availability: false } => {
                "Azure PostgreSQL Flexible Server".to_string()
            }
            ServiceKind::PostgresqlFlexibleServer { high_availability: true } => {
                "Azure PostgreSQL Flexible Server with HA".to_string()
            }
            ServiceKind::Redis => "Azure Cache for Redis".to_string(),
            ServiceKind::AppService(flavor) => {
                format!("Azure App Service - {} {}", flavor.os, flavor.publish)
            }
        }
    }

    /// Whether an eligible region must also support the enhanced feature.
    pub fn requires_feature(&self) -> bool {
        matches!(
            self,
            ServiceKind::PostgresqlFlexibleServer { high_availability: true }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!("linux".parse::<OperatingSystem>().unwrap(), OperatingSystem::Linux);
        assert_eq!("container".parse::<PublishType>().unwrap(), PublishType::Container);
        assert!(matches!("macos".parse::<OperatingSystem>(), Err(Error::InvalidChoice(_))));
        assert!(matches!("zip".parse::<PublishType>(), Err(Error::InvalidChoice(_))));
    }

    #[test]
    fn test_worker_filter() {
        let linux_code = AppServiceFlavor { os: OperatingSystem::Linux, publish: PublishType::Code };
        assert_eq!(linux_code.worker_filter(), WorkerFilter { linux_workers: true, xenon_workers: false });

        let windows_container = AppServiceFlavor { os: OperatingSystem::Windows, publish: PublishType::Container };
        assert_eq!(windows_container.worker_filter(), WorkerFilter { linux_workers: false, xenon_workers: true });

        let windows_code = AppServiceFlavor { os: OperatingSystem::Windows, publish: PublishType::Code };
        assert_eq!(windows_code.worker_filter(), WorkerFilter::default());
    }

    #[test]
    fn test_service_descriptions() {
        let ha = ServiceKind::PostgresqlFlexibleServer { high_availability: true };
        assert!(ha.requires_feature());
        assert_eq!(ha.description(), "Azure PostgreSQL Flexible Server with HA");
        assert!(!ServiceKind::Redis.requires_feature());

        let web = ServiceKind::AppService(AppServiceFlavor { os: OperatingSystem::Linux, publish: PublishType::Container });
        assert_eq!(web.description(), "Azure App Service - Linux Container");
        assert_eq!(web.service_name(), "web-app");
    }
}
