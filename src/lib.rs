//! # regionscout - Region Capability Reconciliation
//!
//! Finds the cloud regions where a set of managed services can be deployed:
//! - **Region**: ordered region sets with intersection/difference
//! - **Probe**: per-service capability checks and verdict classification
//! - **Reconcile**: concurrent, failure-isolated probing of every region
//! - **Report**: rows, plain-text tables and JSON export
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use regionscout::probe::ScriptedProbe;
//! use regionscout::reconcile::{CancelSignal, RegionReconciler};
//! use regionscout::region::{Region, RegionSet};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let regions = RegionSet::new(vec![
//!         Region::new("eastus", "East US"),
//!         Region::new("westus", "West US"),
//!     ])
//!     .unwrap();
//!     let probe = Arc::new(ScriptedProbe::new("postgresql", "zone-redundant-ha"));
//!
//!     let result = RegionReconciler::new()
//!         .reconcile(&regions, probe, &CancelSignal::never())
//!         .await
//!         .unwrap();
//!     println!("{}", regionscout::report::render_verdicts(&result));
//! }
//! ```

pub mod core;
pub mod probe;
pub mod reconcile;
pub mod region;
pub mod report;

pub use crate::core::error::{Error, Result};
