//! Region Module
//!
//! Provides the location model:
//! - Regions and ordered region sets
//! - Region set algebra (intersection, difference)
//! - Location catalog and candidate selection

pub mod catalog;
pub mod location;

pub use catalog::{select_candidates, LocationCatalog, StaticCatalog};
pub use location::{Region, RegionSet};
