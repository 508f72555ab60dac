//! Row projections and text tables.
//!
//! Turns verdicts into rows for a presenter, and renders them as text
//! tables for logs and terminals.

use crate::core::Result;
use crate::reconcile::plan::DeploymentPlan;
use crate::reconcile::verdict::{ReconciliationResult, RegionVerdict};
use crate::region::RegionSet;
use comfy_table::{Cell, Table};
use serde::{Deserialize, Serialize};

/// Headers for single-service verdict tables.
pub const VERDICT_HEADERS: [&str; 5] = ["Location", "Display Name", "Enabled", "HA Enabled", "Reason"];

/// Headers for multi-service tables.
pub const SERVICE_HEADERS: [&str; 5] = ["Service", "Location", "Enabled", "HA Enabled", "Reason"];

/// Headers for plain location lists.
pub const LOCATION_HEADERS: [&str; 2] = ["Name", "Display Name"];

/// One region's verdict, flattened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictRow {
    pub code: String,
    pub display_name: String,
    pub deployable: bool,
    pub feature_supported: bool,
    pub reason: String,
}

impl From<&RegionVerdict> for VerdictRow {
    fn from(entry: &RegionVerdict) -> Self {
        Self {
            code: entry.region.code.clone(),
            display_name: entry.region.display_name.clone(),
            deployable: entry.verdict.is_deployable(),
            feature_supported: entry.verdict.supports_feature(),
            reason: entry.verdict.reason().unwrap_or_default().to_string(),
        }
    }
}

impl VerdictRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.code.clone(),
            self.display_name.clone(),
            self.deployable.to_string(),
            self.feature_supported.to_string(),
            self.reason.clone(),
        ]
    }
}

/// One service's verdict for one region, flattened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRow {
    pub service: String,
    pub code: String,
    pub deployable: bool,
    pub feature_supported: bool,
    pub reason: String,
}

impl ServiceRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.service.clone(),
            self.code.clone(),
            self.deployable.to_string(),
            self.feature_supported.to_string(),
            self.reason.clone(),
        ]
    }
}

/// Rows for a single reconciliation, in input order.
pub fn verdict_rows(result: &ReconciliationResult) -> Vec<VerdictRow> {
    result.iter().map(VerdictRow::from).collect()
}

/// Rows for every service of a plan, grouped by service.
pub fn service_rows(plan: &DeploymentPlan) -> Vec<ServiceRow> {
    plan.services
        .iter()
        .flat_map(|outcome| {
            outcome.result.iter().map(move |entry| {
                let row = VerdictRow::from(entry);
                ServiceRow {
                    service: outcome.service.clone(),
                    code: row.code,
                    deployable: row.deployable,
                    feature_supported: row.feature_supported,
                    reason: row.reason,
                }
            })
        })
        .collect()
}

/// Build a table with the given header and rows.
pub fn build_table<R>(headers: &[&str], rows: R) -> Table
where
    R: IntoIterator<Item = Vec<String>>,
{
    let mut table = Table::new();
    table.set_header(headers.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
    for row in rows {
        table.add_row(row);
    }
    table
}

/// Render a reconciliation as a verdict table.
pub fn render_verdicts(result: &ReconciliationResult) -> String {
    build_table(&VERDICT_HEADERS, verdict_rows(result).iter().map(VerdictRow::cells)).to_string()
}

/// Render every service of a plan as one table.
pub fn render_plan(plan: &DeploymentPlan) -> String {
    build_table(&SERVICE_HEADERS, service_rows(plan).iter().map(ServiceRow::cells)).to_string()
}

/// Render a region list.
pub fn render_locations(regions: &RegionSet) -> String {
    let rows = regions
        .iter()
        .map(|r| vec![r.code.clone(), r.display_name.clone()]);
    build_table(&LOCATION_HEADERS, rows).to_string()
}

/// Export a reconciliation as pretty JSON.
pub fn to_json(result: &ReconciliationResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
