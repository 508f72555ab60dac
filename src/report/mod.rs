//! Report Module
//!
//! Flattens verdicts into rows and renders tables and JSON.

pub mod table;

pub use table::{
    build_table, render_locations, render_plan, render_verdicts, service_rows, to_json, verdict_rows,
    ServiceRow, VerdictRow,
};
