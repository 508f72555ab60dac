//! Core utilities and common types for regionscout.

pub mod error;
pub mod logging;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
