//! Input/output helpers.
//!
//! - dataset fetch + CSV ingest + validation (`ingest`)
//! - SVG and JSON view exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
