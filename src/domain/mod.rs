//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the typed field/axis vocabulary (`Field`, `Axis`) and its lookup table
//! - dataset rows (`Record`)
//! - drawing surface settings (`ChartConfig`, `Margins`)

pub mod types;

pub use types::*;
