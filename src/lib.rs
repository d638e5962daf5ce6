//! `census-scatter` library crate.
//!
//! The binary (`scatter`) is a thin wrapper around this library so that:
//!
//! - chart state and transitions are testable without a terminal
//! - the TUI and the exporters share one controller
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod chart;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod tui;
