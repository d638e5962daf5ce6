//! Plain-text reporting for the `summary` command.

pub mod format;

pub use format::*;
