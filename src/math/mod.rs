//! Mathematical utilities: linear scales and easing.

pub mod ease;
pub mod scale;

pub use ease::*;
pub use scale::*;
