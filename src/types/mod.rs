//! Data types for chart input.

mod chart;
mod config;
mod data;
mod style;

pub use chart::*;
pub use config::*;
pub use data::*;
pub use style::*;
