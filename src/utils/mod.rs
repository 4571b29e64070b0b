//! Numeric utilities shared by the models and the summary stage.

pub mod optimization;
pub mod stats;

pub use optimization::{minimize, FitOptions};
pub use stats::mean;
