//! Runtime configuration.

pub mod ensemble;

pub use ensemble::{EnsembleConfig, ThresholdsSection, WeightsSection};
