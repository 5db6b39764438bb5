// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod debug;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod samples;
pub mod sentiment;
pub mod text;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{
    Analysis, Analyzers, EnsembleAnalyzer, EnsembleResult, LexiconScorer, PatternAnalyzer,
};
pub use crate::api::{create_router, AppState};
pub use crate::config::EnsembleConfig;
pub use crate::error::SentimentError;
pub use crate::lexicon::Lexicon;
pub use crate::sentiment::{Algorithm, AnalysisResult, SentimentClass};
