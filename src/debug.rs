//! Dev-only diagnostics: gated tracing, anonymized analysis logs and a small
//! in-process request/analysis history served under `/debug`.

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard},
    time::Instant,
};

use axum::{extract::Query, routing::get, Json, Router};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::sentiment::Algorithm;

pub const ENV_DEV_LOG: &str = "SENTIMENT_DEV_LOG";

const HISTORY_CAP: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub at_ms: u128,
    /// SHA-256 prefix of the analyzed text.
    pub id: String,
    pub algorithm: String,
    pub score: f64,
    pub confidence: u8,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct Stats {
    pub total_requests: u64,
    pub analyze_requests: u64,
    pub batch_requests: u64,
    pub rejected_requests: u64,
}

static HISTORY: Lazy<Mutex<VecDeque<AnalysisRecord>>> =
    Lazy::new(|| Mutex::new(VecDeque::with_capacity(HISTORY_CAP)));
static STATS: Lazy<Mutex<Stats>> = Lazy::new(|| Mutex::new(Stats::default()));

// A poisoned lock only means a panicking writer; the counters are still usable.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// Dev logs need BOTH `SENTIMENT_DEV_LOG=1` and a dev environment
/// (debug build or `SENTIMENT_ENV` in {local, development, dev}).
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SENTIMENT_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Compact tracing subscriber for development; no-op when the gate is off.
pub fn init_dev_tracing() {
    if !dev_logging_enabled() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sentiment=debug,info"));

    // try_init: tests may have installed a subscriber already
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

/// Short stable id for a text, so logs never carry the text itself.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Logs and remembers one analysis. Does nothing unless dev logging is on.
pub fn dev_log_analysis(algorithm: Algorithm, text: &str, score: f64, confidence: u8) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(text);
    info!(
        target: "sentiment",
        %id, %score, confidence, algorithm = algorithm.as_str(),
        chars = text.chars().count(),
        "analysis"
    );

    let mut h = lock(&HISTORY);
    if h.len() >= HISTORY_CAP {
        h.pop_front();
    }
    h.push_back(AnalysisRecord {
        at_ms: now_ms(),
        id,
        algorithm: algorithm.as_str().to_string(),
        score,
        confidence,
    });
}

pub fn record_request(is_batch: bool) {
    let mut s = lock(&STATS);
    s.total_requests += 1;
    if is_batch {
        s.batch_requests += 1;
    } else {
        s.analyze_requests += 1;
    }
}

pub fn record_rejected() {
    let mut s = lock(&STATS);
    s.total_requests += 1;
    s.rejected_requests += 1;
}

pub fn stats_snapshot() -> Stats {
    lock(&STATS).clone()
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// `/debug/history` and `/debug/stats`.
pub fn router() -> Router {
    Router::new()
        .route("/debug/history", get(history))
        .route("/debug/stats", get(stats))
}

async fn history(Query(q): Query<HistoryQuery>) -> Json<Vec<AnalysisRecord>> {
    let limit = q.limit.unwrap_or(50);
    let h = lock(&HISTORY);
    let start = h.len().saturating_sub(limit);
    Json(h.iter().skip(start).cloned().collect())
}

async fn stats() -> Json<Stats> {
    Json(stats_snapshot())
}

fn now_ms() -> u128 {
    static START: Lazy<Instant> = Lazy::new(Instant::now);
    START.elapsed().as_millis()
}
