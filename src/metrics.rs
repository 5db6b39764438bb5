//! Prometheus exposition for analysis counters.

use axum::{routing::get, Router};
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::sentiment::Algorithm;

pub const ANALYSES_TOTAL: &str = "sentiment_analyses_total";
pub const REJECTED_TOTAL: &str = "sentiment_rejected_requests_total";

// A process may only install one global recorder.
static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder, or reuse the one already installed.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE.get_or_try_init(|| {
            let handle = PrometheusBuilder::new().install_recorder()?;
            // Register the series up front so a fresh scrape already lists them.
            for alg in Algorithm::ALL {
                counter!(ANALYSES_TOTAL, "algorithm" => alg.as_str()).increment(0);
            }
            counter!(REJECTED_TOTAL).increment(0);
            Ok::<_, anyhow::Error>(handle)
        })?;
        Ok(Self {
            handle: handle.clone(),
        })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

pub fn record_analysis(algorithm: Algorithm) {
    counter!(ANALYSES_TOTAL, "algorithm" => algorithm.as_str()).increment(1);
}

pub fn record_rejected() {
    counter!(REJECTED_TOTAL).increment(1);
}
