//! Shared application state

use crate::config::ServerConfig;
use authorcheck_detectors::DetectionService;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;

/// State shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Scoring engine
    pub service: Arc<DetectionService>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Build the scoring engine from the configuration
    pub fn new(config: ServerConfig, metrics_handle: PrometheusHandle) -> anyhow::Result<Self> {
        let service = DetectionService::new(config.detection.clone())?;

        Ok(Self {
            config: Arc::new(config),
            service: Arc::new(service),
            metrics_handle,
        })
    }

    /// State with a private, uninstalled recorder
    ///
    /// Handlers still record through the global `metrics` facade, so the
    /// rendered output stays empty unless a recorder was installed.
    pub fn detached(config: ServerConfig) -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        Self::new(config, handle)
    }
}
