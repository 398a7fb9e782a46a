//! Shared application state for the web server.

use std::sync::Arc;

use repurpose_clinical::ClinicalAgent;
use repurpose_common::config::EngineConfig;
use repurpose_report::{PdfOptions, RepurposingEngine};

/// Shared state injected into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: RepurposingEngine,
    pub pdf: PdfOptions,
}

impl AppState {
    pub fn new(engine: RepurposingEngine, pdf: PdfOptions) -> Self {
        Self { engine, pdf }
    }

    /// Build the engine once; its trial client is reused by every request.
    pub fn from_config(config: &EngineConfig) -> repurpose_common::Result<Self> {
        let clinical = ClinicalAgent::from_config(&config.clinical)?;
        Ok(Self::new(
            RepurposingEngine::new(clinical),
            PdfOptions::from(&config.report),
        ))
    }
}

pub type SharedState = Arc<AppState>;
