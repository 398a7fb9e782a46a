//! repurpose-clinical — Clinical-evidence evaluation for drug repurposing.
//! Pipeline:
//! - Trial fetch (ClinicalTrials.gov, mock fallback when unreachable)
//! - Signal classification (trial count, signal, confidence, indications)
//! - Summary rendering (one paragraph for the composite report)

pub mod sources;
pub mod models;
pub mod fetcher;
pub mod classifier;
pub mod summary;

use std::sync::Arc;

use repurpose_common::config::ClinicalConfig;
use tracing::{info, instrument};

pub use fetcher::{FetchOutcome, TrialFetcher};
pub use models::{ClinicalReport, ClinicalSignal, Confidence, Signal, TrialRecord};

use sources::UnavailableSource;

/// Chains fetch → classify → render. Holds no per-request state, so one
/// instance can be shared across concurrent requests.
#[derive(Clone)]
pub struct ClinicalAgent {
    fetcher: TrialFetcher,
}

impl ClinicalAgent {
    pub fn new(fetcher: TrialFetcher) -> Self {
        Self { fetcher }
    }

    pub fn from_config(config: &ClinicalConfig) -> repurpose_common::Result<Self> {
        Ok(Self::new(TrialFetcher::from_config(config)?))
    }

    pub fn fetcher(&self) -> &TrialFetcher {
        &self.fetcher
    }

    /// Fetch and classify, keeping the fetch outcome visible.
    pub async fn evaluate(&self, drug_name: &str) -> (FetchOutcome, ClinicalSignal) {
        let outcome = self.fetcher.fetch(drug_name).await;
        let analysis = classifier::classify(outcome.trials());
        (outcome, analysis)
    }

    pub async fn evaluate_clinical_signals(&self, drug_name: &str) -> ClinicalSignal {
        self.evaluate(drug_name).await.1
    }

    #[instrument(skip(self))]
    pub async fn generate_clinical_summary(&self, drug_name: &str) -> ClinicalReport {
        let (outcome, analysis) = self.evaluate(drug_name).await;
        info!(
            trials = analysis.trial_count,
            signal = %analysis.signal,
            confidence = %analysis.confidence,
            degraded = outcome.is_degraded(),
            "clinical evidence evaluated"
        );
        ClinicalReport {
            drug: drug_name.to_string(),
            clinical_summary: summary::render(drug_name, &analysis),
            raw_analysis: analysis,
        }
    }

    /// Ready-to-display clinical paragraph. Never fails.
    pub async fn summarize_clinical_evidence(&self, drug_name: &str) -> String {
        self.generate_clinical_summary(drug_name).await.clinical_summary
    }
}

/// Clinical paragraph for `drug_name` using the default ClinicalTrials.gov
/// configuration.
///
/// Builds a fresh agent per call, so it is safe to drive from any tokio
/// runtime. Long-lived callers should hold a [`ClinicalAgent`] instead to
/// reuse its connection pool.
pub async fn summarize_clinical_evidence(drug_name: &str) -> String {
    summarize_clinical_evidence_with(&ClinicalConfig::default(), drug_name).await
}

/// [`summarize_clinical_evidence`] against an explicit configuration.
pub async fn summarize_clinical_evidence_with(config: &ClinicalConfig, drug_name: &str) -> String {
    let agent = ClinicalAgent::from_config(config).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not build trial client, clinical evidence will be mocked");
        ClinicalAgent::new(TrialFetcher::new(
            Arc::new(UnavailableSource::new(e.to_string())),
            config.max_results,
        ))
    });
    agent.summarize_clinical_evidence(drug_name).await
}
