//! Trial fetching with graceful degradation to a fixed mock set.

use std::sync::Arc;
use repurpose_common::config::ClinicalConfig;
use tracing::{debug, instrument, warn};

use crate::models::TrialRecord;
use crate::sources::clinicaltrials::ClinicalTrialsClient;
use crate::sources::TrialSource;

/// Which path a fetch took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Records came from the trial source.
    Fetched(Vec<TrialRecord>),
    /// The source failed; `trials` is the mock set and `reason` the failure.
    Degraded { trials: Vec<TrialRecord>, reason: String },
}

impl FetchOutcome {
    pub fn trials(&self) -> &[TrialRecord] {
        match self {
            FetchOutcome::Fetched(trials) => trials,
            FetchOutcome::Degraded { trials, .. } => trials,
        }
    }

    pub fn into_trials(self) -> Vec<TrialRecord> {
        match self {
            FetchOutcome::Fetched(trials) => trials,
            FetchOutcome::Degraded { trials, .. } => trials,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, FetchOutcome::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            FetchOutcome::Fetched(_) => None,
            FetchOutcome::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// The offline substitute used whenever the trial source cannot be read.
pub fn mock_trials(drug_name: &str) -> Vec<TrialRecord> {
    vec![
        TrialRecord::new(
            format!("Study of {} in Novel Disease X", drug_name),
            "Disease X",
            "Completed",
        ),
        TrialRecord::new(
            format!("{} Repurposing Trial in Condition Y", drug_name),
            "Condition Y",
            "Recruiting",
        ),
    ]
}

/// Queries a trial source and never fails: errors become [`FetchOutcome::Degraded`].
#[derive(Clone)]
pub struct TrialFetcher {
    source: Arc<dyn TrialSource>,
    max_results: usize,
}

impl TrialFetcher {
    pub fn new(source: Arc<dyn TrialSource>, max_results: usize) -> Self {
        Self { source, max_results }
    }

    /// Fetcher backed by ClinicalTrials.gov, owning one reusable HTTP client.
    pub fn from_config(config: &ClinicalConfig) -> repurpose_common::Result<Self> {
        let client = ClinicalTrialsClient::new(config)?;
        Ok(Self::new(Arc::new(client), config.max_results))
    }

    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn fetch(&self, drug_name: &str) -> FetchOutcome {
        match self.source.search_trials(drug_name, self.max_results).await {
            Ok(trials) => {
                debug!(n = trials.len(), "trials fetched");
                FetchOutcome::Fetched(trials)
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!(%reason, "trial source failed, using mock trials");
                FetchOutcome::Degraded { trials: mock_trials(drug_name), reason }
            }
        }
    }
}
