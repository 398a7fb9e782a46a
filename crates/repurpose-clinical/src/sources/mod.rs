//! Trial source clients.

pub mod clinicaltrials;

use async_trait::async_trait;
use crate::models::TrialRecord;

/// Common interface for anything that can answer a free-text trial query.
#[async_trait]
pub trait TrialSource: Send + Sync {
    /// Search for trials mentioning `drug_name`, returning normalised records.
    async fn search_trials(
        &self,
        drug_name: &str,
        max_results: usize,
    ) -> anyhow::Result<Vec<TrialRecord>>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// A source that could not be constructed. Every query fails with the
/// construction error, which sends callers down the mock path.
#[derive(Debug, Clone)]
pub struct UnavailableSource {
    reason: String,
}

impl UnavailableSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl TrialSource for UnavailableSource {
    async fn search_trials(&self, _drug_name: &str, _max_results: usize) -> anyhow::Result<Vec<TrialRecord>> {
        anyhow::bail!("trial source unavailable: {}", self.reason)
    }

    fn name(&self) -> &'static str { "unavailable" }
}
