//! ClinicalTrials.gov study-fields API client.
//!
//! Endpoint: https://clinicaltrials.gov/api/query/study_fields
//!
//! Response shape (each field value is a list, normally of one element):
//!
//! ```json
//! {"StudyFieldsResponse": {"StudyFields": [
//!     {"BriefTitle": ["..."], "Condition": ["..."], "OverallStatus": ["..."]}
//! ]}}
//! ```

use anyhow::Context;
use async_trait::async_trait;
use repurpose_common::config::ClinicalConfig;
use repurpose_common::sandbox::SandboxClient as Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::models::TrialRecord;
use super::TrialSource;

const CT_FIELDS: &str = "BriefTitle,Condition,OverallStatus";

pub struct ClinicalTrialsClient {
    client: Client,
    api_url: String,
}

impl ClinicalTrialsClient {
    /// Build a client with its own connection pool and the configured timeout.
    pub fn new(config: &ClinicalConfig) -> repurpose_common::Result<Self> {
        let client = Client::with_allowed_hosts(config.timeout(), &config.extra_allowed_hosts)?;
        Ok(Self { client, api_url: config.api_url.clone() })
    }

    async fn query_study_fields(&self, drug_name: &str, max_results: usize) -> anyhow::Result<String> {
        let body = self.client
            .get(&self.api_url)?
            .query(&[
                ("expr",    drug_name),
                ("fields",  CT_FIELDS),
                ("min_rnk", "1"),
                ("max_rnk", &max_results.to_string()),
                ("fmt",     "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

#[async_trait]
impl TrialSource for ClinicalTrialsClient {
    #[instrument(skip(self))]
    async fn search_trials(&self, drug_name: &str, max_results: usize) -> anyhow::Result<Vec<TrialRecord>> {
        let body = self.query_study_fields(drug_name, max_results).await?;
        let trials = parse_study_fields(&body)?;
        debug!(n = trials.len(), "ClinicalTrials.gov studies retrieved");
        Ok(trials)
    }

    fn name(&self) -> &'static str { "clinicaltrials.gov" }
}

// ── Response parsing ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct StudyFieldsEnvelope {
    #[serde(rename = "StudyFieldsResponse")]
    response: StudyFieldsResponse,
}

#[derive(Debug, Deserialize)]
struct StudyFieldsResponse {
    #[serde(rename = "StudyFields")]
    study_fields: Vec<StudyFieldsRow>,
}

#[derive(Debug, Deserialize)]
struct StudyFieldsRow {
    #[serde(rename = "BriefTitle", default)]
    brief_title: Option<Vec<String>>,
    #[serde(rename = "Condition", default)]
    condition: Option<Vec<String>>,
    #[serde(rename = "OverallStatus", default)]
    overall_status: Option<Vec<String>>,
}

/// First element of a field list. An absent field is `""`; a present but
/// empty list means the response is not what we asked for.
fn first_value(values: Option<Vec<String>>, field: &str) -> anyhow::Result<String> {
    match values {
        None => Ok(String::new()),
        Some(v) => v
            .into_iter()
            .next()
            .with_context(|| format!("empty {} list in study record", field)),
    }
}

/// Parse a study-fields JSON body into trial records.
pub fn parse_study_fields(body: &str) -> anyhow::Result<Vec<TrialRecord>> {
    let envelope: StudyFieldsEnvelope = serde_json::from_str(body)
        .context("malformed StudyFieldsResponse body")?;

    envelope.response.study_fields
        .into_iter()
        .map(|row| -> anyhow::Result<TrialRecord> {
            Ok(TrialRecord {
                title:     first_value(row.brief_title, "BriefTitle")?,
                condition: first_value(row.condition, "Condition")?,
                status:    first_value(row.overall_status, "OverallStatus")?,
            })
        })
        .collect()
}
