//! Master agent: merges the clinical, patent and market narratives into one report.

use repurpose_clinical::ClinicalAgent;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::market::market_agent_summary;
use crate::patent::patent_agent_summary;
use crate::sanitize::sanitize;

/// Static until a scoring model exists.
pub const REPURPOSING_SCORE: &str = "7.8 / 10 - High repurposing potential";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepurposingReport {
    pub drug: String,
    pub score: String,
    pub clinical_summary: String,
    pub patent_summary: String,
    pub market_summary: String,
    pub final_recommendation: String,
}

impl RepurposingReport {
    /// Download name for the rendered PDF.
    pub fn pdf_filename(&self) -> String {
        format!("{}_repurposing_report.pdf", self.drug)
    }
}

#[derive(Clone)]
pub struct RepurposingEngine {
    clinical: ClinicalAgent,
}

impl RepurposingEngine {
    pub fn new(clinical: ClinicalAgent) -> Self {
        Self { clinical }
    }

    /// Build the composite report. Every field is sanitised, the drug name first.
    #[instrument(skip(self))]
    pub async fn master_agent(&self, drug_name: &str) -> RepurposingReport {
        let drug = sanitize(drug_name);

        let clinical = sanitize(&self.clinical.summarize_clinical_evidence(&drug).await);
        let patent = sanitize(&patent_agent_summary(&drug));
        let market = sanitize(&market_agent_summary(&drug));

        info!(drug = %drug, "repurposing report assembled");

        RepurposingReport {
            final_recommendation: sanitize(&final_recommendation(&drug)),
            score: sanitize(REPURPOSING_SCORE),
            clinical_summary: clinical,
            patent_summary: patent,
            market_summary: market,
            drug,
        }
    }
}

fn final_recommendation(drug: &str) -> String {
    format!(
        "{} seems suitable for repurposing into 1-2 high-value adjacent indications.\n\
         Recommended next steps:\n\
         1) Prioritize 1 niche indication.\n\
         2) Design differentiation (dose / formulation / combination).\n\
         3) Prepare targeted preclinical / clinical plan + IP filing.",
        drug
    )
}
