//! Composite report assembly with a simulated trial-source outage.

use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use repurpose_clinical::sources::TrialSource;
use repurpose_clinical::{ClinicalAgent, TrialFetcher, TrialRecord};
use repurpose_report::engine::REPURPOSING_SCORE;
use repurpose_report::{build_pdf_from_report, PdfOptions, RepurposingEngine};

struct OutageSource;

#[async_trait]
impl TrialSource for OutageSource {
    async fn search_trials(&self, _drug: &str, _max: usize) -> anyhow::Result<Vec<TrialRecord>> {
        anyhow::bail!("dns error")
    }
    fn name(&self) -> &'static str { "outage" }
}

struct OneTrial;

#[async_trait]
impl TrialSource for OneTrial {
    async fn search_trials(&self, drug: &str, _max: usize) -> anyhow::Result<Vec<TrialRecord>> {
        Ok(vec![TrialRecord::new(format!("{} \u{2014} pilot", drug), "Sjögren\u{2019}s Syndrome", "Completed")])
    }
    fn name(&self) -> &'static str { "one" }
}

fn engine(source: impl TrialSource + 'static) -> RepurposingEngine {
    RepurposingEngine::new(ClinicalAgent::new(TrialFetcher::new(Arc::new(source), 50)))
}

#[tokio::test]
async fn test_report_fields_from_all_agents() {
    let report = engine(OutageSource).master_agent("aspirin").await;

    assert_eq!(report.drug, "aspirin");
    assert_eq!(report.score, REPURPOSING_SCORE);
    assert!(report.clinical_summary.starts_with("Aspirin has 2 clinical trials across 2 conditions."));
    assert!(report.patent_summary.starts_with("Primary composition-of-matter patents for aspirin"));
    assert!(report.market_summary.starts_with("The current market for aspirin"));
    assert!(report.final_recommendation.starts_with("aspirin seems suitable"));
}

#[tokio::test]
async fn test_report_is_sanitised() {
    let report = engine(OneTrial).master_agent("aspirin \u{1F48A}").await;

    assert_eq!(report.drug, "aspirin ");
    assert!(report.clinical_summary.contains("Sjögren's Syndrome"));
    assert!(report.clinical_summary.chars().all(|c| (c as u32) <= 0xFF));
}

#[tokio::test]
async fn test_report_serialises_with_expected_keys() {
    let report = engine(OutageSource).master_agent("aspirin").await;
    let json = serde_json::to_value(&report).unwrap();
    for key in ["drug", "score", "clinical_summary", "patent_summary", "market_summary", "final_recommendation"] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
}

#[tokio::test]
async fn test_pdf_from_assembled_report() {
    let report = engine(OutageSource).master_agent("aspirin").await;
    let bytes = build_pdf_from_report(&report, &PdfOptions::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(report.pdf_filename(), "aspirin_repurposing_report.pdf");
}
