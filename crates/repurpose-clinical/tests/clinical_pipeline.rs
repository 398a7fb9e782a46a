//! End-to-end clinical pipeline against fake sources and a local
//! study-fields server.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{extract::Query, http::StatusCode, response::Redirect, routing::get, Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use repurpose_clinical::classifier::classify;
use repurpose_clinical::fetcher::mock_trials;
use repurpose_clinical::sources::TrialSource;
use repurpose_clinical::{summarize_clinical_evidence_with, ClinicalAgent, Confidence, FetchOutcome, Signal, TrialFetcher, TrialRecord};
use repurpose_common::config::ClinicalConfig;

struct OutageSource;

#[async_trait]
impl TrialSource for OutageSource {
    async fn search_trials(&self, _drug: &str, _max: usize) -> anyhow::Result<Vec<TrialRecord>> {
        anyhow::bail!("connection refused")
    }
    fn name(&self) -> &'static str { "outage" }
}

struct StaticSource(Vec<TrialRecord>);

#[async_trait]
impl TrialSource for StaticSource {
    async fn search_trials(&self, _drug: &str, _max: usize) -> anyhow::Result<Vec<TrialRecord>> {
        Ok(self.0.clone())
    }
    fn name(&self) -> &'static str { "static" }
}

fn agent_with(source: impl TrialSource + 'static) -> ClinicalAgent {
    ClinicalAgent::new(TrialFetcher::new(Arc::new(source), 50))
}

/// Serve `router` on an ephemeral port and return the study-fields URL.
async fn serve(router: Router) -> String {
    serve_on("127.0.0.1", router).await
}

async fn serve_on(ip: &str, router: Router) -> String {
    let listener = tokio::net::TcpListener::bind((ip, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api/query/study_fields", addr)
}

/// A study-fields endpoint that answers every query with a 307 to `target`.
fn redirect_to(target: String) -> Router {
    Router::new().route(
        "/api/query/study_fields",
        get(move || async move { Redirect::temporary(&target) }),
    )
}

fn config_for(api_url: String, timeout_secs: u64) -> ClinicalConfig {
    ClinicalConfig { api_url, timeout_secs, ..ClinicalConfig::default() }
}

// ── Forced failure ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_outage_returns_exact_mock_set() {
    let agent = agent_with(OutageSource);
    let outcome = agent.fetcher().fetch("aspirin").await;
    assert!(outcome.is_degraded());

    let trials = outcome.into_trials();
    assert_eq!(trials, mock_trials("aspirin"));
    let conditions: Vec<_> = trials.iter().map(|t| t.condition.as_str()).collect();
    let statuses: Vec<_> = trials.iter().map(|t| t.status.as_str()).collect();
    assert_eq!(conditions, vec!["Disease X", "Condition Y"]);
    assert_eq!(statuses, vec!["Completed", "Recruiting"]);

    let analysis = classify(&trials);
    assert_eq!(analysis.signal, Signal::Emerging);
    assert_eq!(analysis.confidence, Confidence::Medium);
}

#[tokio::test]
async fn test_outage_summary_never_fails() {
    let report = agent_with(OutageSource).generate_clinical_summary("aspirin").await;
    assert_eq!(report.drug, "aspirin");
    assert_eq!(report.raw_analysis.trial_count, 2);
    assert!(report.clinical_summary.starts_with("Aspirin has 2 clinical trials"));
    assert!(report.clinical_summary.contains("Disease X, Condition Y"));
}

// ── Classifier contract over fetched data ─────────────────────────────────────

#[tokio::test]
async fn test_trial_count_matches_fetched_len() {
    let trials = vec![
        TrialRecord::new("t1", "A", "Completed"),
        TrialRecord::new("t2", "B", "Terminated"),
        TrialRecord::new("t3", "A", "Withdrawn"),
        TrialRecord::new("t4", "C", "Recruiting"),
    ];
    let agent = agent_with(StaticSource(trials));
    let (outcome, analysis) = agent.evaluate("metformin").await;
    assert!(!outcome.is_degraded());
    assert_eq!(analysis.trial_count, outcome.trials().len());
    assert_eq!(analysis.indications, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_real_zero_trials_is_no_evidence() {
    let agent = agent_with(StaticSource(vec![]));
    assert_eq!(agent.evaluate_clinical_signals("unobtainium").await.trial_count, 0);
    let report = agent.generate_clinical_summary("unobtainium").await;
    assert_eq!(report.raw_analysis.signal, Signal::NoEvidence);
    assert_eq!(report.raw_analysis.confidence, Confidence::Low);
    assert!(report.clinical_summary.contains("'unobtainium'"));
    assert!(report.clinical_summary.contains("insufficient"));
}

#[tokio::test]
async fn test_rendered_summary_lists_every_indication() {
    let trials = vec![
        TrialRecord::new("t1", "Glioma", "Active, not recruiting"),
        TrialRecord::new("t2", "Frailty", "Completed"),
        TrialRecord::new("t3", "Type 2 Diabetes", "Completed"),
    ];
    let summary = agent_with(StaticSource(trials)).summarize_clinical_evidence("metformin").await;
    assert_eq!(
        summary,
        "Metformin has 3 clinical trials across 3 conditions. \
         Evidence trend: Emerging clinical signal with High confidence. \
         Potential related indications include: Glioma, Frailty, Type 2 Diabetes."
    );
}

// ── ClinicalTrials.gov client over HTTP ───────────────────────────────────────

async fn study_fields(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let expr = params.get("expr").cloned().unwrap_or_default();
    Json(json!({
        "StudyFieldsResponse": {
            "Expression": &expr,
            "MinRank": params.get("min_rnk"),
            "MaxRank": params.get("max_rnk"),
            "StudyFields": [
                {"BriefTitle": [format!("{} for Glioma", expr)], "Condition": ["Glioma"], "OverallStatus": ["Completed"]},
                {"BriefTitle": [params.get("fields").cloned().unwrap_or_default()], "OverallStatus": ["Recruiting"]}
            ]
        }
    }))
}

#[tokio::test]
async fn test_client_sends_query_and_normalises_records() {
    let url = serve(Router::new().route("/api/query/study_fields", get(study_fields))).await;
    let fetcher = TrialFetcher::from_config(&config_for(url, 5)).unwrap();

    match fetcher.fetch("metformin").await {
        FetchOutcome::Fetched(trials) => {
            assert_eq!(trials.len(), 2);
            assert_eq!(trials[0], TrialRecord::new("metformin for Glioma", "Glioma", "Completed"));
            assert_eq!(trials[1].title, "BriefTitle,Condition,OverallStatus");
            assert_eq!(trials[1].condition, "");
        }
        other => panic!("expected Fetched, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_degrades() {
    let router = Router::new().route(
        "/api/query/study_fields",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let url = serve(router).await;
    let outcome = TrialFetcher::from_config(&config_for(url, 5)).unwrap().fetch("aspirin").await;
    assert!(outcome.reason().unwrap().contains("503"));
    assert_eq!(outcome.into_trials(), mock_trials("aspirin"));
}

#[tokio::test]
async fn test_malformed_body_degrades() {
    let router = Router::new().route(
        "/api/query/study_fields",
        get(|| async { Json(json!({"studies": []})) }),
    );
    let url = serve(router).await;
    let outcome = TrialFetcher::from_config(&config_for(url, 5)).unwrap().fetch("aspirin").await;
    assert!(outcome.is_degraded());
}

#[tokio::test]
async fn test_slow_source_times_out_and_degrades() {
    let router = Router::new().route(
        "/api/query/study_fields",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"StudyFieldsResponse": {"StudyFields": []}}))
        }),
    );
    let url = serve(router).await;
    let outcome = TrialFetcher::from_config(&config_for(url, 1)).unwrap().fetch("aspirin").await;
    assert!(outcome.is_degraded());
    assert_eq!(outcome.trials().len(), 2);
}

#[tokio::test]
async fn test_unlisted_host_degrades_without_network() {
    let url = "https://ct-mirror.example.org/api/query/study_fields".to_string();
    let outcome = TrialFetcher::from_config(&config_for(url, 1)).unwrap().fetch("aspirin").await;
    assert!(outcome.reason().unwrap().contains("allowlist"));
}

#[tokio::test]
async fn test_redirect_within_allowlist_is_followed() {
    let target = serve(Router::new().route("/api/query/study_fields", get(study_fields))).await;
    let url = serve(redirect_to(format!("{}?expr=metformin&fields=x", target))).await;

    let outcome = TrialFetcher::from_config(&config_for(url, 5)).unwrap().fetch("metformin").await;
    assert!(!outcome.is_degraded(), "{:?}", outcome.reason());
    assert_eq!(outcome.trials()[0].title, "metformin for Glioma");
}

#[tokio::test]
async fn test_redirect_to_unlisted_host_degrades() {
    // 127.0.0.2 is loopback on Linux but not on the allowlist.
    let smuggled = Router::new().route(
        "/api/query/study_fields",
        get(|| async {
            Json(json!({"StudyFieldsResponse": {"StudyFields": [
                {"BriefTitle": ["smuggled"], "Condition": ["Z"], "OverallStatus": ["Completed"]}
            ]}}))
        }),
    );
    let target = serve_on("127.0.0.2", smuggled).await;
    let url = serve(redirect_to(target)).await;

    let outcome = TrialFetcher::from_config(&config_for(url, 5)).unwrap().fetch("aspirin").await;
    assert!(outcome.is_degraded());
    assert!(outcome.reason().unwrap().contains("allowlist"));
    assert_eq!(outcome.into_trials(), mock_trials("aspirin"));
}

// ── Default-configuration entry point ─────────────────────────────────────────

/// Runs a study-fields server on its own thread and runtime for the life of the test binary.
fn background_server() -> String {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let url = serve(Router::new().route("/api/query/study_fields", get(study_fields))).await;
            tx.send(url).unwrap();
            std::future::pending::<()>().await;
        });
    });
    rx.recv().unwrap()
}

#[test]
fn test_summary_entry_point_works_from_separate_runtimes() {
    let config = config_for(background_server(), 5);

    for _ in 0..2 {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let summary = rt.block_on(summarize_clinical_evidence_with(&config, "metformin"));
        assert!(summary.starts_with("Metformin has 2 clinical trials"), "{}", summary);
        assert!(summary.contains("Glioma"));
    }
}
