//! Structured JSON report built from the clinical, patent and market agents.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use repurpose_report::RepurposingReport;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    /// Generic drug name to analyze
    pub drug_name: String,
}

pub async fn analyze_drug(
    State(state): State<SharedState>,
    Query(params): Query<AnalyzeParams>,
) -> Json<RepurposingReport> {
    Json(state.engine.master_agent(&params.drug_name).await)
}
