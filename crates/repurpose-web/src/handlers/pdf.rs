//! PDF download of the composite report.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use repurpose_common::error::ApiError;
use repurpose_report::build_pdf_from_report;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct GeneratePdfRequest {
    pub drug_name: Option<String>,
}

pub async fn generate_pdf(
    State(state): State<SharedState>,
    Json(payload): Json<GeneratePdfRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let drug_name = payload
        .drug_name
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing drug_name".to_string()))?;

    let report = state.engine.master_agent(&drug_name).await;
    let bytes = build_pdf_from_report(&report, &state.pdf)?;
    let filename = report.pdf_filename();
    info!(%filename, bytes = bytes.len(), "PDF generated");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename={}", filename)),
        ],
        bytes,
    ))
}
