//! Axum route handlers for the Vetting API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::criteria::{Criteria, CriteriaInput};
use crate::models::document::Document;
use crate::state::AppState;
use crate::vetting::export::ResultTables;
use crate::vetting::runner::{category_counts, DocumentOutcome, ExportArtifact, RunReport};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Parsed multipart body: criteria text fields plus every uploaded file.
#[derive(Debug)]
pub struct VettingUpload {
    pub criteria: CriteriaInput,
    pub documents: Vec<Document>,
}

#[derive(Debug, Serialize)]
pub struct VettingSummary {
    pub total: usize,
    pub highly_eligible: usize,
    pub eligible: usize,
    pub rejected: usize,
    pub failed: usize,
    pub exported_rows: usize,
}

#[derive(Debug, Serialize)]
pub struct VettingResponse {
    pub run_id: Uuid,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: chrono::DateTime<chrono::Utc>,
    pub summary: VettingSummary,
    pub status_lines: Vec<String>,
    pub outcomes: Vec<DocumentOutcome>,
    pub tables: ResultTables,
    pub export_location: String,
}

impl VettingResponse {
    fn new(report: RunReport, artifact: &ExportArtifact) -> Self {
        let [(_, highly_eligible), (_, eligible), (_, rejected)] = category_counts(&report);
        let summary = VettingSummary {
            total: report.outcomes.len(),
            highly_eligible,
            eligible,
            rejected,
            failed: report.outcomes.len() - highly_eligible - eligible - rejected,
            exported_rows: report.tables.len(),
        };
        Self {
            run_id: report.run_id,
            started_at: report.started_at,
            finished_at: report.finished_at,
            summary,
            status_lines: report.status_lines(),
            outcomes: report.outcomes,
            tables: report.tables,
            export_location: artifact.location.clone(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/vetting/criteria/default
///
/// The criteria the vetting form is pre-filled with.
pub async fn handle_default_criteria() -> Json<CriteriaInput> {
    Json(CriteriaInput::default())
}

/// POST /api/v1/vetting
///
/// Runs the full pipeline over the uploaded files, stores accepted files and
/// the workbook, and returns per-document outcomes.
pub async fn handle_run_vetting(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<VettingResponse>, AppError> {
    let (report, artifact) = run_and_export(&state, multipart).await?;
    Ok(Json(VettingResponse::new(report, &artifact)))
}

/// POST /api/v1/vetting/export
///
/// Same pipeline, but responds with the workbook itself as a download.
pub async fn handle_run_vetting_export(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let (report, artifact) = run_and_export(&state, multipart).await?;
    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (
                header::HeaderName::from_static("x-vetting-run-id"),
                report.run_id.to_string(),
            ),
        ],
        artifact.bytes,
    ))
}

async fn run_and_export(
    state: &AppState,
    multipart: Multipart,
) -> Result<(RunReport, ExportArtifact), AppError> {
    let upload = read_upload(multipart).await?;
    if upload.documents.is_empty() {
        return Err(AppError::Validation("No files uploaded".to_string()));
    }

    let criteria = Criteria::parse(&upload.criteria);
    let report = state.runner.run(upload.documents, &criteria).await;
    let artifact = state.runner.export(&report).await?;
    Ok((report, artifact))
}

/// Reads criteria text fields and file parts. Missing criteria fields keep
/// their defaults; file parts without a name or content are skipped.
pub async fn read_upload(mut multipart: Multipart) -> Result<VettingUpload, AppError> {
    let mut criteria = CriteriaInput::default();
    let mut documents = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let bytes = field.bytes().await?;
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            documents.push(Document::new(file_name, bytes));
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "location" => criteria.location = value,
            "education" => criteria.education = value,
            "major" => criteria.major = value,
            "company" => criteria.company = value,
            "experience" => criteria.experience = value,
            other => debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    Ok(VettingUpload {
        criteria,
        documents,
    })
}
