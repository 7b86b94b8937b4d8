//! PipelineRunner — extraction, scoring, routing and export for one batch.
//!
//! Documents are processed one at a time, in upload order. Each yields a
//! `DocumentOutcome`; a failure on one document never stops the batch.

use std::collections::HashSet;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::extraction::TextExtractor;
use crate::models::criteria::Criteria;
use crate::models::document::Document;
use crate::models::score::{Category, ScoreResult, Weights};
use crate::storage::{numbered_file_name, object_key, safe_file_name, DocumentSink, StorageError};
use crate::vetting::classifier::classify;
use crate::vetting::export::{ResultRow, ResultTables, EXPORT_FILE_NAME};
use crate::vetting::fields::{extract_emails, extract_phone_numbers};
use crate::vetting::matcher::evaluate;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Workbook export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

/// Result of pushing one document through the pipeline. `stored_at` is the
/// run-specific location of accepted bytes and is kept apart from the score
/// so identical inputs give identical `ScoreResult`s across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Scored {
        #[serde(flatten)]
        result: ScoreResult,
        stored_at: Option<String>,
    },
    Failed { file_name: String, error: String },
}

impl DocumentOutcome {
    /// Reviewer-facing one-liner, e.g. `✅ cv.pdf - SKOR 70 (BAGUS SEKALI)`.
    pub fn status_line(&self) -> String {
        match self {
            DocumentOutcome::Scored { result: r, .. } if r.category.is_accepted() => {
                format!("✅ {} - SKOR {} ({})", r.file_name, r.score, r.category.label())
            }
            DocumentOutcome::Scored { result: r, .. } => {
                format!("❌ {} - SKOR {} (Ditolak)", r.file_name, r.score)
            }
            DocumentOutcome::Failed { file_name, error } => {
                format!("⚠️ Error processing {file_name}: {error}")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<DocumentOutcome>,
    pub tables: ResultTables,
}

impl RunReport {
    pub fn status_lines(&self) -> Vec<String> {
        self.outcomes.iter().map(DocumentOutcome::status_line).collect()
    }

    /// Output prefix shared by every object this run writes.
    pub fn prefix(&self) -> String {
        self.run_id.to_string()
    }
}

/// The finalized workbook and where it was stored.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub bytes: Bytes,
    pub location: String,
}

pub struct PipelineRunner {
    extractor: Arc<TextExtractor>,
    sink: Arc<dyn DocumentSink>,
    weights: Weights,
}

impl PipelineRunner {
    pub fn new(extractor: Arc<TextExtractor>, sink: Arc<dyn DocumentSink>, weights: Weights) -> Self {
        Self {
            extractor,
            sink,
            weights,
        }
    }

    pub async fn run(&self, documents: Vec<Document>, criteria: &Criteria) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let prefix = run_id.to_string();
        info!(%run_id, documents = documents.len(), "Starting vetting run");

        let mut tables = ResultTables::default();
        let mut outcomes = Vec::with_capacity(documents.len());
        let mut used_keys = HashSet::new();

        for document in documents {
            let file_name = document.name.clone();
            let outcome = match self.process(document, criteria, &prefix, &mut used_keys).await {
                Ok(Processed {
                    result,
                    stored_at,
                    row,
                }) => {
                    if let Some(row) = row {
                        tables.append(result.category, row);
                    }
                    DocumentOutcome::Scored { result, stored_at }
                }
                Err(e) => DocumentOutcome::Failed {
                    file_name,
                    error: e.to_string(),
                },
            };

            match &outcome {
                DocumentOutcome::Failed { .. } => warn!(%run_id, "{}", outcome.status_line()),
                DocumentOutcome::Scored { .. } => info!(%run_id, "{}", outcome.status_line()),
            }
            outcomes.push(outcome);
        }

        info!(
            %run_id,
            highly_eligible = tables.highly_eligible.len(),
            eligible = tables.eligible.len(),
            "Vetting run finished"
        );

        RunReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            outcomes,
            tables,
        }
    }

    /// Scores one document and, if accepted, persists its bytes. The export
    /// row is only handed back once the bytes are stored.
    async fn process(
        &self,
        document: Document,
        criteria: &Criteria,
        prefix: &str,
        used_keys: &mut HashSet<String>,
    ) -> Result<Processed, PipelineError> {
        let extracted = self.extractor.extract(&document).await;
        let text = extracted.text();

        let flags = evaluate(text, criteria);
        let (score, category) = classify(&flags, &self.weights);
        let emails = extract_emails(text);
        let phones = extract_phone_numbers(text);

        let result = ScoreResult {
            file_name: document.name.clone(),
            format: document.format,
            extraction: extracted.status(),
            flags,
            score,
            category,
            emails,
            phones,
        };

        let Some(bucket) = category.bucket() else {
            return Ok(Processed {
                result,
                stored_at: None,
                row: None,
            });
        };

        let key = unique_key(prefix, bucket, &document.name, used_keys)?;
        let stored_at = self.sink.put(&key, document.bytes).await?;
        let row = ResultRow::new(&result.file_name, &result.emails, &result.phones);
        Ok(Processed {
            result,
            stored_at: Some(stored_at),
            row: Some(row),
        })
    }

    /// Renders the tables to XLSX and stores the workbook next to the buckets.
    pub async fn export(&self, report: &RunReport) -> Result<ExportArtifact, PipelineError> {
        let bytes = Bytes::from(report.tables.to_xlsx()?);
        let key = format!("{}/{}", report.prefix(), EXPORT_FILE_NAME);
        let location = self.sink.put(&key, bytes.clone()).await?;
        info!(run_id = %report.run_id, %location, "Saved vetting results");

        Ok(ExportArtifact {
            file_name: EXPORT_FILE_NAME,
            bytes,
            location,
        })
    }
}

struct Processed {
    result: ScoreResult,
    stored_at: Option<String>,
    row: Option<ResultRow>,
}

/// Object key for `file_name` that no earlier document in this run has taken.
/// A repeated name gets a ` (n)` suffix instead of overwriting the first file.
fn unique_key(
    prefix: &str,
    bucket: &str,
    file_name: &str,
    used_keys: &mut HashSet<String>,
) -> Result<String, StorageError> {
    let base = safe_file_name(file_name)?;
    let mut key = object_key(prefix, bucket, base)?;
    let mut n = 1;
    while used_keys.contains(&key) {
        n += 1;
        key = object_key(prefix, bucket, &numbered_file_name(base, n))?;
    }
    if n > 1 {
        warn!(file = %file_name, %key, "Duplicate file name in run, storing under a numbered name");
    }
    used_keys.insert(key.clone());
    Ok(key)
}

/// Counts per category, handy for summaries.
pub fn category_counts(report: &RunReport) -> [(Category, usize); 3] {
    let count = |c: Category| {
        report
            .outcomes
            .iter()
            .filter(|o| matches!(o, DocumentOutcome::Scored { result, .. } if result.category == c))
            .count()
    };
    [
        (Category::HighlyEligible, count(Category::HighlyEligible)),
        (Category::Eligible, count(Category::Eligible)),
        (Category::Rejected, count(Category::Rejected)),
    ]
}
