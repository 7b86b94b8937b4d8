use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use resume_vetting::config::{Config, StorageBackend};
use resume_vetting::extraction::{TesseractCli, TextExtractor};
use resume_vetting::models::score::Weights;
use resume_vetting::routes::build_router;
use resume_vetting::state::AppState;
use resume_vetting::storage::{DocumentSink, LocalDirSink, S3Sink};
use resume_vetting::vetting::runner::PipelineRunner;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vetting API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize OCR + text extraction
    let mut ocr = TesseractCli::new(&config.tesseract_cmd);
    if let Some(langs) = &config.ocr_languages {
        ocr = ocr.with_languages(langs);
    }
    info!(
        "OCR engine: {} (timeout {:?})",
        ocr.command().display(),
        config.extraction_timeout
    );
    let extractor = Arc::new(TextExtractor::new(Arc::new(ocr), config.extraction_timeout));

    // Initialize output sink (local folder or S3 / MinIO)
    let sink: Arc<dyn DocumentSink> = match &config.storage {
        StorageBackend::Local { output_dir } => {
            info!("Writing results to {}", output_dir.display());
            Arc::new(LocalDirSink::new(output_dir))
        }
        StorageBackend::S3(s3) => {
            info!("Writing results to s3://{}", s3.bucket);
            Arc::new(S3Sink::from_config(s3).await)
        }
    };

    let weights = Weights::default();
    info!("Scoring weights: {:?} (max {})", weights, weights.max_score());

    // Build app state
    let state = AppState {
        runner: Arc::new(PipelineRunner::new(extractor, sink, weights)),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the upload form has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
