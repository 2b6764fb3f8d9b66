//! The run itself: wipe, then the four stages in order.

use leadlens_collector::{build_download_client, collect_profiles, download_photos, SearchSession};
use leadlens_core::{AppConfig, ReportRow};
use leadlens_llm::{caption_directory, ChatClient};
use leadlens_sheet::{merge_classifications, read_rows, write_profiles, write_rows};
use leadlens_vision::{run_filter, VisionClient};

use crate::error::PipelineError;
use crate::report::build_report;
use crate::wipe::wipe_run_state;

/// Stage the pipeline is currently in. A run moves through the phases in
/// declaration order and any stage error returns it to idle as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Scraping,
    Filtering,
    Captioning,
    Reporting,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunPhase::Scraping => write!(f, "scraping"),
            RunPhase::Filtering => write!(f, "filtering"),
            RunPhase::Captioning => write!(f, "captioning"),
            RunPhase::Reporting => write!(f, "reporting"),
        }
    }
}

/// Outcome of one completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub query: String,
    pub pages: u32,
    /// Profiles scraped (rows written to the sheet before filtering).
    pub scraped: usize,
    /// One row per surviving profile, sorted by index.
    pub rows: Vec<ReportRow>,
}

/// Executes one full pipeline run.
///
/// Steps, in order: wipe prior state, authenticate and scrape `pages` search
/// pages for `query`, persist the profile sheet, download photos, release
/// the session, classify and delete negatives, merge classifications into
/// the sheet, caption survivors, and join everything into report rows by
/// index. Each external call blocks the whole pipeline; no stage runs
/// concurrently with another.
///
/// Callers must not start a second run before this returns — the server
/// enforces that with an explicit guard.
///
/// # Errors
///
/// Returns [`PipelineError`] naming the failed stage. Nothing is retried;
/// a re-run restarts from the wipe step.
pub async fn run_pipeline(
    config: &AppConfig,
    query: &str,
    pages: u32,
) -> Result<RunReport, PipelineError> {
    wipe_run_state(config)?;

    tracing::info!(phase = %RunPhase::Scraping, query, pages, "run started");
    let session = SearchSession::login(config).await?;
    let profiles = collect_profiles(&session, query, pages).await?;
    write_profiles(&config.sheet_path, &profiles)?;

    let download_client = build_download_client(config)?;
    download_photos(&download_client, &profiles, &config.data_dir).await?;
    drop(session);

    tracing::info!(phase = %RunPhase::Filtering, profiles = profiles.len(), "collect complete");
    let vision = VisionClient::new(config)?;
    let classifications =
        run_filter(&vision, &config.data_dir, &config.vision_negative_label).await?;
    let existing = read_rows(&config.sheet_path)?;
    let merged = merge_classifications(&existing, &classifications, &config.vision_negative_label);
    write_rows(&config.sheet_path, &merged)?;

    tracing::info!(phase = %RunPhase::Captioning, survivors = merged.len(), "filter complete");
    let chat = ChatClient::new(config)?;
    let captions = caption_directory(&chat, &config.data_dir).await?;

    tracing::info!(phase = %RunPhase::Reporting, captions = captions.len(), "caption complete");
    let rows = build_report(&merged, &captions);

    tracing::info!(rows = rows.len(), "run finished");
    Ok(RunReport {
        query: query.to_string(),
        pages,
        scraped: profiles.len(),
        rows,
    })
}
