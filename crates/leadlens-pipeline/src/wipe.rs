//! Clearing prior run state.

use leadlens_core::AppConfig;

use crate::error::PipelineError;

/// Removes the image directory and the sheet file from any prior run.
///
/// Idempotent: absent paths are not an error. Every run begins here, and the
/// operator can also trigger it directly from the UI.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] if an existing path cannot be removed.
pub fn wipe_run_state(config: &AppConfig) -> Result<(), PipelineError> {
    if config.data_dir.exists() {
        std::fs::remove_dir_all(&config.data_dir).map_err(|e| PipelineError::Io {
            path: config.data_dir.display().to_string(),
            source: e,
        })?;
        tracing::info!(path = %config.data_dir.display(), "removed image directory");
    }

    if config.sheet_path.exists() {
        std::fs::remove_file(&config.sheet_path).map_err(|e| PipelineError::Io {
            path: config.sheet_path.display().to_string(),
            source: e,
        })?;
        tracing::info!(path = %config.sheet_path.display(), "removed sheet file");
    }

    Ok(())
}
