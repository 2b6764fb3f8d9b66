//! Caption stage: describe each surviving photo through the persona prompt.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use leadlens_core::CaptionRecord;

use crate::client::ChatClient;
use crate::error::LlmError;
use crate::parse::parse_caption;
use crate::prompt::{user_prompt, SYSTEM_PROMPT};

/// Image extensions the caption stage accepts.
const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Captions every allowed image in `data_dir`, in ascending index order.
///
/// Each file is base64-encoded and submitted with the fixed persona prompts;
/// the free-text response is parsed into a [`CaptionRecord`]. Files with a
/// non-numeric stem or a disallowed extension are skipped. Missing labeled
/// lines in a response produce a partial record, not an error; a failed
/// completion call aborts the run.
///
/// # Errors
///
/// Returns [`LlmError`] if the directory or a file cannot be read, or a
/// completion call fails.
pub async fn caption_directory(
    client: &ChatClient,
    data_dir: &Path,
) -> Result<Vec<CaptionRecord>, LlmError> {
    let mut records = Vec::new();

    for (index, path) in allowed_images(data_dir)? {
        let bytes = std::fs::read(&path).map_err(|e| LlmError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let payload = BASE64.encode(&bytes);

        let text = client.complete(SYSTEM_PROMPT, &user_prompt(&payload)).await?;
        records.push(parse_caption(index, &text));
    }

    tracing::info!(captioned = records.len(), "caption stage complete");
    Ok(records)
}

/// Lists allowed image files sorted ascending by their numeric stem.
/// Non-numeric stems and other extensions are skipped with a log line.
fn allowed_images(data_dir: &Path) -> Result<Vec<(u64, PathBuf)>, LlmError> {
    let entries = std::fs::read_dir(data_dir).map_err(|e| LlmError::Io {
        path: data_dir.display().to_string(),
        source: e,
    })?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LlmError::Io {
            path: data_dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() || !has_allowed_extension(&path) {
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        match stem.parse::<u64>() {
            Ok(index) => images.push((index, path)),
            Err(_) => {
                tracing::warn!(
                    path = %path.display(),
                    "filename stem is not a numeric index, skipping file"
                );
            }
        }
    }

    images.sort_by_key(|(index, _)| *index);
    Ok(images)
}

fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}
