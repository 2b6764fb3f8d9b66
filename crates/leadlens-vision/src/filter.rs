//! Filter stage: classify every downloaded photo, delete negatives.

use std::path::{Path, PathBuf};

use leadlens_core::ClassificationRecord;

use crate::client::VisionClient;
use crate::error::VisionError;

/// Classifies every image in `data_dir`, in ascending index order.
///
/// Per-file behaviour:
/// - a non-numeric filename stem is a data-format problem for that file
///   only: logged with `warn!` and skipped, never fatal;
/// - an empty predictions list means "no classification": the image is
///   dropped from the run silently (no record, file left in place);
/// - the top label equal to `negative_label` deletes the image file and
///   excludes it from further stages;
/// - any other top label emits a [`ClassificationRecord`].
///
/// After this returns, no image classified negative exists on disk.
///
/// # Errors
///
/// Returns [`VisionError`] if the directory cannot be read, an image cannot
/// be opened, or a classification call fails — any of which aborts the run.
pub async fn run_filter(
    client: &VisionClient,
    data_dir: &Path,
    negative_label: &str,
) -> Result<Vec<ClassificationRecord>, VisionError> {
    let mut records = Vec::new();

    for (index, path) in indexed_images(data_dir)? {
        let bytes = std::fs::read(&path).map_err(|e| VisionError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let response = client.classify(&bytes).await?;
        let Some(label) = response.top_label() else {
            tracing::debug!(index, path = %path.display(), "no predictions, dropping image");
            continue;
        };

        if label == negative_label {
            tracing::info!(index, path = %path.display(), "negative match, deleting image");
            std::fs::remove_file(&path).map_err(|e| VisionError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            continue;
        }

        records.push(ClassificationRecord {
            index,
            class_label: label.to_string(),
        });
    }

    tracing::info!(kept = records.len(), "filter stage complete");
    Ok(records)
}

/// Lists the files in `data_dir` whose stem parses as an index, sorted
/// ascending by that index. Non-numeric stems are skipped with a warning.
fn indexed_images(data_dir: &Path) -> Result<Vec<(u64, PathBuf)>, VisionError> {
    let entries = std::fs::read_dir(data_dir).map_err(|e| VisionError::Io {
        path: data_dir.display().to_string(),
        source: e,
    })?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| VisionError::Io {
            path: data_dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_images_sorts_numerically_and_skips_bad_stems() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["10.jpg", "2.jpg", "0.jpg", "notes.txt", "extra.jpg"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let images = indexed_images(dir.path()).unwrap();
        let indices: Vec<u64> = images.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 2, 10]);
    }

    #[test]
    fn indexed_images_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let result = indexed_images(&missing);
        assert!(
            matches!(result, Err(VisionError::Io { .. })),
            "expected Io error, got: {result:?}"
        );
    }
}
