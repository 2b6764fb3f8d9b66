//! Profile-photo download into the run's image directory.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;

use leadlens_core::{AppConfig, ProfileRecord};

use crate::error::CollectorError;

/// Builds the plain HTTP client used for photo downloads.
///
/// Photo URLs point at a CDN, not the authenticated site, so downloads do
/// not go through the [`crate::SearchSession`].
///
/// # Errors
///
/// Returns [`CollectorError::Http`] if the client cannot be constructed.
pub fn build_download_client(config: &AppConfig) -> Result<Client, CollectorError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(&config.user_agent)
        .build()?;
    Ok(client)
}

/// Downloads each record's photo to `{data_dir}/{index}.jpg`.
///
/// One failed download is logged and skipped: the record keeps its sheet row
/// and the on-disk sequence simply has a gap at that index. Returns the
/// number of photos written.
///
/// # Errors
///
/// Returns [`CollectorError::Io`] only if the image directory itself cannot
/// be created; per-photo failures never abort the run.
pub async fn download_photos(
    client: &Client,
    records: &[ProfileRecord],
    data_dir: &Path,
) -> Result<usize, CollectorError> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| CollectorError::Io {
            path: data_dir.display().to_string(),
            source: e,
        })?;

    let mut saved = 0usize;
    for record in records {
        let path = data_dir.join(format!("{}.jpg", record.index));
        match fetch_photo(client, &record.image_url).await {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(&path, &bytes).await {
                    tracing::warn!(
                        index = record.index,
                        path = %path.display(),
                        error = %e,
                        "failed to write photo, skipping"
                    );
                    continue;
                }
                saved += 1;
            }
            Err(e) => {
                tracing::warn!(
                    index = record.index,
                    url = %record.image_url,
                    error = %e,
                    "photo download failed, skipping"
                );
            }
        }
    }

    tracing::info!(saved, total = records.len(), "photo downloads complete");
    Ok(saved)
}

async fn fetch_photo(client: &Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}
