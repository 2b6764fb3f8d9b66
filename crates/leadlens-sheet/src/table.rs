//! Whole-file read/write of the profile sheet.

use std::path::Path;

use serde::{Deserialize, Serialize};

use leadlens_core::ProfileRecord;

use crate::error::SheetError;

/// One persisted sheet row. Column names match the original spreadsheet
/// format; `class` stays empty until the filter stage merges a
/// classification in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub index: u64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Profile Link")]
    pub profile_link: String,
    #[serde(rename = "Image URL")]
    pub image_url: String,
    pub class: Option<String>,
}

impl SheetRow {
    #[must_use]
    pub fn from_profile(record: &ProfileRecord) -> Self {
        Self {
            index: record.index,
            name: record.name.clone(),
            profile_link: record.profile_link.clone(),
            image_url: record.image_url.clone(),
            class: None,
        }
    }
}

/// Reads all rows from the sheet at `path`.
///
/// A missing file is an empty base, not an error: the filter stage merges
/// into whatever table exists at the time it runs.
///
/// # Errors
///
/// Returns [`SheetError`] if the file exists but cannot be read or parsed.
pub fn read_rows(path: &Path) -> Result<Vec<SheetRow>, SheetError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "sheet absent, treating as empty base");
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| SheetError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: SheetRow = result.map_err(|e| SheetError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Overwrites the sheet at `path` with `rows`.
///
/// # Errors
///
/// Returns [`SheetError`] if the file cannot be created or written.
pub fn write_rows(path: &Path, rows: &[SheetRow]) -> Result<(), SheetError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SheetError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| SheetError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    for row in rows {
        writer.serialize(row).map_err(|e| SheetError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    writer.flush().map_err(|e| SheetError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Overwrites the sheet with freshly collected profile records
/// (one row per valid card, `class` unset).
///
/// # Errors
///
/// Returns [`SheetError`] if the file cannot be written.
pub fn write_profiles(path: &Path, records: &[ProfileRecord]) -> Result<(), SheetError> {
    let rows: Vec<SheetRow> = records.iter().map(SheetRow::from_profile).collect();
    write_rows(path, &rows)
}
