//! Domain records shared across pipeline stages.
//!
//! The `index` field is the sole identity key tying a profile to its photo,
//! its classification, and its caption. It is assigned once by the collector
//! (extraction order over cards with a resolvable image URL, 0-based) and
//! every later stage re-derives it from the photo filename stem, sorts on it,
//! and joins on it explicitly. Positional pairing is never used.

use serde::{Deserialize, Serialize};

/// One scraped search-result card with a resolvable photo URL.
///
/// Immutable once written to the profile sheet. A record whose photo
/// download later fails still keeps its row (with a gap on disk).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub index: u64,
    pub name: String,
    pub profile_link: String,
    pub image_url: String,
}

/// Top-ranked class label for one surviving image, keyed by filename stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub index: u64,
    pub class_label: String,
}

/// Parsed LLM output for one image.
///
/// Either field may be absent when the model response lacked the matching
/// labeled line; callers must handle partial records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionRecord {
    pub index: u64,
    pub issue: Option<String>,
    pub solution: Option<String>,
}

/// Join of profile, classification, and caption on `index`, plus the
/// rendered outreach message. Built per render pass; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub index: u64,
    pub name: String,
    pub profile_link: String,
    pub class_label: Option<String>,
    pub issue: Option<String>,
    pub solution: Option<String>,
    pub message: String,
}
