//! Tolerant parsing of free-text model output into a caption record.

use leadlens_core::CaptionRecord;

use crate::prompt::{ISSUE_LABEL, SOLUTION_LABEL};

/// Scans `text` line by line for the two fixed label prefixes.
///
/// Lines matching neither prefix are ignored. A response lacking one or both
/// labeled lines yields a record with the matching field unset — that is not
/// an error, callers handle partial records. When a label repeats, the last
/// occurrence wins.
#[must_use]
pub fn parse_caption(index: u64, text: &str) -> CaptionRecord {
    let mut issue = None;
    let mut solution = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix(ISSUE_LABEL) {
            issue = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix(SOLUTION_LABEL) {
            solution = Some(rest.trim().to_string());
        }
    }

    if issue.is_none() || solution.is_none() {
        tracing::warn!(index, has_issue = issue.is_some(), has_solution = solution.is_some(),
            "model response missing labeled line");
    }

    CaptionRecord {
        index,
        issue,
        solution,
    }
}
