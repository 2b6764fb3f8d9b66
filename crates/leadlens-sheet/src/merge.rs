//! Index-keyed merge of classification results into the profile sheet.

use std::collections::BTreeMap;

use leadlens_core::ClassificationRecord;

use crate::table::SheetRow;

/// Merges classification records into the existing sheet rows.
///
/// Right-merge semantics on `index`: only indices present in `records`
/// survive, each joined with its prior row's metadata when one exists.
/// Records carrying `negative_label` are dropped outright, so the persisted
/// table never contains a negative-match row. The result is sorted by index
/// and free of duplicate index rows, which makes the merge idempotent:
/// feeding its output back in as `existing` with the same `records` yields
/// the same table.
#[must_use]
pub fn merge_classifications(
    existing: &[SheetRow],
    records: &[ClassificationRecord],
    negative_label: &str,
) -> Vec<SheetRow> {
    let prior: BTreeMap<u64, &SheetRow> = existing.iter().map(|r| (r.index, r)).collect();

    let mut merged: BTreeMap<u64, SheetRow> = BTreeMap::new();
    for record in records {
        if record.class_label == negative_label {
            tracing::debug!(index = record.index, "dropping negative-match row");
            continue;
        }

        let mut row = prior.get(&record.index).map_or_else(
            || SheetRow {
                index: record.index,
                name: String::new(),
                profile_link: String::new(),
                image_url: String::new(),
                class: None,
            },
            |r| (*r).clone(),
        );
        row.class = Some(record.class_label.clone());
        merged.insert(record.index, row);
    }

    merged.into_values().collect()
}
