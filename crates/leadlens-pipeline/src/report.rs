//! Report-row construction and outreach message rendering.

use std::collections::BTreeMap;

use leadlens_core::{CaptionRecord, ReportRow};
use leadlens_sheet::SheetRow;

/// Outreach message shown (editable) next to each surviving profile.
/// `{issue}` and `{solution}` are filled per row from the caption record.
const MESSAGE_TEMPLATE: &str = "\
Merhaba,

Ben kliniğimizin estetik danışmanıyım. Sizlere en yüksek kalitede hizmet \
sunmak ve sorunlarınızı çözmek için buradayız.

Belirlenen Sorun:

{issue}

Oluşturulan Çözüm:

{solution}

Bu süreçte size en iyi danışmanlık hizmetini sunmak için buradayız. \
Sorularınız için iletişim kanallarımızdan bize ulaşabilirsiniz.

Saygılarımızla,

Estetik Danışmanı";

/// Renders the outreach message for one row. Missing caption fields render
/// as empty sections; the operator edits the text before sending anyway.
#[must_use]
pub fn render_message(issue: Option<&str>, solution: Option<&str>) -> String {
    MESSAGE_TEMPLATE
        .replace("{issue}", issue.unwrap_or(""))
        .replace("{solution}", solution.unwrap_or(""))
}

/// Joins sheet rows with caption records by index equality.
///
/// Never positional: a caption whose index matches no sheet row is ignored,
/// and a sheet row without a caption gets a partial report row. Output is in
/// sheet-row order (ascending index, as persisted).
#[must_use]
pub fn build_report(rows: &[SheetRow], captions: &[CaptionRecord]) -> Vec<ReportRow> {
    let caption_by_index: BTreeMap<u64, &CaptionRecord> =
        captions.iter().map(|c| (c.index, c)).collect();

    rows.iter()
        .map(|row| {
            let caption = caption_by_index.get(&row.index);
            let issue = caption.and_then(|c| c.issue.clone());
            let solution = caption.and_then(|c| c.solution.clone());
            let message = render_message(issue.as_deref(), solution.as_deref());
            ReportRow {
                index: row.index,
                name: row.name.clone(),
                profile_link: row.profile_link.clone(),
                class_label: row.class.clone(),
                issue,
                solution,
                message,
            }
        })
        .collect()
}
