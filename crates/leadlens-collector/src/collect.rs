//! Paginated profile collection.

use leadlens_core::ProfileRecord;

use crate::error::CollectorError;
use crate::extract::extract_profile_cards;
use crate::session::SearchSession;

/// Fetches `pages` search pages for `query` and returns one record per card
/// with a resolvable image URL.
///
/// Indices are assigned sequentially in extraction order across all pages,
/// starting at 0. Cards without an image URL are dropped silently and never
/// consume an index. A page that fails to fetch aborts the run; a page with
/// no recognisable cards contributes nothing.
///
/// # Errors
///
/// Returns [`CollectorError`] if any search-page fetch fails.
pub async fn collect_profiles(
    session: &SearchSession,
    query: &str,
    pages: u32,
) -> Result<Vec<ProfileRecord>, CollectorError> {
    let mut records = Vec::new();

    for page in 1..=pages {
        let html = session.fetch_search_page(query, page).await?;
        let cards = extract_profile_cards(&html);
        let card_count = cards.len();

        let mut kept = 0usize;
        for card in cards {
            let Some(image_url) = card.image_url else {
                continue;
            };
            records.push(ProfileRecord {
                index: records.len() as u64,
                name: card.name,
                profile_link: card.profile_link,
                image_url,
            });
            kept += 1;
        }

        tracing::info!(page, cards = card_count, kept, "scraped search page");
    }

    Ok(records)
}
