//! Profile-card extraction from rendered search-result markup.
//!
//! The markup is scraped, not an API contract, so extraction is tolerant by
//! design: regex scans anchored on the site's stable class-name markers, and
//! malformed markup yields an empty result rather than an error.

use regex::Regex;

/// Marker class on each search-result card container.
const CARD_MARKER: &str = "display-flex align-items-center";
/// Marker class on the profile anchor within a card.
const LINK_MARKER: &str = "app-aware-link";
/// Marker class on the profile photo within a card.
const IMAGE_MARKER: &str = "presence-entity__image";

/// One candidate profile scraped from a search-result card.
///
/// `image_url` is `None` when the card has no resolvable photo; such cards
/// are silently dropped by the collector, not treated as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub name: String,
    pub profile_link: String,
    pub image_url: Option<String>,
}

/// Extracts zero or more profile cards from one rendered search page.
///
/// A card spans from one [`CARD_MARKER`] occurrence to the next. Within a
/// card the first `app-aware-link` anchor supplies the profile link and the
/// first `presence-entity__image` img supplies both the photo URL (`src`)
/// and the display name (`alt`).
#[must_use]
pub fn extract_profile_cards(html: &str) -> Vec<ProfileCard> {
    let mut cards = Vec::new();

    let starts: Vec<usize> = html.match_indices(CARD_MARKER).map(|(i, _)| i).collect();
    for (n, &start) in starts.iter().enumerate() {
        let end = starts.get(n + 1).copied().unwrap_or(html.len());
        let block = &html[start..end];

        let profile_link = first_tag(block, "a", LINK_MARKER)
            .and_then(|tag| attr(&tag, "href"))
            .unwrap_or_default();

        let image_tag = first_tag(block, "img", IMAGE_MARKER);
        let image_url = image_tag.as_ref().and_then(|tag| attr(tag, "src"));
        let name = image_tag
            .as_ref()
            .and_then(|tag| attr(tag, "alt"))
            .unwrap_or_default();

        cards.push(ProfileCard {
            name,
            profile_link,
            image_url,
        });
    }

    cards
}

/// Returns the first `<{element} ...>` tag in `block` whose attributes
/// contain `marker`.
fn first_tag(block: &str, element: &str, marker: &str) -> Option<String> {
    let re = Regex::new(&format!(r"(?is)<{element}\s[^>]*>")).expect("valid tag regex");
    for m in re.find_iter(block) {
        if m.as_str().contains(marker) {
            return Some(m.as_str().to_string());
        }
    }
    None
}

/// Extracts a double-quoted attribute value from a single tag, tolerant of
/// attribute order.
fn attr(tag: &str, name: &str) -> Option<String> {
    let re = Regex::new(&format!(r#"(?is)\b{name}\s*=\s*"([^"]*)""#)).expect("valid attr regex");
    re.captures(tag)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, link: &str, img: Option<&str>) -> String {
        let img_tag = img.map_or(String::new(), |src| {
            format!(r#"<img class="ivm-view-attr__img presence-entity__image" src="{src}" alt="{name}">"#)
        });
        format!(
            r#"<div class="display-flex align-items-center">
                 <a class="app-aware-link" href="{link}"><span>{name}</span></a>
                 {img_tag}
               </div>"#
        )
    }

    #[test]
    fn extracts_card_with_image() {
        let html = card("Ada Lovelace", "https://x/in/ada", Some("https://cdn/x/ada.jpg"));
        let cards = extract_profile_cards(&html);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Ada Lovelace");
        assert_eq!(cards[0].profile_link, "https://x/in/ada");
        assert_eq!(cards[0].image_url.as_deref(), Some("https://cdn/x/ada.jpg"));
    }

    #[test]
    fn card_without_image_has_no_url() {
        let html = card("Ghost", "https://x/in/ghost", None);
        let cards = extract_profile_cards(&html);
        assert_eq!(cards.len(), 1);
        assert!(cards[0].image_url.is_none());
    }

    #[test]
    fn multiple_cards_preserve_page_order() {
        let html = format!(
            "{}{}",
            card("Ada", "https://x/in/ada", Some("https://cdn/a.jpg")),
            card("Grace", "https://x/in/grace", Some("https://cdn/g.jpg")),
        );
        let cards = extract_profile_cards(&html);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Ada");
        assert_eq!(cards[1].name, "Grace");
    }

    #[test]
    fn attribute_order_does_not_matter() {
        let html = r#"<div class="display-flex align-items-center">
            <a href="https://x/in/ada" class="app-aware-link">Ada</a>
            <img alt="Ada" src="https://cdn/a.jpg" class="presence-entity__image">
        </div>"#;
        let cards = extract_profile_cards(html);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].profile_link, "https://x/in/ada");
        assert_eq!(cards[0].image_url.as_deref(), Some("https://cdn/a.jpg"));
    }

    #[test]
    fn empty_src_counts_as_missing() {
        let html = r#"<div class="display-flex align-items-center">
            <img class="presence-entity__image" src="" alt="Blank">
        </div>"#;
        let cards = extract_profile_cards(html);
        assert_eq!(cards.len(), 1);
        assert!(cards[0].image_url.is_none());
    }

    #[test]
    fn marker_tag_is_found_past_unrelated_tags() {
        let html = r#"<div class="display-flex align-items-center">
            <a class="nav-link" href="https://x/feed">Feed</a>
            <a class="app-aware-link" href="https://x/in/ada">Ada</a>
            <img class="decoration" src="https://cdn/bg.png" alt="">
            <img class="presence-entity__image" src="https://cdn/a.jpg" alt="Ada">
        </div>"#;
        let cards = extract_profile_cards(html);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].profile_link, "https://x/in/ada");
        assert_eq!(cards[0].image_url.as_deref(), Some("https://cdn/a.jpg"));
        assert_eq!(cards[0].name, "Ada");
    }

    #[test]
    fn malformed_markup_yields_empty_result() {
        let cards = extract_profile_cards("<html><body>totally unrelated</body>");
        assert!(cards.is_empty());
    }
}
