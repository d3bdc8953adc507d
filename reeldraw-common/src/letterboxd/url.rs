//! List reference parsing from free-form user input

use crate::model::ListRef;

/// Profile sub-pages that must not be mistaken for list slugs.
const RESERVED_SEGMENTS: [&str; 6] = [
    "films",
    "following",
    "followers",
    "reviews",
    "lists",
    "watchlist",
];

/// Parse a free-form URL or path into a list reference.
///
/// Accepts the full form `https://letterboxd.com/owner/list/slug/`, the
/// bare path `owner/list/slug`, and the short form `owner/slug`. The
/// scheme, a `www.` prefix and any leading host segment are ignored, so a
/// pasted mirror URL still resolves to the same list. Reserved profile
/// pages (`watchlist`, `films`, ...) are rejected. Returns `None` when
/// the input does not name a list.
pub fn parse_list_ref(input: &str) -> Option<ListRef> {
    let source_url = input.trim();
    let normalized = source_url.to_ascii_lowercase();
    let without_scheme = normalized
        .strip_prefix("https://")
        .or_else(|| normalized.strip_prefix("http://"))
        .unwrap_or(&normalized);
    let without_www = without_scheme.strip_prefix("www.").unwrap_or(without_scheme);
    let path = without_www
        .split_once(['?', '#'])
        .map_or(without_www, |(path, _)| path);

    let mut segments = path.split('/').filter(|segment| !segment.is_empty());
    let mut first = segments.next()?;
    // A leading host segment is not an owner, whatever the domain is.
    if first.contains('.') {
        first = segments.next()?;
    }
    let second = segments.next()?;

    let (owner, slug) = if second == "list" {
        (first, segments.next()?)
    } else if RESERVED_SEGMENTS.contains(&second) {
        return None;
    } else {
        (first, second)
    };

    Some(ListRef {
        owner: owner.to_string(),
        slug: slug.to_string(),
        source_url: source_url.to_string(),
    })
}
