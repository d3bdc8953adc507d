//! HTML extraction for Letterboxd pages
//!
//! Letterboxd has no public JSON API; lists and film pages are
//! server-rendered. The film count rides in the list's meta description,
//! the grid entries carry their data in `data-*` attributes, and film
//! pages expose name, year, poster and rating through OpenGraph and
//! Twitter card tags.

use std::collections::HashSet;

use regex::Regex;
use scraper::{Html, Selector};

use crate::model::{FilmDetails, PageItem};
use crate::{Error, Result};

/// Canonical public site. Film links in results always point here, no
/// matter which base URL the client fetched through.
const CANONICAL_BASE: &str = "https://letterboxd.com";

/// Canonical film page URL for a slug.
pub fn film_url(slug: &str) -> String {
    format!("{CANONICAL_BASE}/film/{slug}/")
}

/// Extract a list's display title and declared film count.
///
/// The count comes from the machine-generated meta description, which
/// always opens with "A list of N films".
pub fn parse_list_metadata(html: &str) -> Result<(String, u64)> {
    let document = Html::parse_document(html);
    let title = meta_content(&document, r#"meta[property="og:title"]"#)?
        .ok_or_else(|| Error::Upstream("list page has no og:title".to_string()))?;
    let description = meta_content(&document, r#"meta[name="description"]"#)?
        .ok_or_else(|| Error::Upstream("list page has no meta description".to_string()))?;
    let count = parse_film_count(&description)?;
    Ok((title, count))
}

/// Pull the film count out of a list's meta description.
fn parse_film_count(description: &str) -> Result<u64> {
    let pattern = Regex::new(r"(?i)^a list of ([\d,]+) films?\b")
        .map_err(|e| Error::Upstream(format!("film count pattern: {e}")))?;
    let captures = pattern
        .captures(description.trim())
        .ok_or_else(|| Error::Upstream("list description does not state a film count".to_string()))?;
    let digits: String = captures[1]
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits
        .parse::<u64>()
        .map_err(|_| Error::Upstream("unparseable film count".to_string()))
}

/// Extract the films from one page of a list.
///
/// Entries live in `li.posteritem` (or the older `li.griditem`) with the
/// film attributes on a nested `div.react-component`, falling back to the
/// `li` itself. Entries without a film id or slug are skipped, as are
/// duplicate ids within the page.
pub fn parse_page_items(html: &str) -> Result<Vec<PageItem>> {
    let document = Html::parse_document(html);
    let entry_selector = Selector::parse("li.posteritem, li.griditem")
        .map_err(|e| Error::Upstream(format!("film grid selector: {e}")))?;
    let component_selector = Selector::parse("div.react-component")
        .map_err(|e| Error::Upstream(format!("film component selector: {e}")))?;
    let img_selector =
        Selector::parse("img").map_err(|e| Error::Upstream(format!("poster selector: {e}")))?;

    let mut seen = HashSet::new();
    let mut items = Vec::new();
    for entry in document.select(&entry_selector) {
        let container = entry.select(&component_selector).next().unwrap_or(entry);
        let attrs = container.value();
        let Some(id) = attrs.attr("data-film-id") else {
            continue;
        };
        let Some(slug) = attrs
            .attr("data-item-slug")
            .or_else(|| attrs.attr("data-film-slug"))
        else {
            continue;
        };
        if !seen.insert(id.to_string()) {
            continue;
        }

        let img = container.select(&img_selector).next();
        let name = attrs
            .attr("data-item-name")
            .map(str::to_string)
            .or_else(|| img.and_then(|img| img.value().attr("alt")).map(str::to_string))
            .unwrap_or_else(|| slug.to_string());
        let year = attrs
            .attr("data-film-release-year")
            .and_then(|year| year.parse::<u16>().ok());
        let poster = img
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string);

        items.push(PageItem {
            id: id.to_string(),
            slug: slug.to_string(),
            name,
            year,
            url: film_url(slug),
            poster,
        });
    }
    Ok(items)
}

/// Extract enriched metadata from a film's own page.
pub fn parse_film_details(html: &str, slug: &str) -> Result<FilmDetails> {
    let document = Html::parse_document(html);
    let og_title = meta_content(&document, r#"meta[property="og:title"]"#)?
        .ok_or_else(|| Error::Upstream("film page has no og:title".to_string()))?;
    let (name, year) = split_title_year(&og_title);
    let poster = meta_content(&document, r#"meta[property="og:image"]"#)?;
    let rating = meta_content(&document, r#"meta[name="twitter:data2"]"#)?
        .and_then(|text| parse_rating(&text));

    Ok(FilmDetails {
        name,
        slug: slug.to_string(),
        year,
        url: film_url(slug),
        poster,
        rating,
    })
}

/// First matching meta tag's non-empty `content`, if any.
fn meta_content(document: &Html, selector: &str) -> Result<Option<String>> {
    let selector = Selector::parse(selector)
        .map_err(|e| Error::Upstream(format!("meta selector: {e}")))?;
    Ok(document
        .select(&selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty()))
}

/// Split a film og:title of the form "Name (YYYY)".
fn split_title_year(title: &str) -> (String, Option<u16>) {
    if let Some(open) = title.rfind(" (") {
        let rest = &title[open + 2..];
        if let Some(inner) = rest.strip_suffix(')') {
            if inner.len() == 4 && inner.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(year) = inner.parse() {
                    return (title[..open].to_string(), Some(year));
                }
            }
        }
    }
    (title.to_string(), None)
}

/// Parse a rating out of a Twitter card value like "4.12 out of 5".
fn parse_rating(text: &str) -> Option<f64> {
    text.split_whitespace()
        .next()
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|rating| (0.0..=5.0).contains(rating))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_PAGE: &str = r#"<!doctype html>
<html>
<head>
  <meta property="og:title" content="Official Top 250 Narrative Feature Films" />
  <meta name="description" content="A list of 1,234 films compiled on Letterboxd, including Seven Samurai (1954)." />
</head>
<body>
  <ul class="poster-list">
    <li class="posteritem">
      <div class="react-component" data-film-id="51568" data-item-slug="seven-samurai"
           data-item-name="Seven Samurai" data-film-release-year="1954">
        <img src="https://a.ltrbxd.com/seven-samurai.jpg" alt="Seven Samurai" />
      </div>
    </li>
    <li class="griditem" data-film-id="2761" data-film-slug="harakiri">
      <img src="https://a.ltrbxd.com/harakiri.jpg" alt="Harakiri" />
    </li>
    <li class="posteritem">
      <div class="react-component" data-film-id="51568" data-item-slug="seven-samurai"
           data-item-name="Seven Samurai"></div>
    </li>
    <li class="posteritem"><div class="react-component">placeholder</div></li>
  </ul>
</body>
</html>"#;

    const FILM_PAGE: &str = r#"<!doctype html>
<html>
<head>
  <meta property="og:title" content="Heat (1995)" />
  <meta property="og:image" content="https://a.ltrbxd.com/heat-poster.jpg" />
  <meta name="twitter:data2" content="4.12 out of 5" />
</head>
<body></body>
</html>"#;

    #[test]
    fn list_metadata_reads_title_and_count() {
        let (title, count) = parse_list_metadata(LIST_PAGE).unwrap();
        assert_eq!(title, "Official Top 250 Narrative Feature Films");
        assert_eq!(count, 1234);
    }

    #[test]
    fn film_count_handles_singular_and_zero() {
        assert_eq!(parse_film_count("A list of 1 film.").unwrap(), 1);
        assert_eq!(parse_film_count("A list of 0 films.").unwrap(), 0);
        assert_eq!(parse_film_count("a list of 42 films, ranked.").unwrap(), 42);
    }

    #[test]
    fn descriptions_without_a_count_are_upstream_errors() {
        let err = parse_film_count("Just some prose about cinema.").unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }

    #[test]
    fn page_items_extracts_grid_entries() {
        let items = parse_page_items(LIST_PAGE).unwrap();
        assert_eq!(items.len(), 2, "duplicate and idless entries are skipped");

        let first = &items[0];
        assert_eq!(first.id, "51568");
        assert_eq!(first.slug, "seven-samurai");
        assert_eq!(first.name, "Seven Samurai");
        assert_eq!(first.year, Some(1954));
        assert_eq!(first.url, "https://letterboxd.com/film/seven-samurai/");
        assert_eq!(
            first.poster.as_deref(),
            Some("https://a.ltrbxd.com/seven-samurai.jpg")
        );

        let second = &items[1];
        assert_eq!(second.slug, "harakiri");
        assert_eq!(second.name, "Harakiri", "name falls back to the img alt");
        assert_eq!(second.year, None);
    }

    #[test]
    fn pages_without_films_extract_to_nothing() {
        let html = "<html><head></head><body><ul></ul></body></html>";
        assert!(parse_page_items(html).unwrap().is_empty());
    }

    #[test]
    fn film_details_reads_meta_tags() {
        let details = parse_film_details(FILM_PAGE, "heat-1995").unwrap();
        assert_eq!(details.name, "Heat");
        assert_eq!(details.year, Some(1995));
        assert_eq!(details.url, "https://letterboxd.com/film/heat-1995/");
        assert_eq!(
            details.poster.as_deref(),
            Some("https://a.ltrbxd.com/heat-poster.jpg")
        );
        assert_eq!(details.rating, Some(4.12));
    }

    #[test]
    fn film_details_tolerate_missing_rating_and_year() {
        let html = r#"<html><head>
            <meta property="og:title" content="Symbiopsychotaxiplasm: Take One" />
        </head><body></body></html>"#;
        let details = parse_film_details(html, "symbiopsychotaxiplasm-take-one").unwrap();
        assert_eq!(details.name, "Symbiopsychotaxiplasm: Take One");
        assert_eq!(details.year, None);
        assert_eq!(details.poster, None);
        assert_eq!(details.rating, None);
    }

    #[test]
    fn titles_with_parenthetical_names_keep_them() {
        assert_eq!(
            split_title_year("(500) Days of Summer (2009)"),
            ("(500) Days of Summer".to_string(), Some(2009))
        );
        assert_eq!(split_title_year("Plain Title"), ("Plain Title".to_string(), None));
        assert_eq!(
            split_title_year("Movie (not a year)"),
            ("Movie (not a year)".to_string(), None)
        );
    }

    #[test]
    fn ratings_outside_the_scale_are_dropped() {
        assert_eq!(parse_rating("4.12 out of 5"), Some(4.12));
        assert_eq!(parse_rating("9.5 out of 10"), None);
        assert_eq!(parse_rating("TBD"), None);
    }
}
