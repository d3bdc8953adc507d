//! Domain model for list sampling
//!
//! Plain data carried between the collaborators: parsed list references,
//! per-request metadata, extracted films and the final selection. Nothing
//! here touches the network or holds long-lived state.

/// Identifies one list on the upstream site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRef {
    /// Account that owns the list
    pub owner: String,
    /// URL-safe list identifier
    pub slug: String,
    /// Raw input string this reference was parsed from, kept for display
    pub source_url: String,
}

/// Resolved list metadata, valid for the lifetime of one request
#[derive(Debug, Clone)]
pub struct ListMetadata {
    pub list: ListRef,
    /// Display title of the list
    pub title: String,
    /// Film count the list page declares
    pub count: u64,
}

/// One film as extracted from a list page
#[derive(Debug, Clone, PartialEq)]
pub struct PageItem {
    /// Upstream film id, unique per film
    pub id: String,
    pub slug: String,
    pub name: String,
    pub year: Option<u16>,
    /// Canonical film page URL
    pub url: String,
    pub poster: Option<String>,
}

/// Enriched metadata from a film's own page
#[derive(Debug, Clone, Default)]
pub struct FilmDetails {
    pub name: String,
    pub slug: String,
    pub year: Option<u16>,
    pub url: String,
    pub poster: Option<String>,
    /// Site average rating out of 5
    pub rating: Option<f64>,
}

/// The picked film, with detail enrichment merged in when available
#[derive(Debug, Clone)]
pub struct PickedFilm {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub year: Option<u16>,
    pub url: String,
    pub poster: Option<String>,
    pub rating: Option<f64>,
}

impl From<PageItem> for PickedFilm {
    fn from(item: PageItem) -> Self {
        Self {
            id: item.id,
            slug: item.slug,
            name: item.name,
            year: item.year,
            url: item.url,
            poster: item.poster,
            rating: None,
        }
    }
}

impl PickedFilm {
    /// Merge detail-page metadata into the page extraction.
    ///
    /// The film page is authoritative for the display name and release
    /// year; the larger detail poster wins over the grid thumbnail. The
    /// rating only exists on the detail page.
    pub fn merge_details(&mut self, details: FilmDetails) {
        if !details.name.is_empty() {
            self.name = details.name;
        }
        self.year = details.year.or(self.year);
        self.poster = details.poster.or(self.poster.take());
        self.rating = details.rating;
    }
}

/// Provenance of the winning list
#[derive(Debug, Clone)]
pub struct SourceList {
    pub title: String,
    /// The URL exactly as the user supplied it
    pub url: String,
}

/// Selection odds reported alongside the pick
#[derive(Debug, Clone)]
pub struct SelectionStats {
    /// Combined film count across every usable list
    pub total_pool: u64,
    /// Chance of this exact film, formatted as a percent string
    pub probability: String,
}

/// Result of one random pick
#[derive(Debug, Clone)]
pub struct Selection {
    pub film: PickedFilm,
    pub list: SourceList,
    pub stats: SelectionStats,
}
