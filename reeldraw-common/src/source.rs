//! Collaborator contract between the sampling core and an upstream site

use async_trait::async_trait;

use crate::model::{FilmDetails, ListMetadata, ListRef, PageItem};
use crate::Result;

/// Everything the sampling core needs from an upstream list source.
///
/// Implemented by [`crate::letterboxd::LetterboxdClient`] in production
/// and by in-memory stubs in tests. All operations are read-only and safe
/// to repeat.
#[async_trait]
pub trait ListSource: Send + Sync {
    /// Parse a free-form user input into a list reference, if it names one.
    fn parse_ref(&self, input: &str) -> Option<ListRef>;

    /// Resolve a list's display title and declared film count.
    ///
    /// This is the cheap metadata pass: one page fetch per list, no
    /// film-by-film enumeration.
    async fn list_metadata(&self, list: &ListRef) -> Result<ListMetadata>;

    /// Fetch one page of a list (1-based) and extract its films.
    async fn page_items(&self, list: &ListRef, page: u64) -> Result<Vec<PageItem>>;

    /// Resolve enriched metadata for a single film.
    async fn film_details(&self, slug: &str) -> Result<FilmDetails>;

    /// Maximum number of films the source serves per list page.
    fn page_size(&self) -> u64;
}
