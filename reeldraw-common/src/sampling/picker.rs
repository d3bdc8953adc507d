//! One fair pick across several lists
//!
//! Orchestrates the full pipeline: parse inputs, resolve list sizes
//! concurrently, pick a list weighted by size, sample one film from a
//! random page of the winner, then enrich the pick best-effort.

use futures::future;
use tracing::{debug, info, warn};

use crate::model::{ListMetadata, ListRef, PageItem, PickedFilm, Selection, SelectionStats, SourceList};
use crate::random::RandomSource;
use crate::sampling::pages::draw_page;
use crate::sampling::pool::SelectionPool;
use crate::source::ListSource;
use crate::{Error, Result};

/// Pick one film uniformly at random across all films in `inputs`.
///
/// Inputs that do not parse or whose lists fail to resolve drop out with
/// a warning; the remaining lists still play. Fails with `InvalidInput`
/// when no inputs are supplied, and `NoValidLists` when nothing usable
/// survives the metadata pass.
pub async fn pick_random(
    source: &dyn ListSource,
    inputs: &[String],
    rng: &mut dyn RandomSource,
) -> Result<Selection> {
    let supplied: Vec<&str> = inputs
        .iter()
        .map(|input| input.trim())
        .filter(|input| !input.is_empty())
        .collect();
    if supplied.is_empty() {
        return Err(Error::InvalidInput("no list URLs provided".to_string()));
    }

    let refs: Vec<ListRef> = supplied
        .iter()
        .filter_map(|raw| {
            let parsed = source.parse_ref(raw);
            if parsed.is_none() {
                warn!(input = %raw, "input does not name a list, skipping");
            }
            parsed
        })
        .collect();
    if refs.is_empty() {
        return Err(Error::NoValidLists(
            "none of the supplied URLs name a list".to_string(),
        ));
    }

    // Metadata lookups are independent read-only fetches, so resolve them
    // all at once rather than list by list.
    let resolved = future::join_all(refs.iter().map(|list| source.list_metadata(list))).await;

    let mut pool = SelectionPool::new();
    for (list, outcome) in refs.iter().zip(resolved) {
        match outcome {
            Ok(meta) => {
                if !pool.push(meta) {
                    debug!(owner = %list.owner, slug = %list.slug, "list has no films, skipping");
                }
            }
            // One broken list must not sink the request; the rest of the
            // pool still plays.
            Err(err) => {
                warn!(owner = %list.owner, slug = %list.slug, error = %err, "failed to resolve list, skipping");
            }
        }
    }
    if pool.is_empty() {
        return Err(Error::NoValidLists(
            "no films found in the supplied lists".to_string(),
        ));
    }

    let winner = pool.select(rng)?;
    info!(
        owner = %winner.list.owner,
        slug = %winner.list.slug,
        count = winner.count,
        total = pool.total(),
        "list selected"
    );

    let item = sample_item(source, winner, rng).await?.ok_or_else(|| {
        Error::ExtractionFailed(format!("no films extracted from list {}", winner.list.slug))
    })?;
    let film = enrich(source, item).await;

    Ok(Selection {
        film,
        list: SourceList {
            title: winner.title.clone(),
            url: winner.list.source_url.clone(),
        },
        stats: SelectionStats {
            total_pool: pool.total(),
            probability: format_probability(pool.total()),
        },
    })
}

/// Sample one film from `list`: uniform page draw, then a uniform index
/// into whatever the fetched page holds.
///
/// Exactly uniform per film only while every non-final page is full, which
/// is how the upstream paginates. A short middle page would degrade this
/// to page-level uniformity; that is accepted rather than paid for with
/// extra fetches.
///
/// Returns `Ok(None)` when the drawn page holds no films. That means the
/// declared count and the page content disagree, which is surfaced rather
/// than retried: a fresh draw would mask the breakage and hammer the
/// upstream for nothing.
pub async fn sample_item(
    source: &dyn ListSource,
    list: &ListMetadata,
    rng: &mut dyn RandomSource,
) -> Result<Option<PageItem>> {
    let page = draw_page(list.count, source.page_size(), rng);
    let mut items = source.page_items(&list.list, page).await?;
    if items.is_empty() {
        warn!(
            owner = %list.list.owner,
            slug = %list.list.slug,
            page,
            declared = list.count,
            "drawn page held no films"
        );
        return Ok(None);
    }
    let index = rng.draw(items.len() as u64) as usize;
    Ok(Some(items.swap_remove(index)))
}

/// Best-effort detail enrichment of the picked film.
///
/// A failed detail fetch downgrades the response to page-level metadata
/// instead of failing a pick that already succeeded.
async fn enrich(source: &dyn ListSource, item: PageItem) -> PickedFilm {
    let mut film = PickedFilm::from(item);
    match source.film_details(&film.slug).await {
        Ok(details) => film.merge_details(details),
        Err(err) => {
            warn!(slug = %film.slug, error = %err, "detail lookup failed, serving page data");
        }
    }
    film
}

/// Per-film selection chance as a percent string.
///
/// Two decimal places normally, four once the chance drops below 0.01%
/// so huge pools do not flatten to "0.00". `total` must be at least 1.
pub fn format_probability(total: u64) -> String {
    let percent = 100.0 / total as f64;
    if percent < 0.01 {
        format!("{percent:.4}")
    } else {
        format!("{percent:.2}")
    }
}
