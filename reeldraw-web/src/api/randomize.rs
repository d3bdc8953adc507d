//! Random pick endpoint

use axum::{extract::State, Json};
use reeldraw_common::model::Selection;
use reeldraw_common::random::EntropyRandom;
use reeldraw_common::sampling::pick_random;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /api request body
#[derive(Debug, Deserialize)]
pub struct RandomizeRequest {
    /// List URLs, one per input field
    #[serde(default)]
    pub urls: Vec<String>,
}

/// POST /api response body
#[derive(Debug, Serialize)]
pub struct RandomizeResponse {
    pub movie: MovieBody,
    pub list: ListBody,
    pub stats: StatsBody,
}

#[derive(Debug, Serialize)]
pub struct MovieBody {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ListBody {
    pub title: String,
    /// The source list URL exactly as the user supplied it
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct StatsBody {
    pub total_pool: u64,
    pub probability: String,
}

impl From<Selection> for RandomizeResponse {
    fn from(selection: Selection) -> Self {
        Self {
            movie: MovieBody {
                name: selection.film.name,
                slug: selection.film.slug,
                year: selection.film.year,
                url: selection.film.url,
                poster: selection.film.poster,
                rating: selection.film.rating,
            },
            list: ListBody {
                title: selection.list.title,
                url: selection.list.url,
            },
            stats: StatsBody {
                total_pool: selection.stats.total_pool,
                probability: selection.stats.probability,
            },
        }
    }
}

/// POST /api
///
/// Picks one film uniformly at random across every film in the supplied
/// lists. Larger lists win proportionally more often, which is exactly
/// what keeps individual films equally likely.
pub async fn randomize(
    State(state): State<AppState>,
    Json(request): Json<RandomizeRequest>,
) -> ApiResult<Json<RandomizeResponse>> {
    if request.urls.iter().all(|url| url.trim().is_empty()) {
        return Err(ApiError::BadRequest("No list URLs provided".to_string()));
    }

    // Request-local randomness: nothing shared, nothing to contend on.
    let mut rng = EntropyRandom::new();
    let selection = pick_random(state.client.as_ref(), &request.urls, &mut rng).await?;

    tracing::info!(
        film = %selection.film.name,
        list = %selection.list.title,
        pool = selection.stats.total_pool,
        "pick served"
    );

    Ok(Json(RandomizeResponse::from(selection)))
}
