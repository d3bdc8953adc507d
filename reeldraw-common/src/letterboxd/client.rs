//! HTTP client for the Letterboxd website

use std::time::Duration;

use async_trait::async_trait;

use crate::config::UpstreamConfig;
use crate::letterboxd::{page, url};
use crate::model::{FilmDetails, ListMetadata, ListRef, PageItem};
use crate::source::ListSource;
use crate::{Error, Result};

/// Films Letterboxd serves per list page.
pub const PAGE_SIZE: u64 = 100;

const USER_AGENT: &str = concat!("reeldraw/", env!("CARGO_PKG_VERSION"));

/// Scraping client for letterboxd.com.
///
/// Cheap to clone and safe to share: the inner reqwest client pools
/// connections across concurrent requests. The base URL is configurable
/// so tests can point it at a local mock server.
#[derive(Debug, Clone)]
pub struct LetterboxdClient {
    http: reqwest::Client,
    base_url: String,
}

impl LetterboxdClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn list_page_url(&self, list: &ListRef, page: u64) -> String {
        if page <= 1 {
            format!("{}/{}/list/{}/", self.base_url, list.owner, list.slug)
        } else {
            format!(
                "{}/{}/list/{}/page/{}/",
                self.base_url, list.owner, list.slug, page
            )
        }
    }

    fn film_page_url(&self, slug: &str) -> String {
        format!("{}/film/{}/", self.base_url, slug)
    }

    /// Fetch one page as HTML. 404s map to `NotFound` (missing or private),
    /// everything else unexpected to `Upstream` with the detail logged
    /// rather than leaked to the caller.
    async fn fetch_html(&self, url: &str, what: &str) -> Result<String> {
        tracing::debug!(url = %url, "fetching {what} page");
        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "upstream request failed");
            Error::Upstream(format!("could not reach the {what} page"))
        })?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!(
                "{what} does not exist or is private"
            )));
        }
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "upstream returned an error status");
            return Err(Error::Upstream(format!(
                "{what} request returned HTTP {status}"
            )));
        }
        response.text().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "failed to read upstream body");
            Error::Upstream(format!("could not read the {what} page"))
        })
    }
}

#[async_trait]
impl ListSource for LetterboxdClient {
    fn parse_ref(&self, input: &str) -> Option<ListRef> {
        url::parse_list_ref(input)
    }

    async fn list_metadata(&self, list: &ListRef) -> Result<ListMetadata> {
        let html = self.fetch_html(&self.list_page_url(list, 1), "list").await?;
        let (title, count) = page::parse_list_metadata(&html)?;
        tracing::debug!(owner = %list.owner, slug = %list.slug, count, "resolved list metadata");
        Ok(ListMetadata {
            list: list.clone(),
            title,
            count,
        })
    }

    async fn page_items(&self, list: &ListRef, page_number: u64) -> Result<Vec<PageItem>> {
        let html = self
            .fetch_html(&self.list_page_url(list, page_number), "list")
            .await?;
        let items = page::parse_page_items(&html)?;
        tracing::debug!(
            owner = %list.owner,
            slug = %list.slug,
            page = page_number,
            films = items.len(),
            "extracted films from list page"
        );
        Ok(items)
    }

    async fn film_details(&self, slug: &str) -> Result<FilmDetails> {
        let html = self.fetch_html(&self.film_page_url(slug), "film").await?;
        page::parse_film_details(&html, slug)
    }

    fn page_size(&self) -> u64 {
        PAGE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> LetterboxdClient {
        LetterboxdClient::new(&UpstreamConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn list_page_urls_follow_site_pagination() {
        let client = client("https://letterboxd.com/");
        let list = ListRef {
            owner: "alice".to_string(),
            slug: "my-faves".to_string(),
            source_url: "alice/list/my-faves".to_string(),
        };
        assert_eq!(
            client.list_page_url(&list, 1),
            "https://letterboxd.com/alice/list/my-faves/"
        );
        assert_eq!(
            client.list_page_url(&list, 3),
            "https://letterboxd.com/alice/list/my-faves/page/3/"
        );
    }

    #[test]
    fn film_page_urls_use_the_configured_base() {
        let client = client("http://127.0.0.1:9999");
        assert_eq!(
            client.film_page_url("heat-1995"),
            "http://127.0.0.1:9999/film/heat-1995/"
        );
    }
}
