use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use reelist_models::{CastMember, CatalogItem, MovieDetails, VideoClip};

use crate::error::CatalogError;
use crate::tmdb::api::{self, Category, CreditsResponse, ListingResponse, VideosResponse};

/// Read-only client for the movie/TV metadata service.
///
/// Every call is a single parameterized HTTPS request with the bearer token
/// from configuration; there is no caching and no retry policy. Failures map
/// to [`CatalogError`] per request so one failed shelf does not block its
/// siblings.
#[derive(Clone)]
pub struct CatalogClient {
    client: Arc<Client>,
    access_token: String,
    language: String,
}

impl CatalogClient {
    pub fn new(access_token: String, language: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            access_token,
            language,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    async fn get(&self, url: &str) -> Result<Response, CatalogError> {
        debug!("Catalog GET {}", url);
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .header("Authorization", format!("Bearer {}", self.access_token))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound),
            status => {
                let message = response.text().await.unwrap_or_default();
                warn!("Catalog request failed: {} - {}", status, message);
                Err(CatalogError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Fetch one shelf of titles for a category.
    pub async fn shelf(&self, category: Category, page: u32) -> Result<Vec<CatalogItem>, CatalogError> {
        let url = if category.is_trending() {
            format!("{}{}", api::API_BASE, category.path())
        } else {
            format!(
                "{}{}?language={}&page={}",
                api::API_BASE,
                category.path(),
                self.language,
                page
            )
        };

        let listing: ListingResponse = self.get(&url).await?.json().await?;
        Ok(listing.results)
    }

    /// Title search across movies.
    pub async fn search(&self, query: &str, page: u32) -> Result<Vec<CatalogItem>, CatalogError> {
        let url = format!(
            "{}/search/movie?query={}&language={}&page={}",
            api::API_BASE,
            urlencoding::encode(query),
            self.language,
            page
        );

        let listing: ListingResponse = self.get(&url).await?.json().await?;
        Ok(listing.results)
    }

    pub async fn movie_details(&self, id: u64) -> Result<MovieDetails, CatalogError> {
        let url = format!("{}/movie/{}?language={}", api::API_BASE, id, self.language);
        let details: MovieDetails = self.get(&url).await?.json().await?;
        Ok(details)
    }

    pub async fn movie_credits(&self, id: u64) -> Result<Vec<CastMember>, CatalogError> {
        let url = format!(
            "{}/movie/{}/credits?language={}",
            api::API_BASE,
            id,
            self.language
        );
        let credits: CreditsResponse = self.get(&url).await?.json().await?;
        Ok(credits.cast)
    }

    pub async fn movie_videos(&self, id: u64) -> Result<Vec<VideoClip>, CatalogError> {
        let url = format!(
            "{}/movie/{}/videos?language={}",
            api::API_BASE,
            id,
            self.language
        );
        let videos: VideosResponse = self.get(&url).await?.json().await?;
        Ok(videos.results)
    }

    /// First attached clip, the one the player embeds. Absence is a display
    /// state ("trailer not available"), not an error.
    pub async fn trailer(&self, id: u64) -> Result<Option<VideoClip>, CatalogError> {
        let mut clips = self.movie_videos(id).await?;
        if clips.is_empty() {
            Ok(None)
        } else {
            Ok(Some(clips.remove(0)))
        }
    }
}
