//! Pixabay provider implementation.
//!
//! One `GET` per page against the public REST endpoint. Pixabay answers
//! errors with a plain-text body like `[ERROR 400] "page" is out of valid range.`
//! so non-success responses are read as text, not JSON.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::search::{
    ImageDetails, ImageItem, SearchError, SearchPage, SearchProvider, SearchRequest,
};

pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";
pub const DEFAULT_IMAGE_TYPE: &str = "photo";
pub const DEFAULT_ORIENTATION: &str = "horizontal";

// ============================================================================
// Pixabay API Types
// ============================================================================

/// Response body; fields we don't consume are ignored.
#[derive(Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
    #[serde(rename = "totalHits", default)]
    total_hits: u32,
}

#[derive(Deserialize, Debug)]
struct Hit {
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
    #[serde(default)]
    tags: String,
}

impl From<Hit> for ImageItem {
    fn from(hit: Hit) -> Self {
        ImageItem {
            preview_url: hit.webformat_url,
            full_url: hit.large_image_url,
            caption: hit.tags,
        }
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct PixabayProvider {
    api_key: String,
    base_url: String,
    image_type: String,
    orientation: String,
    client: reqwest::Client,
}

impl PixabayProvider {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            image_type: DEFAULT_IMAGE_TYPE.to_string(),
            orientation: DEFAULT_ORIENTATION.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Overrides the `image_type` and `orientation` filters sent with every search.
    pub fn with_filters(mut self, image_type: String, orientation: String) -> Self {
        self.image_type = image_type;
        self.orientation = orientation;
        self
    }
}

#[async_trait]
impl SearchProvider for PixabayProvider {
    fn name(&self) -> &str {
        "pixabay"
    }

    async fn search(&self, request: SearchRequest<'_>) -> Result<SearchPage, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::Config("Pixabay API key is empty".to_string()));
        }

        info!(
            "Pixabay search: query={:?}, page={}, per_page={}",
            request.query, request.page, request.per_page
        );

        let page = request.page.to_string();
        let per_page = request.per_page.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", request.query),
                ("page", page.as_str()),
                ("key", self.api_key.as_str()),
                ("image_type", self.image_type.as_str()),
                ("orientation", self.orientation.as_str()),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Network(e.without_url().to_string()))?;

        debug!("Pixabay response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Pixabay API error: {} - {}", status, err_body);
            return Err(SearchError::Api {
                status,
                message: err_body,
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.without_url().to_string()))?;

        info!(
            "Pixabay returned {} hits (totalHits={})",
            body.hits.len(),
            body.total_hits
        );

        Ok(SearchPage {
            hits: body.hits.into_iter().map(ImageItem::from).collect(),
            total: body.total_hits,
        })
    }

    async fn fetch_details(&self, url: &str) -> Result<ImageDetails, SearchError> {
        debug!("Fetching image details: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(SearchError::Api {
                status,
                message: format!("image download failed for {url}"),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(ImageDetails {
            content_type,
            byte_len: bytes.len(),
        })
    }
}
