//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::notify::DEFAULT_TOAST_DURATION;
use crate::core::state::{App, DEFAULT_PER_PAGE};
use crate::search::{
    ImageDetails, ImageItem, SearchError, SearchPage, SearchProvider, SearchRequest,
};

/// A provider for tests that don't need real API calls. Always returns an empty page.
pub struct NoopProvider;

#[async_trait]
impl SearchProvider for NoopProvider {
    fn name(&self) -> &str {
        "noop"
    }

    async fn search(&self, _request: SearchRequest<'_>) -> Result<SearchPage, SearchError> {
        Ok(SearchPage::default())
    }

    async fn fetch_details(&self, _url: &str) -> Result<ImageDetails, SearchError> {
        Ok(ImageDetails {
            content_type: None,
            byte_len: 0,
        })
    }
}

/// Creates a test App with a NoopProvider.
pub fn test_app() -> App {
    App::new(Arc::new(NoopProvider), DEFAULT_PER_PAGE, DEFAULT_TOAST_DURATION)
}

/// A deterministic image record numbered `n`.
pub fn item(n: usize) -> ImageItem {
    ImageItem {
        preview_url: format!("https://img.test/{n}_640.jpg"),
        full_url: format!("https://img.test/{n}_1280.jpg"),
        caption: format!("tag{n}, sample"),
    }
}

/// A page of `count` items numbered from 0, reporting `total` results.
pub fn page_of(count: usize, total: u32) -> SearchPage {
    page_from(0, count, total)
}

/// A page of `count` items numbered from `start`, reporting `total` results.
pub fn page_from(start: usize, count: usize, total: u32) -> SearchPage {
    SearchPage {
        hits: (start..start + count).map(item).collect(),
        total,
    }
}
