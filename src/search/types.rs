//! Provider-neutral search types.
//!
//! Providers translate their wire format into these; nothing above the
//! `search` module sees provider JSON.

/// One result record. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageItem {
    /// Small image shown in the gallery tile.
    pub preview_url: String,
    /// Full-resolution image shown in the lightbox.
    pub full_url: String,
    /// Human-readable description (the provider's tag list).
    pub caption: String,
}

/// One page of results plus the server-reported total for the query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    pub hits: Vec<ImageItem>,
    pub total: u32,
}

/// Everything a provider needs to fetch a page.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    /// 1-based page cursor.
    pub page: u32,
    pub per_page: u32,
}

/// What the lightbox learns after downloading a full-resolution image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDetails {
    pub content_type: Option<String>,
    pub byte_len: usize,
}

impl ImageDetails {
    /// Byte size rendered for humans, e.g. "1.4 MB".
    pub fn size_label(&self) -> String {
        const KB: f64 = 1024.0;
        const MB: f64 = KB * 1024.0;
        let bytes = self.byte_len as f64;
        if bytes >= MB {
            format!("{:.1} MB", bytes / MB)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes / KB)
        } else {
            format!("{} B", self.byte_len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_label_units() {
        let details = |byte_len| ImageDetails {
            content_type: None,
            byte_len,
        };
        assert_eq!(details(512).size_label(), "512 B");
        assert_eq!(details(2048).size_label(), "2.0 KB");
        assert_eq!(details(3 * 1024 * 1024).size_label(), "3.0 MB");
    }
}
