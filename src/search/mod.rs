pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{SearchError, SearchProvider};
pub use providers::PixabayProvider;
pub use types::{ImageDetails, ImageItem, SearchPage, SearchRequest};
