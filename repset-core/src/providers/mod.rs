mod google_images;

use async_trait::async_trait;

use repset_model::NormalizedTitle;

pub use google_images::{GOOGLE_SEARCH_ENDPOINT, GoogleImageProvider, ProviderError};

/// Seam for the external image search consulted on enrichment misses.
#[async_trait]
pub trait ImageSearchPort: Send + Sync {
    /// Ordered demonstration-image URLs for the exercise; empty when the API
    /// has nothing, which the caller treats as a miss rather than a failure.
    async fn search_gifs(&self, title: &NormalizedTitle) -> Result<Vec<String>, ProviderError>;
}
