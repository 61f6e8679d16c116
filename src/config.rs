// Adapter configuration record
use std::fmt;
use std::sync::Arc;

use crate::engine::PeerLoader;
use crate::loader::{RedundancyUrlManager, SegmentValidator};

/// Returns the short-lived token appended to direct video URLs.
pub type TokenProvider = Arc<dyn Fn() -> String + Send + Sync>;

/// Everything the adapter needs from its owner, fixed for the adapter's lifetime.
#[derive(Clone)]
pub struct AdapterConfig {
    pub media_type: String,
    pub src: String,
    pub video_file_token: TokenProvider,
    pub redundancy_url_manager: Arc<dyn RedundancyUrlManager>,
    pub segment_validator: Option<Arc<dyn SegmentValidator>>,
    pub loader: Arc<dyn PeerLoader>,
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("media_type", &self.media_type)
            .field("src", &self.src)
            .field("video_file_token", &"Fn(..)")
            .field(
                "base_urls",
                &self.redundancy_url_manager.count_base_urls(),
            )
            .field("segment_validator", &self.segment_validator.is_some())
            .finish()
    }
}
