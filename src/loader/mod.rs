// Segment-delivery collaborators the adapter hands to the peer loader
pub mod redundancy;
pub mod validator;

pub use redundancy::{BaseUrlManager, RedundancyUrlManager};
pub use validator::{SegmentHash, SegmentHashes, SegmentValidator, Sha256SegmentValidator};
