// Collaborator interfaces
// The player host, the ABR decoder runtime and the peer engine are all external

pub mod decoder;
pub mod peer;
pub mod player;

pub use decoder::{Decoder, DecoderEvent, DecoderHook, QualityLevel, StreamingRuntime};
pub use peer::{PeerEngine, PeerEvent, PeerLoader, Segment, TransferMethod};
pub use player::{MediaSource, PlayerHost, UiControl};
