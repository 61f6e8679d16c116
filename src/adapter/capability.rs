// Decide which playback path the host environment supports
use crate::engine::{PlayerHost, StreamingRuntime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCapability {
    /// ABR decoder plus peer loader.
    StandardEngine,
    /// Platform HLS playback, no decoder and no peers.
    NativeFallback,
    Unsupported,
}

pub fn negotiate(
    runtime: &dyn StreamingRuntime,
    player: &dyn PlayerHost,
    native_hls_mime: &str,
) -> EngineCapability {
    if runtime.is_supported() {
        EngineCapability::StandardEngine
    } else if player.can_play_type(native_hls_mime) {
        EngineCapability::NativeFallback
    } else {
        EngineCapability::Unsupported
    }
}
