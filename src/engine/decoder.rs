// Adaptive-bitrate decoder interface
use std::sync::Arc;

use tokio::sync::broadcast;

use super::player::PlayerHost;

/// One quality level (variant) exposed by the decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityLevel {
    pub width: u32,
    pub height: u32,
    /// Bits per second.
    pub bitrate: u64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecoderEvent {
    LevelSwitched { level: usize },
    /// Anything the adapter does not react to.
    Other(String),
}

pub trait Decoder: Send + Sync {
    fn levels(&self) -> Vec<QualityLevel>;

    /// Index into `levels()`; negative while the decoder has not picked one.
    fn current_level(&self) -> i32;

    /// Distance to the live edge, in seconds.
    fn latency(&self) -> f64;

    /// Bits per second.
    fn bandwidth_estimate(&self) -> f64;

    fn subscribe(&self) -> broadcast::Receiver<DecoderEvent>;

    fn destroy(&self);
}

/// Called with the decoder handle right before the runtime initializes it.
pub type DecoderHook = Box<dyn Fn(Arc<dyn Decoder>) + Send + Sync>;

/// The runtime that owns decoder construction for a player.
pub trait StreamingRuntime: Send + Sync + 'static {
    /// Whether the standard decoder path can run in this environment.
    fn is_supported(&self) -> bool;

    fn add_before_initialize_hook(&self, hook: DecoderHook);

    fn remove_all_hooks(&self);

    /// Runtime-specific player setup, run before the source is set.
    fn prepare_player(&self, player: &dyn PlayerHost);

    /// Patch a freshly captured decoder so segments go through the peer loader.
    fn apply_patches(&self, decoder: &dyn Decoder);
}
