// Playback adapter module
// Capability negotiation, lifecycle, and transfer telemetry

pub mod capability;
pub mod plugin;
pub mod source;
pub mod stats;
pub mod subscriptions;

pub use capability::EngineCapability;
pub use plugin::P2pMediaLoaderAdapter;
pub use stats::TransferStats;
