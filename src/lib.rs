// p2p-playback - peer-assisted HLS playback adapter
// Module declarations
pub mod adapter;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod loader;
pub mod logging;
pub mod settings;
pub mod state;

pub use adapter::{EngineCapability, P2pMediaLoaderAdapter, TransferStats};
pub use config::{AdapterConfig, TokenProvider};
pub use error::{AdapterError, MediaError, MediaErrorCode, ValidationError};
pub use events::{PlayerEvent, PlayerNetworkInfo};
pub use settings::AdapterSettings;
