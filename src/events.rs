// Events the adapter emits on the player
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpNetworkInfo {
    /// Bytes received over HTTP during the last interval.
    pub download_speed: u64,
    pub downloaded: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct P2pNetworkInfo {
    pub download_speed: u64,
    pub upload_speed: u64,
    pub num_peers: i64,
    pub downloaded: u64,
    pub uploaded: u64,
}

/// Payload of the `p2p-info` event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNetworkInfo {
    pub source: String,
    pub http: HttpNetworkInfo,
    pub p2p: P2pNetworkInfo,
    /// Bytes per second.
    pub bandwidth_estimate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    EngineResolutionChange,
    P2pInfo(PlayerNetworkInfo),
}

impl PlayerEvent {
    /// Event name as listeners register for it.
    pub fn name(&self) -> &'static str {
        match self {
            PlayerEvent::EngineResolutionChange => "engine-resolution-change",
            PlayerEvent::P2pInfo(_) => "p2p-info",
        }
    }

    /// JSON payload, if the event carries one.
    pub fn payload(&self) -> Option<serde_json::Value> {
        match self {
            PlayerEvent::EngineResolutionChange => None,
            PlayerEvent::P2pInfo(info) => serde_json::to_value(info).ok(),
        }
    }
}
