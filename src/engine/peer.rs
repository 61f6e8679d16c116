// Peer-assisted segment engine interface
use std::fmt;
use std::sync::Arc;

use tokio::sync::broadcast;

/// Transport a piece of a segment travelled over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferMethod {
    P2p,
    Http,
    Other(String),
}

impl TransferMethod {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "p2p" => TransferMethod::P2p,
            "http" => TransferMethod::Http,
            other => TransferMethod::Other(other.to_string()),
        }
    }

    pub fn is_p2p(&self) -> bool {
        matches!(self, TransferMethod::P2p)
    }
}

impl fmt::Display for TransferMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMethod::P2p => f.write_str("p2p"),
            TransferMethod::Http => f.write_str("http"),
            TransferMethod::Other(tag) => f.write_str(tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub id: String,
    pub url: String,
    /// URL actually requested, which may point at a mirror.
    pub request_url: String,
    /// HTTP range header value, e.g. `bytes=0-1023`.
    pub range: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PeerEvent {
    SegmentError { segment: Segment, error: String },
    PieceBytesDownloaded { method: TransferMethod, bytes: u64 },
    PieceBytesUploaded { method: TransferMethod, bytes: u64 },
    PeerConnect { peer_id: String },
    PeerClose { peer_id: String },
}

pub trait PeerEngine: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<PeerEvent>;

    fn remove_all_listeners(&self);

    fn destroy(&self);
}

/// Factory handing out the peer engine bound to the current decoder.
pub trait PeerLoader: Send + Sync {
    fn get_engine(&self) -> Arc<dyn PeerEngine>;
}
