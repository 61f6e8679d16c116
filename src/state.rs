// Adapter state management
use std::sync::Arc;

use parking_lot::Mutex;

use crate::adapter::stats::TransferStats;
use crate::adapter::subscriptions::Subscriptions;
use crate::engine::{Decoder, PeerEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Initialized,
    Disposed,
}

pub struct AdapterState {
    pub lifecycle: Mutex<Lifecycle>,
    pub decoder: Mutex<Option<Arc<dyn Decoder>>>,
    pub peer_engine: Mutex<Option<Arc<dyn PeerEngine>>>,
    pub stats: Mutex<TransferStats>,
    pub subscriptions: Subscriptions,
}

impl AdapterState {
    pub fn new() -> Self {
        Self {
            lifecycle: Mutex::new(Lifecycle::Created),
            decoder: Mutex::new(None),
            peer_engine: Mutex::new(None),
            stats: Mutex::new(TransferStats::default()),
            subscriptions: Subscriptions::new(),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.lock()
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle() == Lifecycle::Disposed
    }

    pub fn decoder(&self) -> Option<Arc<dyn Decoder>> {
        self.decoder.lock().clone()
    }
}

impl Default for AdapterState {
    fn default() -> Self {
        Self::new()
    }
}
