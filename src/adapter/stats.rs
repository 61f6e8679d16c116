// Byte-transfer counters flushed into p2p-info every stats interval
use crate::engine::TransferMethod;
use crate::events::{HttpNetworkInfo, P2pNetworkInfo, PlayerNetworkInfo};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct P2pBytes {
    pub pending_download: Vec<u64>,
    pub pending_upload: Vec<u64>,
    pub num_peers: i64,
    pub total_download: u64,
    pub total_upload: u64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct HttpBytes {
    pub pending_download: Vec<u64>,
    pub total_download: u64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransferStats {
    pub p2p: P2pBytes,
    pub http: HttpBytes,
}

impl TransferStats {
    /// Self plus every mirror counts as a source before any peer connects.
    pub fn reset_peers(&mut self, base_urls: usize) {
        self.p2p.num_peers = 1 + base_urls as i64;
    }

    pub fn record_download(&mut self, method: &TransferMethod, bytes: u64) {
        if method.is_p2p() {
            self.p2p.pending_download.push(bytes);
            self.p2p.total_download += bytes;
        } else {
            self.http.pending_download.push(bytes);
            self.http.total_download += bytes;
        }
    }

    /// Returns false (and records nothing) for non-p2p uploads.
    pub fn record_upload(&mut self, method: &TransferMethod, bytes: u64) -> bool {
        if !method.is_p2p() {
            log::error!("Received upload from unknown method {}", method);
            return false;
        }

        self.p2p.pending_upload.push(bytes);
        self.p2p.total_upload += bytes;
        true
    }

    pub fn peer_connected(&mut self) {
        self.p2p.num_peers += 1;
    }

    // Not clamped: a duplicate close from the engine would drive this below zero.
    pub fn peer_closed(&mut self) {
        self.p2p.num_peers -= 1;
        if self.p2p.num_peers < 0 {
            log::warn!("Peer count went negative ({})", self.p2p.num_peers);
        }
    }

    /// Drain the pending lists into a network info snapshot.
    ///
    /// `bandwidth_estimate_bps` is in bits per second; the snapshot carries bytes per second.
    pub fn flush(&mut self, source: &str, bandwidth_estimate_bps: f64) -> PlayerNetworkInfo {
        let p2p_download_speed: u64 = self.p2p.pending_download.drain(..).sum();
        let p2p_upload_speed: u64 = self.p2p.pending_upload.drain(..).sum();
        let http_download_speed: u64 = self.http.pending_download.drain(..).sum();

        PlayerNetworkInfo {
            source: source.to_string(),
            http: HttpNetworkInfo {
                download_speed: http_download_speed,
                downloaded: self.http.total_download,
            },
            p2p: P2pNetworkInfo {
                download_speed: p2p_download_speed,
                upload_speed: p2p_upload_speed,
                num_peers: self.p2p.num_peers,
                downloaded: self.p2p.total_download,
                uploaded: self.p2p.total_upload,
            },
            bandwidth_estimate: bandwidth_estimate_bps / 8.0,
        }
    }
}
