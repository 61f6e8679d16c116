// In-memory collaborators for adapter tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};

use p2p_playback::engine::{
    Decoder, DecoderEvent, DecoderHook, MediaSource, PeerEngine, PeerEvent, PeerLoader,
    PlayerHost, QualityLevel, StreamingRuntime, UiControl,
};
use p2p_playback::loader::{BaseUrlManager, SegmentHashes, Sha256SegmentValidator};
use p2p_playback::state::Lifecycle;
use p2p_playback::{
    AdapterConfig, MediaError, P2pMediaLoaderAdapter, PlayerEvent, PlayerNetworkInfo,
};

pub const MASTER_URL: &str = "https://example/master.m3u8";
pub const HLS_TYPE: &str = "application/x-mpegURL";
pub const TOKEN: &str = "token-123";

#[derive(Default)]
pub struct FakeControl {
    pub hidden: AtomicBool,
}

impl UiControl for FakeControl {
    fn hide(&self) {
        self.hidden.store(true, Ordering::SeqCst);
    }
}

pub struct FakePlayer {
    native_hls: bool,
    ready_tx: watch::Sender<bool>,
    pub online: AtomicBool,
    pub sources: Mutex<Vec<MediaSource>>,
    pub events: Mutex<Vec<PlayerEvent>>,
    pub errors: Mutex<Vec<MediaError>>,
    pub released: Mutex<Vec<String>>,
    pub resolution: Arc<FakeControl>,
    /// Adapter the player calls back into while it is being released.
    pub callback_target: Mutex<Option<Weak<P2pMediaLoaderAdapter>>>,
    pub lifecycle_seen_on_release: Mutex<Option<Lifecycle>>,
}

impl FakePlayer {
    pub fn new(native_hls: bool) -> Self {
        let (ready_tx, _) = watch::channel(false);
        Self {
            native_hls,
            ready_tx,
            online: AtomicBool::new(true),
            sources: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
            released: Mutex::new(Vec::new()),
            resolution: Arc::new(FakeControl::default()),
            callback_target: Mutex::new(None),
            lifecycle_seen_on_release: Mutex::new(None),
        }
    }

    pub fn set_ready(&self) {
        self.ready_tx.send_replace(true);
    }

    pub fn last_source(&self) -> Option<MediaSource> {
        self.sources.lock().last().cloned()
    }

    pub fn network_infos(&self) -> Vec<PlayerNetworkInfo> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                PlayerEvent::P2pInfo(info) => Some(info.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn resolution_changes(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, PlayerEvent::EngineResolutionChange))
            .count()
    }
}

impl PlayerHost for FakePlayer {
    fn can_play_type(&self, mime: &str) -> bool {
        self.native_hls && mime == "application/vnd.apple.mpegurl"
    }

    fn set_source(&self, source: MediaSource) {
        self.sources.lock().push(source);
    }

    fn ready_signal(&self) -> watch::Receiver<bool> {
        self.ready_tx.subscribe()
    }

    fn trigger(&self, event: PlayerEvent) {
        self.events.lock().push(event);
    }

    fn error(&self, error: MediaError) {
        self.errors.lock().push(error);
    }

    fn resolution_control(&self) -> Option<Arc<dyn UiControl>> {
        Some(self.resolution.clone())
    }

    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn release_plugin(&self, name: &str) {
        self.released.lock().push(name.to_string());

        let target = self.callback_target.lock().clone();
        if let Some(adapter) = target.and_then(|weak| weak.upgrade()) {
            *self.lifecycle_seen_on_release.lock() = Some(adapter.lifecycle());
            adapter.dispose();
        }
    }
}

pub struct FakeDecoder {
    tx: broadcast::Sender<DecoderEvent>,
    pub current_level: Mutex<i32>,
    pub latency: f64,
    pub bandwidth_bps: f64,
    pub destroyed: AtomicUsize,
}

impl FakeDecoder {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self {
            tx,
            current_level: Mutex::new(1),
            latency: 2.6,
            bandwidth_bps: 8000.0,
            destroyed: AtomicUsize::new(0),
        }
    }

    pub fn switch_level(&self, level: usize) {
        *self.current_level.lock() = level as i32;
        let _ = self.tx.send(DecoderEvent::LevelSwitched { level });
    }
}

impl Decoder for FakeDecoder {
    fn levels(&self) -> Vec<QualityLevel> {
        vec![
            QualityLevel {
                width: 640,
                height: 360,
                bitrate: 800_000,
                name: Some("360p".to_string()),
            },
            QualityLevel {
                width: 1280,
                height: 720,
                bitrate: 2_500_000,
                name: Some("720p".to_string()),
            },
        ]
    }

    fn current_level(&self) -> i32 {
        *self.current_level.lock()
    }

    fn latency(&self) -> f64 {
        self.latency
    }

    fn bandwidth_estimate(&self) -> f64 {
        self.bandwidth_bps
    }

    fn subscribe(&self) -> broadcast::Receiver<DecoderEvent> {
        self.tx.subscribe()
    }

    fn destroy(&self) {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakeRuntime {
    supported: bool,
    hooks: Mutex<Vec<DecoderHook>>,
    pub prepared: AtomicUsize,
    pub patched: AtomicUsize,
    pub hooks_removed: AtomicUsize,
}

impl FakeRuntime {
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            hooks: Mutex::new(Vec::new()),
            prepared: AtomicUsize::new(0),
            patched: AtomicUsize::new(0),
            hooks_removed: AtomicUsize::new(0),
        }
    }

    /// Simulate the runtime constructing a decoder for the player.
    pub fn create_decoder(&self, decoder: Arc<FakeDecoder>) {
        let decoder: Arc<dyn Decoder> = decoder;
        for hook in self.hooks.lock().iter() {
            hook(decoder.clone());
        }
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.lock().len()
    }
}

impl StreamingRuntime for FakeRuntime {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn add_before_initialize_hook(&self, hook: DecoderHook) {
        self.hooks.lock().push(hook);
    }

    fn remove_all_hooks(&self) {
        self.hooks.lock().clear();
        self.hooks_removed.fetch_add(1, Ordering::SeqCst);
    }

    fn prepare_player(&self, _player: &dyn PlayerHost) {
        self.prepared.fetch_add(1, Ordering::SeqCst);
    }

    fn apply_patches(&self, _decoder: &dyn Decoder) {
        self.patched.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakeEngine {
    tx: broadcast::Sender<PeerEvent>,
    pub listeners_removed: AtomicUsize,
    pub destroyed: AtomicUsize,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            listeners_removed: AtomicUsize::new(0),
            destroyed: AtomicUsize::new(0),
        }
    }

    pub fn emit(&self, event: PeerEvent) {
        let _ = self.tx.send(event);
    }
}

impl PeerEngine for FakeEngine {
    fn subscribe(&self) -> broadcast::Receiver<PeerEvent> {
        self.tx.subscribe()
    }

    fn remove_all_listeners(&self) {
        self.listeners_removed.fetch_add(1, Ordering::SeqCst);
    }

    fn destroy(&self) {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakeLoader {
    pub engine: Arc<FakeEngine>,
    pub engines_created: AtomicUsize,
}

impl PeerLoader for FakeLoader {
    fn get_engine(&self) -> Arc<dyn PeerEngine> {
        self.engines_created.fetch_add(1, Ordering::SeqCst);
        self.engine.clone()
    }
}

pub struct Harness {
    pub player: Arc<FakePlayer>,
    pub runtime: Arc<FakeRuntime>,
    pub decoder: Arc<FakeDecoder>,
    pub engine: Arc<FakeEngine>,
    pub loader: Arc<FakeLoader>,
    pub redundancy: Arc<BaseUrlManager>,
    pub validator: Arc<Sha256SegmentValidator>,
}

impl Harness {
    pub fn new(decoder_supported: bool, native_hls: bool) -> Self {
        Self::with_peer_capacity(decoder_supported, native_hls, 64)
    }

    pub fn with_peer_capacity(decoder_supported: bool, native_hls: bool, capacity: usize) -> Self {
        let engine = Arc::new(FakeEngine::with_capacity(capacity));
        Self {
            player: Arc::new(FakePlayer::new(native_hls)),
            runtime: Arc::new(FakeRuntime::new(decoder_supported)),
            decoder: Arc::new(FakeDecoder::new()),
            loader: Arc::new(FakeLoader {
                engine: engine.clone(),
                engines_created: AtomicUsize::new(0),
            }),
            engine,
            redundancy: Arc::new(BaseUrlManager::new(vec![
                "https://mirror-a.example/hls/".to_string(),
                "https://mirror-b.example/hls/".to_string(),
            ])),
            validator: Arc::new(Sha256SegmentValidator::new(SegmentHashes::new())),
        }
    }

    pub fn config(&self) -> AdapterConfig {
        AdapterConfig {
            media_type: HLS_TYPE.to_string(),
            src: MASTER_URL.to_string(),
            video_file_token: Arc::new(|| TOKEN.to_string()),
            redundancy_url_manager: self.redundancy.clone(),
            segment_validator: Some(self.validator.clone()),
            loader: self.loader.clone(),
        }
    }

    pub fn engines_created(&self) -> usize {
        self.loader.engines_created.load(Ordering::SeqCst)
    }
}

/// Let spawned adapter tasks run without moving the paused clock.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
