// Playback adapter
// Binds a player host to the ABR decoder runtime and the peer-assisted loader

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use super::capability::{negotiate, EngineCapability};
use super::source::with_video_file_token;
use super::stats::TransferStats;
use crate::config::AdapterConfig;
use crate::engine::{
    Decoder, DecoderEvent, MediaSource, PeerEvent, PlayerHost, QualityLevel, StreamingRuntime,
};
use crate::error::MediaError;
use crate::events::PlayerEvent;
use crate::settings::AdapterSettings;
use crate::state::{AdapterState, Lifecycle};

/// Attaches peer-assisted HLS playback to a player.
///
/// Must be created inside a tokio runtime: readiness waits and the telemetry
/// loop run as tasks on it. Dropping the adapter disposes it.
pub struct P2pMediaLoaderAdapter {
    inner: Arc<Inner>,
}

struct Inner {
    player: Arc<dyn PlayerHost>,
    runtime: Arc<dyn StreamingRuntime>,
    config: AdapterConfig,
    settings: AdapterSettings,
    capability: EngineCapability,
    state: AdapterState,
}

struct EventStreams {
    peer: Option<broadcast::Receiver<PeerEvent>>,
    decoder: Option<broadcast::Receiver<DecoderEvent>>,
}

impl P2pMediaLoaderAdapter {
    pub fn new(
        player: Arc<dyn PlayerHost>,
        runtime: Arc<dyn StreamingRuntime>,
        config: AdapterConfig,
    ) -> Self {
        Self::with_settings(player, runtime, config, AdapterSettings::default())
    }

    pub fn with_settings(
        player: Arc<dyn PlayerHost>,
        runtime: Arc<dyn StreamingRuntime>,
        config: AdapterConfig,
        settings: AdapterSettings,
    ) -> Self {
        let capability = negotiate(runtime.as_ref(), player.as_ref(), &settings.native_hls_mime);

        let inner = Arc::new(Inner {
            player,
            runtime,
            config,
            settings,
            capability,
            state: AdapterState::new(),
        });

        match capability {
            EngineCapability::NativeFallback => inner.fallback_to_native(),
            EngineCapability::Unsupported => {
                let message = "HLS decoder does not seem to be supported. Cannot fallback to built-in HLS";
                log::warn!("{}", message);
                inner.surface_error_when_ready(MediaError::src_not_supported(message));
            }
            EngineCapability::StandardEngine => Inner::start_standard(&inner),
        }

        Self { inner }
    }

    pub fn capability(&self) -> EngineCapability {
        self.inner.capability
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.state.lifecycle()
    }

    /// Active quality level, or `None` when no decoder is attached.
    pub fn current_level(&self) -> Option<QualityLevel> {
        let decoder = self.inner.state.decoder()?;
        let index = usize::try_from(decoder.current_level()).ok()?;
        decoder.levels().get(index).cloned()
    }

    /// Live latency in whole seconds, or `None` when no decoder is attached.
    pub fn live_latency(&self) -> Option<i64> {
        self.inner
            .state
            .decoder()
            .map(|decoder| decoder.latency().round() as i64)
    }

    /// Raw decoder handle for consumers that need more than the accessors above.
    pub fn decoder(&self) -> Option<Arc<dyn Decoder>> {
        self.inner.state.decoder()
    }

    pub fn transfer_stats(&self) -> TransferStats {
        self.inner.state.stats.lock().clone()
    }

    /// Tear everything down. Safe to call repeatedly and in any mode.
    pub fn dispose(&self) {
        self.inner.dispose();
    }
}

impl Drop for P2pMediaLoaderAdapter {
    fn drop(&mut self) {
        self.inner.dispose();
    }
}

impl Inner {
    fn start_standard(this: &Arc<Self>) {
        let weak = Arc::downgrade(this);
        this.runtime
            .add_before_initialize_hook(Box::new(move |decoder: Arc<dyn Decoder>| {
                // Hooks are removed on dispose, so a live adapter is all we need
                if let Some(inner) = weak.upgrade() {
                    *inner.state.decoder.lock() = Some(decoder);
                }
            }));

        this.runtime.prepare_player(this.player.as_ref());

        this.player.set_source(MediaSource::new(
            this.config.media_type.clone(),
            this.config.src.clone(),
        ));

        let weak = Arc::downgrade(this);
        let ready = this.player.ready_signal();
        let period = this.settings.stats_interval();
        let handle = tokio::spawn(async move {
            if !wait_ready(ready).await {
                log::debug!("Player went away before becoming ready");
                return;
            }

            let streams = match weak.upgrade() {
                Some(inner) => inner.initialize(),
                None => None,
            };

            if let Some(streams) = streams {
                run_events(weak, streams, period).await;
            }
        });
        this.state.subscriptions.register("player-ready", handle);
    }

    fn initialize(&self) -> Option<EventStreams> {
        let mut lifecycle = self.state.lifecycle.lock();
        if *lifecycle != Lifecycle::Created {
            return None;
        }

        let decoder = self.state.decoder();
        match &decoder {
            Some(decoder) => self.runtime.apply_patches(decoder.as_ref()),
            None => log::error!(
                "Player is ready but no decoder was captured; quality and bandwidth data will be missing"
            ),
        }

        let engine = self.config.loader.get_engine();
        let peer = engine.subscribe();
        *self.state.peer_engine.lock() = Some(engine);

        self.state
            .stats
            .lock()
            .reset_peers(self.config.redundancy_url_manager.count_base_urls());

        *lifecycle = Lifecycle::Initialized;
        log::debug!("P2P media loader initialized");

        Some(EventStreams {
            peer: Some(peer),
            decoder: decoder.map(|decoder| decoder.subscribe()),
        })
    }

    fn handle_peer_event(&self, event: PeerEvent) {
        if self.state.is_disposed() {
            return;
        }

        match event {
            PeerEvent::SegmentError { segment, error } => {
                // Offline errors are transient, the mirror is not at fault
                if !self.player.is_online() {
                    return;
                }

                log::error!("Segment {} error. {}", segment.id, error);
                self.config
                    .redundancy_url_manager
                    .remove_by_segment_url(&segment.request_url);
            }
            PeerEvent::PieceBytesDownloaded { method, bytes } => {
                self.state.stats.lock().record_download(&method, bytes);
            }
            PeerEvent::PieceBytesUploaded { method, bytes } => {
                self.state.stats.lock().record_upload(&method, bytes);
            }
            PeerEvent::PeerConnect { .. } => self.state.stats.lock().peer_connected(),
            PeerEvent::PeerClose { .. } => self.state.stats.lock().peer_closed(),
        }
    }

    fn handle_decoder_event(&self, event: DecoderEvent) {
        if self.state.is_disposed() {
            return;
        }

        if let DecoderEvent::LevelSwitched { level } = event {
            log::debug!("Decoder switched to level {}", level);
            self.player.trigger(PlayerEvent::EngineResolutionChange);
        }
    }

    fn emit_network_info(&self) {
        if self.state.is_disposed() {
            return;
        }

        let bandwidth = self
            .state
            .decoder()
            .map(|decoder| decoder.bandwidth_estimate())
            .unwrap_or(0.0);

        let info = self
            .state
            .stats
            .lock()
            .flush(&self.settings.telemetry.info_source, bandwidth);

        log::debug!(
            "Network info: http {} B/s, p2p down {} B/s up {} B/s, {} peers",
            info.http.download_speed,
            info.p2p.download_speed,
            info.p2p.upload_speed,
            info.p2p.num_peers
        );
        self.player.trigger(PlayerEvent::P2pInfo(info));
    }

    fn fallback_to_native(&self) {
        log::info!("HLS decoder does not seem to be supported. Fallback to built-in HLS.");

        let token = (self.config.video_file_token)();
        let src = match with_video_file_token(&self.config.src, &token) {
            Ok(src) => src,
            Err(e) => {
                log::error!("Cannot build built-in HLS source: {}", e);
                self.surface_error_when_ready(MediaError::src_not_supported(e.to_string()));
                return;
            }
        };

        self.player
            .set_source(MediaSource::new(self.config.media_type.clone(), src));

        // Built-in HLS cannot switch quality levels
        match self.player.resolution_control() {
            Some(control) => control.hide(),
            None => log::debug!("Player has no resolution control to hide"),
        }
    }

    fn surface_error_when_ready(&self, error: MediaError) {
        let player = Arc::clone(&self.player);
        let ready = player.ready_signal();
        let handle = tokio::spawn(async move {
            if wait_ready(ready).await {
                player.error(error);
            }
        });
        self.state.subscriptions.register("ready-error", handle);
    }

    fn dispose(&self) {
        {
            let mut lifecycle = self.state.lifecycle.lock();
            if *lifecycle == Lifecycle::Disposed {
                return;
            }
            *lifecycle = Lifecycle::Disposed;
        }

        // Lock released: collaborators below may call back into the adapter
        let engine = self.state.peer_engine.lock().take();
        if let Some(engine) = engine {
            engine.remove_all_listeners();
            engine.destroy();
        }

        let decoder = self.state.decoder.lock().take();
        if let Some(decoder) = decoder {
            decoder.destroy();
        }

        if let Some(validator) = &self.config.segment_validator {
            validator.destroy();
        }

        self.runtime.remove_all_hooks();
        self.state.subscriptions.close();

        self.player.release_plugin(&self.settings.plugin_name);
        log::debug!("P2P media loader disposed");
    }
}

async fn wait_ready(mut ready: watch::Receiver<bool>) -> bool {
    ready.wait_for(|ready| *ready).await.is_ok()
}

async fn next_event<T: Clone>(rx: &mut Option<broadcast::Receiver<T>>) -> Result<T, RecvError> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Single loop for every subscription so handlers never interleave.
async fn run_events(weak: Weak<Inner>, streams: EventStreams, period: Duration) {
    let EventStreams {
        mut peer,
        mut decoder,
    } = streams;

    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            event = next_event(&mut peer) => match event {
                Ok(event) => {
                    let Some(inner) = weak.upgrade() else { break };
                    inner.handle_peer_event(event);
                }
                // Skipped transfer events are not counted; telemetry under-reports that window
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Missed {} peer engine events", skipped);
                }
                Err(RecvError::Closed) => {
                    log::debug!("Peer engine event stream closed");
                    peer = None;
                }
            },

            event = next_event(&mut decoder) => match event {
                Ok(event) => {
                    let Some(inner) = weak.upgrade() else { break };
                    inner.handle_decoder_event(event);
                }
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Missed {} decoder events", skipped);
                }
                Err(RecvError::Closed) => {
                    log::debug!("Decoder event stream closed");
                    decoder = None;
                }
            },

            _ = ticker.tick() => {
                let Some(inner) = weak.upgrade() else { break };
                inner.emit_network_info();
            }
        }
    }
}
