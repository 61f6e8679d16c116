// Player host interface
// The UI player the adapter is attached to: source, readiness, events, errors

use tokio::sync::watch;

use crate::error::MediaError;
use crate::events::PlayerEvent;

/// A media source as handed to the player: MIME type plus URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub media_type: String,
    pub src: String,
}

impl MediaSource {
    pub fn new(media_type: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            src: src.into(),
        }
    }
}

/// A UI control the adapter may need to hide.
pub trait UiControl: Send + Sync {
    fn hide(&self);
}

pub trait PlayerHost: Send + Sync + 'static {
    /// Whether the player can natively play the given MIME type.
    fn can_play_type(&self, mime: &str) -> bool;

    fn set_source(&self, source: MediaSource);

    /// Readiness flag. Flips to `true` once the player is ready and stays there.
    fn ready_signal(&self) -> watch::Receiver<bool>;

    /// Dispatch an event to the player's listeners.
    fn trigger(&self, event: PlayerEvent);

    /// Surface a media error through the player's error channel.
    fn error(&self, error: MediaError);

    /// The control used to switch quality levels, if the UI has one.
    fn resolution_control(&self) -> Option<std::sync::Arc<dyn UiControl>>;

    /// Network connectivity as reported by the host environment.
    fn is_online(&self) -> bool {
        true
    }

    /// Detach a plugin by name once it has torn itself down.
    fn release_plugin(&self, _name: &str) {}
}
