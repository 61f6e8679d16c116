// Error types for the playback adapter
use std::fmt;

/// HTML media error codes as understood by player hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaErrorCode {
    Aborted = 1,
    Network = 2,
    Decode = 3,
    SrcNotSupported = 4,
}

impl MediaErrorCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for MediaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaErrorCode::Aborted => "MEDIA_ERR_ABORTED",
            MediaErrorCode::Network => "MEDIA_ERR_NETWORK",
            MediaErrorCode::Decode => "MEDIA_ERR_DECODE",
            MediaErrorCode::SrcNotSupported => "MEDIA_ERR_SRC_NOT_SUPPORTED",
        };
        f.write_str(name)
    }
}

/// Error surfaced through the player's error channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct MediaError {
    pub code: MediaErrorCode,
    pub message: String,
}

impl MediaError {
    pub fn src_not_supported(message: impl Into<String>) -> Self {
        Self {
            code: MediaErrorCode::SrcNotSupported,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid source URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unknown segment name {0} in segment validator")]
    UnknownSegment(String),

    #[error("Unknown segment name {filename}/{range} in segment validator")]
    UnknownRange { filename: String, range: String },

    #[error("Segment {0} has no usable byte range")]
    MissingRange(String),

    #[error("Hashes does not correspond for segment {segment} (expected: {expected} instead of {actual})")]
    HashMismatch {
        segment: String,
        expected: String,
        actual: String,
    },

    #[error("segment validator was destroyed")]
    Destroyed,
}
