// Source URL helpers
use url::Url;

use crate::error::AdapterError;

/// Append query parameters to `src`, keeping any it already has.
pub fn add_query_params(src: &str, params: &[(&str, &str)]) -> Result<String, AdapterError> {
    let mut url = Url::parse(src).map_err(|source| AdapterError::InvalidUrl {
        url: src.to_string(),
        source,
    })?;

    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }

    Ok(url.into())
}

/// Source URL for native playback: the token must be re-injected into every
/// playlist and segment request the platform player makes.
pub fn with_video_file_token(src: &str, token: &str) -> Result<String, AdapterError> {
    add_query_params(
        src,
        &[("videoFileToken", token), ("reinjectVideoFileToken", "true")],
    )
}
