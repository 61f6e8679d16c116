// Segment integrity checks against published SHA-256 hashes
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use regex::Regex;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::redundancy::basename;
use crate::engine::Segment;
use crate::error::ValidationError;

pub trait SegmentValidator: Send + Sync {
    fn validate(&self, segment: &Segment, data: &[u8]) -> Result<(), ValidationError>;

    fn destroy(&self);
}

/// Hash entry for one segment file: either the whole file, or one hash per byte range
/// when several segments share a single fragmented file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SegmentHash {
    Whole(String),
    Ranges(HashMap<String, String>),
}

pub type SegmentHashes = HashMap<String, SegmentHash>;

fn get_range_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"bytes=(\d+)-(\d+)").unwrap())
}

/// `bytes=10-20` -> `10-20`
fn parse_range(header: &str) -> Option<String> {
    let captures = get_range_regex().captures(header)?;
    Some(format!("{}-{}", &captures[1], &captures[2]))
}

pub struct Sha256SegmentValidator {
    hashes: Mutex<Option<SegmentHashes>>,
}

impl Sha256SegmentValidator {
    pub fn new(hashes: SegmentHashes) -> Self {
        Self {
            hashes: Mutex::new(Some(hashes)),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let hashes: SegmentHashes =
            serde_json::from_str(json).context("Failed to parse segment hashes")?;
        Ok(Self::new(hashes))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read segment hashes: {:?}", path))?;
        Self::from_json(&content)
    }

    /// Replace the hash table, e.g. after a live playlist published new segments.
    pub fn reload(&self, hashes: SegmentHashes) {
        let mut guard = self.hashes.lock();
        if guard.is_none() {
            log::debug!("Ignoring hash reload on a destroyed segment validator");
            return;
        }
        *guard = Some(hashes);
    }

    pub fn is_destroyed(&self) -> bool {
        self.hashes.lock().is_none()
    }
}

impl SegmentValidator for Sha256SegmentValidator {
    fn validate(&self, segment: &Segment, data: &[u8]) -> Result<(), ValidationError> {
        let guard = self.hashes.lock();
        let hashes = guard.as_ref().ok_or(ValidationError::Destroyed)?;

        let filename = basename(&segment.url);
        let entry = hashes
            .get(filename)
            .ok_or_else(|| ValidationError::UnknownSegment(filename.to_string()))?;

        let (expected, label) = match entry {
            SegmentHash::Whole(hash) => (hash, filename.to_string()),
            SegmentHash::Ranges(ranges) => {
                let range = segment
                    .range
                    .as_deref()
                    .and_then(parse_range)
                    .ok_or_else(|| ValidationError::MissingRange(filename.to_string()))?;

                let hash = ranges.get(&range).ok_or_else(|| ValidationError::UnknownRange {
                    filename: filename.to_string(),
                    range: range.clone(),
                })?;
                (hash, format!("{}/{}", filename, range))
            }
        };

        let actual = format!("{:x}", Sha256::digest(data));
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(ValidationError::HashMismatch {
                segment: label,
                expected: expected.clone(),
                actual,
            });
        }

        Ok(())
    }

    fn destroy(&self) {
        self.hashes.lock().take();
    }
}
