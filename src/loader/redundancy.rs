// Redundancy (mirror) base URL bookkeeping
use parking_lot::Mutex;
use rand::Rng;

pub trait RedundancyUrlManager: Send + Sync {
    /// Drop the mirror that served `segment_url` from rotation.
    fn remove_by_segment_url(&self, segment_url: &str);

    fn count_base_urls(&self) -> usize;
}

/// Mirror list shared between the loader and the adapter.
#[derive(Debug, Default)]
pub struct BaseUrlManager {
    base_urls: Mutex<Vec<String>>,
}

impl BaseUrlManager {
    pub fn new(base_urls: Vec<String>) -> Self {
        Self {
            base_urls: Mutex::new(base_urls),
        }
    }

    pub fn base_urls(&self) -> Vec<String> {
        self.base_urls.lock().clone()
    }

    /// Rewrite `url` onto a random mirror, or keep the original.
    ///
    /// The original URL counts as one more candidate in the draw.
    pub fn build_url(&self, url: &str, use_original_url: bool) -> String {
        if use_original_url {
            return url.to_string();
        }

        let base_urls = self.base_urls.lock();
        let max = base_urls.len() + 1;
        let i = rand::thread_rng().gen_range(0..max);

        if i == max - 1 {
            return url.to_string();
        }

        let base = &base_urls[i];
        let slash = if base.ends_with('/') { "" } else { "/" };
        format!("{}{}{}", base, slash, basename(url))
    }
}

impl RedundancyUrlManager for BaseUrlManager {
    fn remove_by_segment_url(&self, segment_url: &str) {
        log::info!("Removing redundancy of segment URL {}.", segment_url);

        let mut base_urls = self.base_urls.lock();
        let before = base_urls.len();
        base_urls.retain(|base| !segment_url.starts_with(base.as_str()));

        if base_urls.len() == before {
            log::info!("Did not find base URL for segment URL {}.", segment_url);
        }
    }

    fn count_base_urls(&self) -> usize {
        self.base_urls.lock().len()
    }
}

/// Last path component of a URL, query string excluded.
pub(crate) fn basename(url: &str) -> &str {
    let path = url.split(|c: char| c == '?' || c == '#').next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}
