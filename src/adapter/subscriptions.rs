// Every task the adapter spawns is registered here so disposal can stop all of them at once
use parking_lot::Mutex;
use tokio::task::JoinHandle;

struct Subscription {
    label: &'static str,
    handle: JoinHandle<()>,
}

pub struct Subscriptions {
    // None once closed
    entries: Mutex<Option<Vec<Subscription>>>,
}

impl Default for Subscriptions {
    fn default() -> Self {
        Self {
            entries: Mutex::new(Some(Vec::new())),
        }
    }
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a spawned task. Aborted immediately if the set is already closed.
    pub fn register(&self, label: &'static str, handle: JoinHandle<()>) {
        match self.entries.lock().as_mut() {
            Some(entries) => entries.push(Subscription { label, handle }),
            None => {
                log::debug!("Subscription {} registered after teardown, aborting", label);
                handle.abort();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Abort every tracked task. Later registrations are aborted on arrival.
    pub fn close(&self) {
        let Some(entries) = self.entries.lock().take() else {
            return;
        };

        for entry in entries {
            log::debug!("Cancelling {}", entry.label);
            entry.handle.abort();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.entries.lock().is_none()
    }
}
