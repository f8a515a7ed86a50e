//! Per-screen fetched collection with load/refresh lifecycle.

use chrono::{DateTime, Utc};

/// Identifies one fetch issued by a screen.
///
/// A screen accepts only the result of its latest fetch while mounted;
/// anything older, or anything arriving after unmount, is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
}

/// Outcome of a fetch as delivered back to the store.
pub type FetchOutcome<T> = std::result::Result<Vec<T>, String>;

/// Items fetched by one screen plus its loading flags.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    /// Items from the last successful fetch.
    pub items: Vec<T>,
    /// Initial load in flight.
    pub loading: bool,
    /// Refresh in flight. Shown separately from `loading`.
    pub refreshing: bool,
    /// Currently selected index.
    pub selected_index: Option<usize>,
    /// Last successful fetch.
    pub last_updated: Option<DateTime<Utc>>,
    mounted: bool,
    epoch: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            refreshing: false,
            selected_index: None,
            last_updated: None,
            mounted: false,
            epoch: 0,
        }
    }
}

impl<T> Collection<T> {
    /// Mount the screen: start from an empty collection and begin loading.
    pub fn mount(&mut self) -> FetchTicket {
        self.epoch += 1;
        self.mounted = true;
        self.items.clear();
        self.selected_index = None;
        self.last_updated = None;
        self.loading = true;
        self.refreshing = false;
        FetchTicket { epoch: self.epoch }
    }

    /// Begin a refresh. Displayed items stay until the response arrives.
    ///
    /// Returns `None` when the screen is not mounted.
    pub fn begin_refresh(&mut self) -> Option<FetchTicket> {
        if !self.mounted {
            return None;
        }
        self.epoch += 1;
        self.refreshing = true;
        Some(FetchTicket { epoch: self.epoch })
    }

    /// Apply a fetch outcome. Returns false if the ticket was stale and the
    /// outcome ignored.
    ///
    /// A failure keeps the current items. Both flags are cleared either way.
    pub fn settle(&mut self, ticket: FetchTicket, outcome: FetchOutcome<T>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        if let Ok(items) = outcome {
            self.items = items;
            self.last_updated = Some(Utc::now());
            self.clamp_selection();
        }

        self.loading = false;
        self.refreshing = false;
        true
    }

    /// Tear the screen down. Any fetch still in flight becomes stale.
    pub fn unmount(&mut self) {
        self.epoch += 1;
        self.mounted = false;
        self.loading = false;
        self.refreshing = false;
    }

    /// Whether the ticket belongs to the latest fetch of a mounted screen.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.mounted && ticket.epoch == self.epoch
    }

    /// Ticket of the latest fetch, while mounted. Changes that must not
    /// outlive the current data are tagged with it.
    pub fn current_ticket(&self) -> Option<FetchTicket> {
        self.mounted.then_some(FetchTicket { epoch: self.epoch })
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The selected item.
    pub fn selected(&self) -> Option<&T> {
        self.selected_index.and_then(|i| self.items.get(i))
    }

    /// Move the selection by `delta`, clamped to `len` visible rows.
    pub fn scroll(&mut self, delta: i32, len: usize) {
        if len == 0 {
            self.selected_index = None;
            return;
        }
        let current = self.selected_index.unwrap_or(0) as i64;
        let next = (current + delta as i64).clamp(0, len as i64 - 1);
        self.selected_index = Some(next as usize);
    }

    fn clamp_selection(&mut self) {
        self.selected_index = match (self.selected_index, self.items.len()) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
    }
}
