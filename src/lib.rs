mod config;
mod db;
pub mod feed;
mod models;
mod render;
mod scheduler;
mod sync;
mod utils;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use anyhow::Context;

pub use config::{AppConfig, ConfigStore};
pub use db::{SqliteStore, Store};
pub use feed::sheet::{sheet_csv_url, SheetFeed};
pub use feed::{EventFeed, FeedError};
pub use models::Event;
pub use render::{render_grid, render_ticker, ticker_items, TickerItem};
pub use scheduler::start_refresh_loop;
pub use sync::{reconcile, EventStore, Snapshot};

/// The two rendered surfaces the portal page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedView {
    pub ticker_html: String,
    pub grid_html: String,
}

/// What a completed refresh cycle did, with the event count it published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Live(usize),
    Stored(usize),
    Empty,
    /// `invalidate` was called while the cycle ran; nothing was published.
    Superseded,
}

/// View-model that owns the currently rendered event lists. All state flows
/// through `refresh`; there are no module-level caches.
pub struct Portal {
    feed: Box<dyn EventFeed>,
    store: Box<dyn EventStore>,
    refresh_gate: Mutex<()>,
    epoch: AtomicU64,
    view: Mutex<RenderedView>,
}

impl Portal {
    pub fn new(feed: Box<dyn EventFeed>, store: Box<dyn EventStore>) -> Self {
        Self {
            feed,
            store,
            refresh_gate: Mutex::new(()),
            epoch: AtomicU64::new(0),
            view: Mutex::new(RenderedView::default()),
        }
    }

    /// Portal wired to the configured published sheet and the on-disk event
    /// store. Without a configured sheet id the feed reports unavailable and
    /// every cycle renders from the store.
    pub fn open_default() -> anyhow::Result<Self> {
        let config = ConfigStore::load().read();
        Store::open_default().context("open event store")?;
        let feed: Box<dyn EventFeed> = match config.sheet_id {
            Some(sheet_id) => Box::new(SheetFeed::new(&sheet_id)),
            None => Box::new(UnconfiguredFeed),
        };
        Ok(Self::new(feed, Box::new(SqliteStore::open_default())))
    }

    /// Run one reconciliation cycle and publish the result. Calls are
    /// serialized through the gate, so at most one cycle is in flight and
    /// overlapping triggers queue rather than race. The grid is republished
    /// every cycle; the ticker only when the feed itself produced events, so
    /// a store fallback leaves the previous ticker content alone.
    pub fn refresh(&self) -> RefreshOutcome {
        let _cycle = self.refresh_gate.lock().expect("refresh gate poisoned");
        let started_at = self.epoch.load(Ordering::SeqCst);

        let snapshot = sync::reconcile(self.feed.as_ref(), self.store.as_ref());

        if self.epoch.load(Ordering::SeqCst) != started_at {
            log::info!(
                "refresh superseded, discarding {} events",
                snapshot.events().len()
            );
            return RefreshOutcome::Superseded;
        }

        let mut view = self.view.lock().expect("view mutex poisoned");
        view.grid_html = render::render_grid(&snapshot);
        match snapshot {
            Snapshot::Live(events) => {
                view.ticker_html = render::render_ticker(&events);
                RefreshOutcome::Live(events.len())
            }
            Snapshot::Stored(events) => RefreshOutcome::Stored(events.len()),
            Snapshot::Empty => RefreshOutcome::Empty,
        }
    }

    /// Mark the in-flight cycle stale, e.g. when the user navigates away
    /// mid-sync. The superseded cycle publishes nothing; the next cycle
    /// publishes normally.
    pub fn invalidate(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    pub fn view(&self) -> RenderedView {
        self.view.lock().expect("view mutex poisoned").clone()
    }
}

struct UnconfiguredFeed;

impl EventFeed for UnconfiguredFeed {
    fn feed_id(&self) -> &'static str {
        "unconfigured"
    }

    fn fetch(&self) -> Result<Vec<Event>, FeedError> {
        Err(FeedError::Unavailable("no sheet id configured".to_string()))
    }
}
