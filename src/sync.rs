use anyhow::Result;

use crate::db::SqliteStore;
use crate::feed::{EventFeed, FeedError};
use crate::models::Event;

/// Fallback side of the pipeline. The portal only ever reads from it; the
/// admin dashboard owns the writes.
pub trait EventStore: Send + Sync {
    fn list_events(&self) -> Result<Vec<Event>>;
}

impl EventStore for SqliteStore {
    fn list_events(&self) -> Result<Vec<Event>> {
        Ok(self.read_events()?)
    }
}

/// Terminal state of one reconciliation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    /// Events sourced from the live feed this cycle.
    Live(Vec<Event>),
    /// Feed had nothing usable; events read from the persisted store.
    Stored(Vec<Event>),
    /// Neither source produced events.
    Empty,
}

impl Snapshot {
    pub fn events(&self) -> &[Event] {
        match self {
            Snapshot::Live(events) | Snapshot::Stored(events) => events,
            Snapshot::Empty => &[],
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Snapshot::Live(_))
    }
}

/// One refresh cycle: prefer the live feed, fall back to the store when the
/// feed is unreachable or has no data rows. Failures are logged and absorbed
/// here; nothing propagates to the page render. Cycles are independent, so
/// rerunning against unchanged sources yields an equal snapshot.
pub fn reconcile(feed: &dyn EventFeed, store: &dyn EventStore) -> Snapshot {
    match feed.fetch() {
        Ok(events) if !events.is_empty() => {
            log::info!("feed {} yielded {} events", feed.feed_id(), events.len());
            Snapshot::Live(events)
        }
        Ok(_) => {
            log::info!("feed {} has no data rows, using store", feed.feed_id());
            fallback(store)
        }
        Err(FeedError::Unavailable(reason)) => {
            log::warn!("feed {} unavailable: {reason}", feed.feed_id());
            fallback(store)
        }
    }
}

fn fallback(store: &dyn EventStore) -> Snapshot {
    match store.list_events() {
        Ok(events) if !events.is_empty() => Snapshot::Stored(events),
        Ok(_) => Snapshot::Empty,
        Err(err) => {
            log::warn!("event store unavailable: {err:#}");
            Snapshot::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::sheet::parse_csv;

    struct FakeFeed {
        pub body: Option<&'static str>,
    }

    impl EventFeed for FakeFeed {
        fn feed_id(&self) -> &'static str {
            "fake_feed"
        }

        fn fetch(&self) -> Result<Vec<Event>, FeedError> {
            match self.body {
                Some(body) => Ok(parse_csv(body)),
                None => Err(FeedError::Unavailable("connection refused".to_string())),
            }
        }
    }

    struct FakeStore {
        pub events: Vec<Event>,
        pub fail: bool,
    }

    impl EventStore for FakeStore {
        fn list_events(&self) -> Result<Vec<Event>> {
            if self.fail {
                anyhow::bail!("database locked");
            }
            Ok(self.events.clone())
        }
    }

    fn stored_event(title: &str) -> Event {
        Event {
            club: "Krida".to_string(),
            title: title.to_string(),
            description: "Departmental sports".to_string(),
            date: "2024-04-01".to_string(),
            image: "http://img".to_string(),
            tags: vec!["Sports".to_string()],
            is_live: false,
        }
    }

    const LIVE_BODY: &str =
        "Club,Title,Description,Date,Image,Tags\nKrida,Sports Meet,Annual meet,2024-04-01,http://img,Sports|Tournament\n";
    const HEADER_ONLY_BODY: &str = "Club,Title,Description,Date,Image,Tags\n";

    #[test]
    fn live_feed_wins_over_store() {
        let feed = FakeFeed {
            body: Some(LIVE_BODY),
        };
        let store = FakeStore {
            events: vec![stored_event("Old Meet")],
            fail: false,
        };
        let snapshot = reconcile(&feed, &store);
        assert!(snapshot.is_live());
        assert_eq!(snapshot.events().len(), 1);
        assert_eq!(snapshot.events()[0].title, "Sports Meet");
        assert!(snapshot.events()[0].is_live);
    }

    #[test]
    fn header_only_feed_falls_back_to_store() {
        let feed = FakeFeed {
            body: Some(HEADER_ONLY_BODY),
        };
        let store = FakeStore {
            events: vec![stored_event("Old Meet")],
            fail: false,
        };
        let snapshot = reconcile(&feed, &store);
        assert_eq!(snapshot, Snapshot::Stored(vec![stored_event("Old Meet")]));
    }

    #[test]
    fn unreachable_feed_falls_back_to_store() {
        let feed = FakeFeed { body: None };
        let store = FakeStore {
            events: vec![stored_event("Old Meet")],
            fail: false,
        };
        let snapshot = reconcile(&feed, &store);
        assert!(!snapshot.is_live());
        assert_eq!(snapshot.events()[0].title, "Old Meet");
    }

    #[test]
    fn empty_store_after_failed_feed_is_terminal_empty() {
        let feed = FakeFeed { body: None };
        let store = FakeStore {
            events: Vec::new(),
            fail: false,
        };
        assert_eq!(reconcile(&feed, &store), Snapshot::Empty);
    }

    #[test]
    fn store_error_is_absorbed_as_empty() {
        let feed = FakeFeed { body: None };
        let store = FakeStore {
            events: Vec::new(),
            fail: true,
        };
        assert_eq!(reconcile(&feed, &store), Snapshot::Empty);
    }

    #[test]
    fn repeated_cycles_yield_equal_snapshots() {
        let feed = FakeFeed {
            body: Some(LIVE_BODY),
        };
        let store = FakeStore {
            events: vec![stored_event("Old Meet")],
            fail: false,
        };
        assert_eq!(reconcile(&feed, &store), reconcile(&feed, &store));
    }
}
