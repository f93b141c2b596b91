pub mod base;
pub mod csv;
pub mod sheet;

use thiserror::Error;

use crate::models::Event;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed unavailable: {0}")]
    Unavailable(String),
}

/// A live source of portal events. One attempt per call, no retries; the
/// reconciler decides what to do when a feed fails or comes back empty.
pub trait EventFeed: Send + Sync {
    fn feed_id(&self) -> &'static str;
    fn fetch(&self) -> Result<Vec<Event>, FeedError>;
}
