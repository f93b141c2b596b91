use super::{base, csv, EventFeed, FeedError};
use crate::models::{
    Event, DEFAULT_CLUB, DEFAULT_DATE, DEFAULT_DESCRIPTION, DEFAULT_IMAGE, DEFAULT_TAG,
    DEFAULT_TITLE,
};

const FEED_ID: &str = "published_sheet";

/// CSV export endpoint for a sheet published to the web. The gviz endpoint
/// tends to be more reliable than the plain export URL.
pub fn sheet_csv_url(sheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{sheet_id}/gviz/tq?tqx=out:csv")
}

pub struct SheetFeed {
    csv_url: String,
}

impl SheetFeed {
    pub fn new(sheet_id: &str) -> Self {
        Self {
            csv_url: sheet_csv_url(sheet_id),
        }
    }

    #[cfg(test)]
    fn from_url(csv_url: &str) -> Self {
        Self {
            csv_url: csv_url.to_string(),
        }
    }
}

impl EventFeed for SheetFeed {
    fn feed_id(&self) -> &'static str {
        FEED_ID
    }

    fn fetch(&self) -> Result<Vec<Event>, FeedError> {
        let text = base::fetch_text(&self.csv_url)
            .map_err(|err| FeedError::Unavailable(format!("{err:#}")))?;
        let events = parse_csv(&text);
        log::debug!(
            "{FEED_ID}: fetched {} bytes, {} data rows",
            text.len(),
            events.len()
        );
        Ok(events)
    }
}

/// Parse a full CSV body into events. The first row is the column header
/// and is discarded; a body with no data rows yields an empty vec, which
/// the reconciler treats as "feed empty".
pub fn parse_csv(text: &str) -> Vec<Event> {
    let rows: Vec<Vec<String>> = text
        .split(['\r', '\n'])
        .map(csv::split_line)
        .filter(|row| !row.is_empty())
        .collect();

    if rows.len() < 2 {
        return Vec::new();
    }

    rows[1..].iter().map(|row| event_from_row(row)).collect()
}

/// Positional mapping: club, title, description, date, image, tags.
/// Missing or empty positions fall back to the portal defaults, so any
/// non-empty row produces a renderable event.
pub fn event_from_row(row: &[String]) -> Event {
    Event {
        club: field(row, 0).unwrap_or_else(|| DEFAULT_CLUB.to_string()),
        title: field(row, 1).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: field(row, 2).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        date: field(row, 3).unwrap_or_else(|| DEFAULT_DATE.to_string()),
        image: field(row, 4).unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        tags: field(row, 5)
            .map(|raw| raw.split('|').map(str::to_string).collect())
            .unwrap_or_else(|| vec![DEFAULT_TAG.to_string()]),
        is_live: true,
    }
}

fn field(row: &[String], idx: usize) -> Option<String> {
    row.get(idx)
        .map(|value| base::clean_text(value))
        .filter(|value| !value.is_empty())
}
