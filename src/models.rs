use serde::{Deserialize, Serialize};

pub const DEFAULT_CLUB: &str = "General";
pub const DEFAULT_TITLE: &str = "EDISON Update";
pub const DEFAULT_DESCRIPTION: &str = "Details pending...";
pub const DEFAULT_DATE: &str = "Coming Soon";
pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1517048676732-d65bc937f952?q=80&w=800";
pub const DEFAULT_TAG: &str = "Live";

/// One portal event. Every descriptive field is always populated; rows that
/// arrive with gaps are filled from the defaults above before anything
/// downstream sees them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub club: String,
    pub title: String,
    pub description: String,
    pub date: String, // free-form display date, never parsed as a calendar date
    pub image: String,
    pub tags: Vec<String>,
    /// True only for events sourced from the published sheet this cycle.
    /// Stored payloads predate this field, so it defaults on deserialize.
    #[serde(default)]
    pub is_live: bool,
}

