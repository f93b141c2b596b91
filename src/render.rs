use crate::models::Event;
use crate::sync::Snapshot;

/// Compact ticker projection of an event: title plus display date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerItem {
    pub title: String,
    pub date: String,
}

pub fn ticker_items(events: &[Event]) -> Vec<TickerItem> {
    events
        .iter()
        .map(|event| TickerItem {
            title: event.title.clone(),
            date: event.date.clone(),
        })
        .collect()
}

/// Build the scrolling strip markup. The item run is repeated three times so
/// the marquee animation wraps without a visible seam. Callers only invoke
/// this for live snapshots; the ticker is never populated from the store.
pub fn render_ticker(events: &[Event]) -> String {
    let run = ticker_items(events)
        .iter()
        .map(|item| {
            format!(
                "<span class=\"strip-item\">\u{1F514} {} \u{2013} {}</span>",
                item.title, item.date
            )
        })
        .collect::<Vec<_>>()
        .join("");
    format!("{run}{run}{run}")
}

/// Build the event grid markup for any terminal snapshot. An empty snapshot
/// renders the single placeholder paragraph instead of cards.
pub fn render_grid(snapshot: &Snapshot) -> String {
    let events = snapshot.events();
    if events.is_empty() {
        return "<p style=\"text-align: center; color: var(--text-muted);\">No events scheduled at the moment.</p>"
            .to_string();
    }

    events
        .iter()
        .map(|event| event_card(event))
        .collect::<Vec<_>>()
        .join("\n")
}

fn event_card(event: &Event) -> String {
    let badge_class = if event.is_live {
        "event-badge live"
    } else {
        "event-badge"
    };
    let live_dot = if event.is_live { " \u{25CF}" } else { "" };
    let tags = event
        .tags
        .iter()
        .map(|tag| format!("<span class=\"tag\">{tag}</span>"))
        .collect::<Vec<_>>()
        .join("");

    format!(
        "<div class=\"event-card\">\n  <div class=\"event-img\">\n    <img src=\"{image}\" alt=\"{title}\">\n    <span class=\"{badge_class}\">{club}{live_dot}</span>\n    <span class=\"event-date\">{date}</span>\n  </div>\n  <div class=\"event-details\">\n    <h3>{title}</h3>\n    <p>{description}</p>\n    <div class=\"event-tags\">{tags}</div>\n  </div>\n</div>",
        image = event.image,
        title = event.title,
        club = event.club,
        date = event.date,
        description = event.description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_event() -> Event {
        Event {
            club: "Krida".to_string(),
            title: "Sports Meet".to_string(),
            description: "Annual meet".to_string(),
            date: "2024-04-01".to_string(),
            image: "http://img".to_string(),
            tags: vec!["Sports".to_string(), "Tournament".to_string()],
            is_live: true,
        }
    }

    #[test]
    fn ticker_pairs_title_with_date() {
        let items = ticker_items(&[live_event()]);
        assert_eq!(
            items,
            vec![TickerItem {
                title: "Sports Meet".to_string(),
                date: "2024-04-01".to_string(),
            }]
        );
    }

    #[test]
    fn ticker_markup_repeats_run_three_times() {
        let html = render_ticker(&[live_event()]);
        assert_eq!(html.matches("Sports Meet \u{2013} 2024-04-01").count(), 3);
    }

    #[test]
    fn grid_renders_one_card_per_event() {
        let html = render_grid(&Snapshot::Live(vec![live_event()]));
        assert_eq!(html.matches("event-card").count(), 1);
        assert!(html.contains("<h3>Sports Meet</h3>"));
        assert!(html.contains("<span class=\"tag\">Tournament</span>"));
        assert!(html.contains("event-badge live"));
    }

    #[test]
    fn stored_events_render_without_live_badge() {
        let mut event = live_event();
        event.is_live = false;
        let html = render_grid(&Snapshot::Stored(vec![event]));
        assert!(!html.contains("event-badge live"));
        assert!(!html.contains('\u{25CF}'));
    }

    #[test]
    fn empty_snapshot_renders_placeholder() {
        let html = render_grid(&Snapshot::Empty);
        assert!(html.contains("No events scheduled at the moment."));
        assert!(!html.contains("event-card"));
    }

    #[test]
    fn same_snapshot_renders_identically() {
        let snapshot = Snapshot::Live(vec![live_event()]);
        assert_eq!(render_grid(&snapshot), render_grid(&snapshot));
    }
}
