use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection};
use sha2::{Digest, Sha256};

use crate::models::Event;
use crate::utils;

pub struct Store {
    conn: Connection,
}

/// Shareable read handle for the portal. `Connection` is not `Sync`, so this
/// keeps only the database path and opens a fresh connection per read, the
/// same way the admin commands do.
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn open_default() -> Self {
        let path = utils::database_path();
        utils::ensure_parent(&path);
        Self { path }
    }

    pub fn at(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn read_events(&self) -> rusqlite::Result<Vec<Event>> {
        Store::open_at(&self.path)?.list_events()
    }
}

impl Store {
    pub fn open_default() -> rusqlite::Result<Self> {
        let path = utils::database_path();
        utils::ensure_parent(&path);
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        store.seed_if_empty()?;
        Ok(store)
    }

    fn init_schema(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS events(
                id TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                date TEXT NOT NULL,
                created_at_utc TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    fn seed_if_empty(&self) -> rusqlite::Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        for event in seed_events() {
            self.add_event(&event)?;
        }

        Ok(())
    }

    pub fn add_event(&self, event: &Event) -> rusqlite::Result<()> {
        let now = Utc::now().to_rfc3339();
        let payload = serde_json::to_string(event).expect("event serialization");
        self.conn.execute(
            "INSERT INTO events (id, payload, date, created_at_utc)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
               payload = excluded.payload,
               date = excluded.date",
            params![event_key(event), payload, event.date, now],
        )?;
        Ok(())
    }

    /// Newest events first. `date` is a display string, but the seeded and
    /// admin-entered values are ISO-like, so lexicographic DESC matches the
    /// original portal ordering.
    pub fn list_events(&self) -> rusqlite::Result<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM events ORDER BY date DESC")?;
        let rows = stmt.query_map([], |row| {
            let payload: String = row.get(0)?;
            let event: Event = serde_json::from_str(&payload).map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(
                    payload.len(),
                    rusqlite::types::Type::Text,
                    Box::new(err),
                )
            })?;
            Ok(event)
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

fn event_key(event: &Event) -> String {
    let mut hasher = Sha256::new();
    hasher.update(event.club.as_bytes());
    hasher.update(b"|");
    hasher.update(event.title.as_bytes());
    hasher.update(b"|");
    hasher.update(event.date.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn seed_events() -> Vec<Event> {
    vec![
        sample_event(
            "Krida",
            "EEE Annual Sports Meet",
            "Departmental sports competitions and athletic events.",
            "2024-04-01",
            vec!["Sports", "Tournament"],
        ),
        sample_event(
            "Echo",
            "Speech & Debate Meet",
            "Enhance your public speaking skills with current industry topics.",
            "2024-03-15",
            vec!["Soft Skills", "Debate"],
        ),
        sample_event(
            "Green Energy",
            "Energy Conservation Seminar",
            "Learn about sustainable power and conservation strategies.",
            "2024-03-10",
            vec!["Green", "Awareness"],
        ),
    ]
}

fn sample_event(club: &str, title: &str, description: &str, date: &str, tags: Vec<&str>) -> Event {
    Event {
        club: club.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        image: crate::models::DEFAULT_IMAGE.to_string(),
        tags: tags.into_iter().map(str::to_string).collect(),
        is_live: false,
    }
}
