mod queries;

use std::fs;
use std::path::PathBuf;

use filter_studio_application::{ApplicationError, GalleryStore};
use filter_studio_domain::GalleryEntry;
use rusqlite::Connection;
use serde_json::Value;

use crate::migrations::MIGRATIONS;

/// Key under which the whole gallery is stored as one JSON array.
pub const GALLERY_KEY: &str = "editorArray";

/// Gallery persisted as a single JSON document in a SQLite key-value table.
#[derive(Debug, Clone)]
pub struct SqliteGalleryStore {
    path: PathBuf,
}

impl SqliteGalleryStore {
    pub fn new(path: String) -> Self {
        Self {
            path: PathBuf::from(path),
        }
    }

    fn open_connection(&self) -> Result<Connection, rusqlite::Error> {
        Connection::open(&self.path)
    }
}

impl GalleryStore for SqliteGalleryStore {
    fn initialize(&self) -> Result<(), ApplicationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "gallery path must not be empty".to_string(),
            ));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|error| ApplicationError::Io(error.to_string()))?;
            }
        }

        let conn = self
            .open_connection()
            .map_err(|error| ApplicationError::StoreWrite(error.to_string()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|error| ApplicationError::StoreWrite(error.to_string()))?;

        for migration in MIGRATIONS {
            conn.execute_batch(migration)
                .map_err(|error| ApplicationError::StoreWrite(error.to_string()))?;
        }

        Ok(())
    }

    fn load(&self) -> Result<Vec<GalleryEntry>, ApplicationError> {
        let conn = self
            .open_connection()
            .map_err(|error| ApplicationError::StoreRead(error.to_string()))?;
        let stored = read_stored_entries(&conn)?;

        let mut entries = Vec::with_capacity(stored.len());
        for (index, value) in stored.into_iter().enumerate() {
            match serde_json::from_value::<GalleryEntry>(value) {
                Ok(entry) => entries.push(entry),
                Err(error) => log::warn!("skipping unreadable gallery entry #{index}: {error}"),
            }
        }
        Ok(entries)
    }

    fn append(&self, entry: &GalleryEntry) -> Result<usize, ApplicationError> {
        let conn = self
            .open_connection()
            .map_err(|error| ApplicationError::StoreWrite(error.to_string()))?;
        let mut stored = read_stored_entries(&conn)?;
        stored.push(
            serde_json::to_value(entry)
                .map_err(|error| ApplicationError::StoreWrite(error.to_string()))?,
        );

        let document = serde_json::to_string(&stored)
            .map_err(|error| ApplicationError::StoreWrite(error.to_string()))?;
        queries::write_document(&conn, GALLERY_KEY, &document)
            .map_err(|error| ApplicationError::StoreWrite(error.to_string()))?;
        log::debug!(
            "wrote gallery document ({} entries, {} bytes)",
            stored.len(),
            document.len()
        );
        Ok(stored.len())
    }
}

/// Stored entries as raw JSON, so entries this build cannot interpret survive a rewrite.
fn read_stored_entries(conn: &Connection) -> Result<Vec<Value>, ApplicationError> {
    let Some(document) = queries::read_document(conn, GALLERY_KEY)
        .map_err(|error| ApplicationError::StoreRead(error.to_string()))?
    else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&document).map_err(|error| ApplicationError::StoreRead(error.to_string()))
}
