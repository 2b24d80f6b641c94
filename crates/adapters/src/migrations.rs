pub const MIGRATIONS: &[&str] = &["CREATE TABLE IF NOT EXISTS documents (
        key TEXT PRIMARY KEY NOT NULL,
        value_json TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );"];
