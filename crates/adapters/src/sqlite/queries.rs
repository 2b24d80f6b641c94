use rusqlite::{params, Connection, Result};

pub fn write_document(conn: &Connection, key: &str, value_json: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO documents (key, value_json, updated_at)
         VALUES (?1, ?2, strftime('%s', 'now'))
         ON CONFLICT(key) DO UPDATE SET
            value_json = excluded.value_json,
            updated_at = excluded.updated_at",
        params![key, value_json],
    )?;
    Ok(())
}

pub fn read_document(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare(
        "SELECT value_json
         FROM documents
         WHERE key = ?1",
    )?;
    let mut rows = stmt.query(params![key])?;
    if let Some(row) = rows.next()? {
        let value_json: String = row.get(0)?;
        return Ok(Some(value_json));
    }
    Ok(None)
}
