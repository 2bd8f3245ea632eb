use rusqlite::{params, Connection, OptionalExtension};

// ── Blobs ──

pub fn get_blob(conn: &Connection, key: &str) -> anyhow::Result<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM blobs WHERE key = ?1", [key], |row| {
            row.get::<_, String>(0)
        })
        .optional()?;
    Ok(value)
}

pub fn set_blob(conn: &Connection, key: &str, value: &str) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO blobs (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_all_blobs(conn: &Connection) -> anyhow::Result<usize> {
    let removed = conn.execute("DELETE FROM blobs", [])?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn test_set_then_get_overwrites() {
        let conn = db::init_db(":memory:").unwrap();
        assert_eq!(get_blob(&conn, "k").unwrap(), None);

        set_blob(&conn, "k", "[1]").unwrap();
        set_blob(&conn, "k", "[2]").unwrap();
        assert_eq!(get_blob(&conn, "k").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_delete_all() {
        let conn = db::init_db(":memory:").unwrap();
        set_blob(&conn, "a", "1").unwrap();
        set_blob(&conn, "b", "2").unwrap();
        assert_eq!(delete_all_blobs(&conn).unwrap(), 2);
        assert_eq!(get_blob(&conn, "a").unwrap(), None);
    }
}
