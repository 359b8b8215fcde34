use chrono::{DateTime, NaiveDateTime, Utc};
use log::debug;
use rusqlite::{params, Connection, Params, Row};

use super::schema::TIMESTAMP_FORMAT;
use super::{NoteStore, StoreResult};
use crate::models::Note;

const SELECT_NOTES: &str = "SELECT id, title, body, source, created_at FROM notes";
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id DESC";

fn parse_timestamp(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })
}

impl NoteStore {
    // ==================== CREATE ====================

    /// Insert a note and return its id. `created_at` is stamped by the database.
    pub fn add(&self, title: &str, body: &str, source: Option<&str>) -> StoreResult<i64> {
        let id = self.write(|tx| {
            tx.execute(
                "INSERT INTO notes (title, body, source) VALUES (?1, ?2, ?3)",
                params![title, body, source],
            )?;
            Ok(tx.last_insert_rowid())
        })?;
        debug!("inserted note {}", id);
        Ok(id)
    }

    // ==================== READ ====================

    /// All notes, newest first.
    pub fn list_all(&self) -> StoreResult<Vec<Note>> {
        let sql = format!("{} {}", SELECT_NOTES, NEWEST_FIRST);
        self.read(|conn| Self::query_notes(conn, &sql, []))
    }

    pub fn get(&self, id: i64) -> StoreResult<Option<Note>> {
        let sql = format!("{} WHERE id = ?1", SELECT_NOTES);
        let mut notes = self.read(|conn| Self::query_notes(conn, &sql, [id]))?;
        Ok(notes.pop())
    }

    pub fn count(&self) -> StoreResult<u64> {
        let count: i64 =
            self.read(|conn| conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0)))?;
        Ok(count as u64)
    }

    /// Notes whose title, body or source contains `query`, newest first.
    ///
    /// The query is dropped into a `LIKE '%query%'` pattern as-is, so `%` and
    /// `_` inside it keep their wildcard meaning. Use [`Self::search_literal`]
    /// to match them verbatim. An empty query returns every note.
    pub fn search(&self, query: &str) -> StoreResult<Vec<Note>> {
        let pattern = format!("%{}%", query);
        let sql = format!(
            "{} WHERE title LIKE ?1 OR body LIKE ?1 OR source LIKE ?1 {}",
            SELECT_NOTES, NEWEST_FIRST
        );
        let notes = self.read(|conn| Self::query_notes(conn, &sql, [&pattern]))?;
        debug!("search {:?} matched {} notes", query, notes.len());
        Ok(notes)
    }

    /// Like [`Self::search`], but `%`, `_` and `\` in `query` match literally.
    pub fn search_literal(&self, query: &str) -> StoreResult<Vec<Note>> {
        let pattern = format!("%{}%", Self::escape_like(query));
        let sql = format!(
            r#"{} WHERE title LIKE ?1 ESCAPE '\' OR body LIKE ?1 ESCAPE '\' OR source LIKE ?1 ESCAPE '\' {}"#,
            SELECT_NOTES, NEWEST_FIRST
        );
        let notes = self.read(|conn| Self::query_notes(conn, &sql, [&pattern]))?;
        debug!("literal search {:?} matched {} notes", query, notes.len());
        Ok(notes)
    }

    /// Escape LIKE metacharacters (% _ \)
    fn escape_like(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '%' | '_' | '\\' => {
                    result.push('\\');
                    result.push(c);
                }
                _ => result.push(c),
            }
        }
        result
    }

    // ==================== UPDATE ====================

    /// Overwrite title, body and source. Returns `false` when no note has `id`;
    /// that is not treated as an error.
    pub fn update(
        &self,
        id: i64,
        title: &str,
        body: &str,
        source: Option<&str>,
    ) -> StoreResult<bool> {
        let rows = self.write(|tx| {
            tx.execute(
                "UPDATE notes SET title = ?1, body = ?2, source = ?3 WHERE id = ?4",
                params![title, body, source, id],
            )
        })?;
        debug!("update note {} affected {} rows", id, rows);
        Ok(rows > 0)
    }

    // ==================== DELETE ====================

    /// Permanently remove a note. Returns `false` when it did not exist.
    pub fn delete(&self, id: i64) -> StoreResult<bool> {
        let rows = self.write(|tx| tx.execute("DELETE FROM notes WHERE id = ?1", [id]))?;
        debug!("delete note {} affected {} rows", id, rows);
        Ok(rows > 0)
    }

    // ==================== ROW MAPPERS ====================

    fn query_notes<P: Params>(conn: &Connection, sql: &str, params: P) -> rusqlite::Result<Vec<Note>> {
        let mut stmt = conn.prepare(sql)?;

        let notes = stmt
            .query_map(params, Self::row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
        let created_at: String = row.get("created_at")?;

        Ok(Note {
            id: row.get("id")?,
            title: row.get("title")?,
            body: row.get("body")?,
            source: row.get("source")?,
            created_at: parse_timestamp(&created_at)?,
        })
    }
}
