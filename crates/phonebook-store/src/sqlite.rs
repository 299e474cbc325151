// SPDX-License-Identifier: Apache-2.0

use crate::{PersonStore, StoreError};
use async_trait::async_trait;
use phonebook_model::{Person, PersonDraft, PersonId};
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::Path;
use tokio::sync::Mutex;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS person (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    number TEXT NOT NULL
);";

/// SQLite-backed store. The connection lives behind a `tokio::sync::Mutex`;
/// every statement here is a point read or single-row write, so holding
/// the lock across the call is fine at this scale.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(backend_err)?;
        Self::prepare(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(backend_err)?;
        Self::prepare(conn)
    }

    fn prepare(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )
        .map_err(backend_err)?;
        conn.execute_batch(SCHEMA).map_err(backend_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn backend_err(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn write_err(e: rusqlite::Error, name: &str) -> StoreError {
    match &e {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::DuplicateName(name.to_string())
        }
        _ => backend_err(e),
    }
}

fn row_to_person(row: &Row<'_>) -> rusqlite::Result<Person> {
    let id: i64 = row.get(0)?;
    Ok(Person {
        id: PersonId::from_u64(id.unsigned_abs()),
        name: row.get(1)?,
        number: row.get(2)?,
    })
}

#[async_trait]
impl PersonStore for SqliteStore {
    fn backend_tag(&self) -> &'static str {
        "sqlite"
    }

    async fn list(&self) -> Result<Vec<Person>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT id, name, number FROM person ORDER BY id")
            .map_err(backend_err)?;
        let rows = stmt
            .query_map([], row_to_person)
            .map_err(backend_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(backend_err)?;
        Ok(rows)
    }

    async fn get(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        let Some(rowid) = id.as_u64() else {
            return Ok(None);
        };
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT id, name, number FROM person WHERE id = ?1",
            [rowid as i64],
            row_to_person,
        )
        .optional()
        .map_err(backend_err)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Person>, StoreError> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT id, name, number FROM person WHERE name = ?1",
            [name],
            row_to_person,
        )
        .optional()
        .map_err(backend_err)
    }

    async fn insert(&self, draft: PersonDraft) -> Result<Person, StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO person (name, number) VALUES (?1, ?2)",
            [draft.name.as_str(), draft.number.as_str()],
        )
        .map_err(|e| write_err(e, draft.name.as_str()))?;
        let id = PersonId::from_u64(conn.last_insert_rowid().unsigned_abs());
        Ok(draft.into_person(id))
    }

    async fn update(
        &self,
        id: &PersonId,
        draft: PersonDraft,
    ) -> Result<Option<Person>, StoreError> {
        let Some(rowid) = id.as_u64() else {
            return Ok(None);
        };
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE person SET name = ?1, number = ?2 WHERE id = ?3",
                rusqlite::params![draft.name.as_str(), draft.number.as_str(), rowid as i64],
            )
            .map_err(|e| write_err(e, draft.name.as_str()))?;
        if changed == 0 {
            return Ok(None);
        }
        Ok(Some(draft.into_person(id.clone())))
    }

    async fn delete(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        let Some(rowid) = id.as_u64() else {
            return Ok(None);
        };
        let conn = self.conn.lock().await;
        let existing = conn
            .query_row(
                "SELECT id, name, number FROM person WHERE id = ?1",
                [rowid as i64],
                row_to_person,
            )
            .optional()
            .map_err(backend_err)?;
        if existing.is_some() {
            conn.execute("DELETE FROM person WHERE id = ?1", [rowid as i64])
                .map_err(backend_err)?;
        }
        Ok(existing)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let conn = self.conn.lock().await;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM person", [], |row| row.get(0))
            .map_err(backend_err)?;
        Ok(count.unsigned_abs())
    }
}
