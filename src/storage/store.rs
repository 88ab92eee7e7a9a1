//! Candidate Store - SQLite-backed persistence for interview records
//!
//! One table, one row per candidate. Ratings are kept as a JSON object in a
//! TEXT column; timestamps as RFC 3339 strings.

use chrono::{SubsecRound, Utc};
use rusqlite::{params, params_from_iter, Connection, OpenFlags, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::candidate::{
    format_timestamp, generate_candidate_id, parse_timestamp, Candidate, CandidateSummary,
    CandidateUpdate, FieldUpdate, Ratings,
};
use crate::storage::{StorageError, StorageResult};

/// How many random ids to try before giving up on a create
const MAX_ID_ATTEMPTS: usize = 16;

const SELECT_COLUMNS: &str = "id, created_at, consented, consent_date, self_reflection, \
     reflection_consistency, ratings, conclusion, notes, star_notes, vesier_notes";

/// SQLite store for candidate records
///
/// Statements run on tokio's blocking pool; the connection is shared
/// behind a mutex, so they execute one at a time.
pub struct CandidateStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl CandidateStore {
    /// Create or open the database at `path`
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> StorageResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS candidates (
                id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                self_reflection TEXT,
                ratings TEXT,
                conclusion TEXT,
                notes TEXT,
                star_notes TEXT,
                vesier_notes TEXT,
                reflection_consistency TEXT,
                consented INTEGER NOT NULL DEFAULT 0,
                consent_date TEXT
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_candidates_created ON candidates(created_at)",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        })
    }

    /// Path of the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` against the connection on the blocking thread pool
    async fn with_conn<T, F>(&self, f: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StorageResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StorageError::Database("connection lock poisoned".to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StorageError::Database(format!("storage task failed: {}", e)))?
    }

    /// Insert a new, empty candidate with a fresh anonymised id
    pub async fn create(&self) -> StorageResult<Candidate> {
        let now = Utc::now().trunc_subsecs(0);
        let created_at = format_timestamp(&now);

        self.with_conn(move |conn| {
            for _ in 0..MAX_ID_ATTEMPTS {
                let id = generate_candidate_id(now);
                let inserted = conn.execute(
                    "INSERT OR IGNORE INTO candidates (id, created_at) VALUES (?1, ?2)",
                    params![id, created_at],
                )?;

                if inserted == 1 {
                    tracing::info!(candidate_id = %id, "Created candidate");
                    return Ok(Candidate::new(id, now));
                }

                tracing::debug!(candidate_id = %id, "Candidate id collision, retrying");
            }

            Err(StorageError::IdExhausted(MAX_ID_ATTEMPTS))
        })
        .await
    }

    /// List all candidates, oldest first
    pub async fn list(&self) -> StorageResult<Vec<CandidateSummary>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT id, created_at, consented FROM candidates ORDER BY created_at, id",
            )?;

            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?;

            let mut summaries = Vec::new();
            for row in rows {
                let (id, created_at, consented) = row?;
                let created_at =
                    parse_timestamp(&created_at).ok_or_else(|| StorageError::Corruption {
                        id: id.clone(),
                        reason: format!("invalid created_at '{}'", created_at),
                    })?;
                summaries.push(CandidateSummary {
                    id,
                    created_at,
                    consented: consented != 0,
                });
            }

            Ok(summaries)
        })
        .await
    }

    /// Fetch one candidate
    pub async fn get(&self, id: &str) -> StorageResult<Option<Candidate>> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let sql = format!("SELECT {} FROM candidates WHERE id = ?1", SELECT_COLUMNS);

            let raw = conn
                .query_row(&sql, params![id], RawCandidate::from_row)
                .optional()?;

            raw.map(RawCandidate::into_candidate).transpose()
        })
        .await
    }

    /// Apply a validated partial update
    ///
    /// All changes land in one statement; fails with
    /// [`StorageError::CandidateNotFound`] if no row matched.
    pub async fn update(&self, id: &str, update: &CandidateUpdate) -> StorageResult<()> {
        if update.is_empty() {
            return Ok(());
        }

        let mut set_clauses = Vec::with_capacity(update.changes().len());
        let mut values: Vec<rusqlite::types::Value> = Vec::with_capacity(update.changes().len() + 1);

        for change in update.changes() {
            set_clauses.push(format!("{} = ?{}", change.field_name(), values.len() + 1));
            values.push(column_value(change)?);
        }
        values.push(rusqlite::types::Value::Text(id.to_string()));

        let sql = format!(
            "UPDATE candidates SET {} WHERE id = ?{}",
            set_clauses.join(", "),
            values.len()
        );

        let changed = self
            .with_conn(move |conn| Ok(conn.execute(&sql, params_from_iter(values))?))
            .await?;

        if changed == 0 {
            return Err(StorageError::CandidateNotFound(id.to_string()));
        }

        tracing::info!(
            candidate_id = %id,
            fields = ?update.field_names(),
            "Updated candidate"
        );
        Ok(())
    }

    /// Delete a candidate
    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        let owned = id.to_string();
        let deleted = self
            .with_conn(move |conn| {
                Ok(conn.execute("DELETE FROM candidates WHERE id = ?1", params![owned])?)
            })
            .await?;

        if deleted == 0 {
            return Err(StorageError::CandidateNotFound(id.to_string()));
        }

        tracing::info!(candidate_id = %id, "Deleted candidate");
        Ok(())
    }

    /// Number of stored candidates
    pub async fn count(&self) -> StorageResult<u64> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM candidates", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
    }
}

/// Convert one change into the value bound for its column
fn column_value(change: &FieldUpdate) -> StorageResult<rusqlite::types::Value> {
    use rusqlite::types::Value;

    Ok(match change {
        FieldUpdate::Text(_, text) => Value::Text(text.clone()),
        FieldUpdate::Ratings(ratings) if ratings.is_empty() => Value::Null,
        FieldUpdate::Ratings(ratings) => Value::Text(serde_json::to_string(ratings)?),
        FieldUpdate::Consented(consented) => Value::Integer(i64::from(*consented)),
        FieldUpdate::ConsentDate(Some(date)) => Value::Text(format_timestamp(date)),
        FieldUpdate::ConsentDate(None) => Value::Null,
    })
}

/// Undecoded row, so SQLite errors and decode errors stay separate
struct RawCandidate {
    id: String,
    created_at: String,
    consented: i64,
    consent_date: Option<String>,
    self_reflection: Option<String>,
    reflection_consistency: Option<String>,
    ratings: Option<String>,
    conclusion: Option<String>,
    notes: Option<String>,
    star_notes: Option<String>,
    vesier_notes: Option<String>,
}

impl RawCandidate {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            created_at: row.get(1)?,
            consented: row.get(2)?,
            consent_date: row.get(3)?,
            self_reflection: row.get(4)?,
            reflection_consistency: row.get(5)?,
            ratings: row.get(6)?,
            conclusion: row.get(7)?,
            notes: row.get(8)?,
            star_notes: row.get(9)?,
            vesier_notes: row.get(10)?,
        })
    }

    fn into_candidate(self) -> StorageResult<Candidate> {
        let corrupt = |reason: String| StorageError::Corruption {
            id: self.id.clone(),
            reason,
        };

        let created_at = parse_timestamp(&self.created_at)
            .ok_or_else(|| corrupt(format!("invalid created_at '{}'", self.created_at)))?;

        let consent_date = match self.consent_date.as_deref() {
            None | Some("") => None,
            Some(s) => Some(
                parse_timestamp(s).ok_or_else(|| corrupt(format!("invalid consent_date '{}'", s)))?,
            ),
        };

        let ratings = match self.ratings.as_deref() {
            None | Some("") | Some("null") => Ratings::new(),
            Some(json) => serde_json::from_str::<serde_json::Value>(json)
                .map_err(|e| e.to_string())
                .and_then(|value| Ratings::from_json(&value))
                .map_err(|e| corrupt(format!("invalid ratings: {}", e)))?,
        };

        Ok(Candidate {
            created_at,
            consented: self.consented != 0,
            consent_date,
            self_reflection: self.self_reflection.unwrap_or_default(),
            reflection_consistency: self.reflection_consistency.unwrap_or_default(),
            ratings,
            conclusion: self.conclusion.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            star_notes: self.star_notes.unwrap_or_default(),
            vesier_notes: self.vesier_notes.unwrap_or_default(),
            id: self.id,
        })
    }
}
