use std::path::{Path, PathBuf};

use rusqlite::{Connection, params, params_from_iter};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::query::{SearchOutcome, UrlFilter};

/// A single stored URL within a target namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub url: String,
    pub visited: bool,
    pub scope: bool,
}

impl UrlRecord {
    pub fn new(url: impl Into<String>, visited: bool, scope: bool) -> Self {
        UrlRecord {
            url: url.into(),
            visited,
            scope,
        }
    }
}

/// Per-target URL persistence over a single SQLite file.
///
/// Namespaces are realized as a `target_id` column with a
/// `UNIQUE(target_id, url)` constraint, so one record exists per distinct
/// URL per target and re-inserts overwrite the `visited`/`scope` flags.
/// Every operation opens its own connection and drops it on return;
/// no handle outlives the call that acquired it.
pub struct UrlStore {
    db_path: PathBuf,
}

impl UrlStore {
    /// Open (or create) the store at the given path and ensure the schema
    /// exists. Fails early on unwritable locations.
    pub fn open(path: &Path) -> Result<Self> {
        let store = UrlStore {
            db_path: path.to_path_buf(),
        };
        store.connect()?;
        Ok(store)
    }

    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            ",
        )?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS urls (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                target_id TEXT NOT NULL,
                url TEXT NOT NULL,
                visited INTEGER NOT NULL DEFAULT 0,
                scope INTEGER NOT NULL DEFAULT 0,
                UNIQUE(target_id, url)
            );

            CREATE INDEX IF NOT EXISTS idx_urls_target ON urls(target_id);
            CREATE INDEX IF NOT EXISTS idx_urls_visited ON urls(target_id, visited);
            ",
        )?;

        Ok(conn)
    }

    /// Total number of records in the target's namespace.
    pub fn count_all(&self, target: &str) -> Result<u64> {
        let conn = self.connect()?;
        count_in(&conn, target)
    }

    /// Insert-or-overwrite a single record, committed per call.
    pub fn upsert(&self, target: &str, url: &str, visited: bool, scope: bool) -> Result<()> {
        let conn = self.connect()?;
        merge(&conn, target, url, visited, scope)
    }

    /// Apply upsert semantics for an ordered record sequence within one
    /// transaction.
    pub fn bulk_upsert(&self, target: &str, records: &[UrlRecord]) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        for record in records {
            merge(&tx, target, &record.url, record.visited, record.scope)?;
            debug!(target, url = %record.url, "merged record");
        }
        tx.commit()?;
        Ok(())
    }

    /// Merge a validated URL list as unvisited records with default scope
    /// and report how many rows are new. The before/after counts live
    /// inside the same write transaction, so concurrent writers cannot
    /// skew this call's delta.
    pub fn import_batch(&self, target: &str, urls: &[String]) -> Result<u64> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let before = count_in(&tx, target)?;
        for url in urls {
            merge(&tx, target, url, false, false)?;
        }
        let after = count_in(&tx, target)?;
        tx.commit()?;
        Ok(after - before)
    }

    /// All URLs not yet processed by upstream scanning logic, in discovery
    /// order.
    pub fn unvisited(&self, target: &str) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT url FROM urls WHERE target_id = ?1 AND visited = 0 ORDER BY id")?;
        let urls = stmt
            .query_map(params![target], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(urls)
    }

    /// Filtered, paginated records as plain structs; no live handle escapes.
    pub fn get_all(&self, target: &str, filter: &UrlFilter) -> Result<Vec<UrlRecord>> {
        let conn = self.connect()?;
        fetch_filtered(&conn, target, filter)
    }

    /// The server-driven table contract: unfiltered total, filtered count
    /// ignoring pagination, and one page of matching records.
    pub fn search_all(&self, target: &str, filter: &UrlFilter) -> Result<SearchOutcome> {
        let conn = self.connect()?;
        let records_total = count_in(&conn, target)?;
        let records_filtered = count_filtered(&conn, target, filter)?;
        let data = fetch_filtered(&conn, target, filter)?;
        Ok(SearchOutcome {
            records_total,
            records_filtered,
            data,
        })
    }
}

fn merge(conn: &Connection, target: &str, url: &str, visited: bool, scope: bool) -> Result<()> {
    conn.execute(
        "INSERT INTO urls (target_id, url, visited, scope) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(target_id, url) DO UPDATE SET
             visited = excluded.visited,
             scope = excluded.scope",
        params![target, url, visited, scope],
    )?;
    Ok(())
}

fn count_in(conn: &Connection, target: &str) -> Result<u64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM urls WHERE target_id = ?1",
        params![target],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn count_filtered(conn: &Connection, target: &str, filter: &UrlFilter) -> Result<u64> {
    let plan = filter.plan(true);
    let sql = format!(
        "SELECT COUNT(*) FROM urls WHERE target_id = ?1{}",
        plan.where_sql
    );
    let mut bind: Vec<Value> = vec![Value::from(target.to_string())];
    bind.extend(plan.params);
    let count = conn.query_row(&sql, params_from_iter(bind), |row| row.get(0))?;
    Ok(count)
}

fn fetch_filtered(conn: &Connection, target: &str, filter: &UrlFilter) -> Result<Vec<UrlRecord>> {
    let plan = filter.plan(false);
    let sql = format!(
        "SELECT url, visited, scope FROM urls WHERE target_id = ?1{} ORDER BY id{}",
        plan.where_sql, plan.tail_sql
    );
    let mut bind: Vec<Value> = vec![Value::from(target.to_string())];
    bind.extend(plan.params);
    let mut stmt = conn.prepare(&sql)?;
    let records = stmt
        .query_map(params_from_iter(bind), |row| {
            Ok(UrlRecord {
                url: row.get(0)?,
                visited: row.get(1)?,
                scope: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}
