//! Query executor: owns the session's single SQLite connection.
//!
//! The connection is created once, the dataset is loaded eagerly, and
//! everything downstream (REPL modes, scripts, meta-commands) goes through
//! `execute`. Results are fully materialized as strings for rendering.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use rusqlite::{types::ValueRef, Connection};
use tracing::debug;

use crate::{
    error::MadangError,
    loader::{self, LoadReport},
};

pub struct SqlExecutor {
    conn: Connection,
    data_dir: PathBuf,
    report: LoadReport,
    timing_enabled: bool,
}

/// A fully materialized result set. NULL renders as an empty string.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
    pub execution_time_ms: Option<f64>,
}

impl SqlExecutor {
    /// Open an in-memory database and load the three base tables from
    /// `data_dir`. A load failure here is fatal to the session.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, MadangError> {
        let data_dir = data_dir.into();
        let mut conn = Connection::open_in_memory()
            .map_err(|e| MadangError::Query(e.to_string()))?;
        let report = loader::load_dataset(&mut conn, &data_dir)?;
        Ok(SqlExecutor { conn, data_dir, report, timing_enabled: false })
    }

    /// Row counts from the most recent load.
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Re-run the loader against the same directory. Replace semantics in
    /// the loader make this idempotent.
    pub fn reload(&mut self) -> Result<&LoadReport, MadangError> {
        let dir = self.data_dir.clone();
        self.report = loader::load_dataset(&mut self.conn, &dir)?;
        Ok(&self.report)
    }

    /// Execute one SQL statement and materialize the full result set.
    ///
    /// Any engine rejection comes back as `MadangError::Query` carrying the
    /// engine's diagnostic text; the connection and base tables remain
    /// usable afterward. Intentionally permissive: no timeout, no row
    /// limit, no statement allow-list.
    pub fn execute(&mut self, sql: &str) -> Result<QueryResult, MadangError> {
        let start = Instant::now();
        debug!(sql, "executing statement");

        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> =
            stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut out_rows: Vec<Vec<String>> = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut record = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                record.push(render_value(row.get_ref(i)?));
            }
            out_rows.push(record);
        }

        let elapsed = start.elapsed().as_secs_f64() * 1000.0;
        Ok(QueryResult {
            row_count: out_rows.len(),
            columns,
            rows: out_rows,
            execution_time_ms: self.timing_enabled.then_some(elapsed),
        })
    }

    /// All tables currently in the database, as a result set so it renders
    /// through the normal formatter.
    pub fn list_tables(&mut self) -> Result<QueryResult, MadangError> {
        self.execute(
            "SELECT name AS \"table\" FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
    }

    /// Column name/type listing for one table.
    pub fn describe_table(&mut self, table: &str) -> Result<QueryResult, MadangError> {
        // PRAGMA does not take bind parameters, so confirm the table exists
        // before splicing its name in.
        let exists: bool = self
            .conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )?;
        if !exists {
            return Err(MadangError::Query(format!("no such table: {table}")));
        }
        self.execute(&format!(
            "SELECT name, type FROM pragma_table_info('{}')",
            table.replace('\'', "''")
        ))
    }

    pub fn toggle_timing(&mut self) -> bool {
        self.timing_enabled = !self.timing_enabled;
        self.timing_enabled
    }
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(ValueRef::Null), "");
        assert_eq!(render_value(ValueRef::Integer(42)), "42");
        assert_eq!(render_value(ValueRef::Real(2.5)), "2.5");
        assert_eq!(render_value(ValueRef::Text(b"abc")), "abc");
    }
}
