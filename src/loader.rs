//! Dataset loader: the three Madang CSV files become three SQLite tables.
//!
//! Each file's header row names the columns verbatim; column types are
//! inferred from the data (INTEGER if every non-empty value parses as an
//! integer, REAL if every non-empty value parses as a float, TEXT
//! otherwise). Empty fields load as NULL.
//!
//! Loading has replace semantics: each table is dropped and recreated
//! inside its own transaction, so re-invoking the loader is idempotent.
//! A missing or malformed file aborts that table's load and rolls the
//! transaction back; there is no partial fallback.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use rusqlite::{params_from_iter, types::Value, Connection};
use tracing::debug;

use crate::error::MadangError;

pub const BOOK_CSV: &str = "Book_madang.csv";
pub const CUSTOMER_CSV: &str = "Customer_madang.csv";
pub const ORDERS_CSV: &str = "Orders_madang.csv";

/// (table name, file name) pairs, in load order.
pub const TABLES: [(&str, &str); 3] = [
    ("book", BOOK_CSV),
    ("customer", CUSTOMER_CSV),
    ("orders", ORDERS_CSV),
];

/// Per-table row counts from a completed load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub tables: Vec<TableLoad>,
}

#[derive(Debug, Clone)]
pub struct TableLoad {
    pub table: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    fn sql_name(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

/// Load all three base tables from `base_dir`.
pub fn load_dataset(conn: &mut Connection, base_dir: &Path) -> Result<LoadReport, MadangError> {
    let mut report = LoadReport::default();
    for (table, file) in TABLES {
        let rows = load_table(conn, table, &base_dir.join(file))?;
        debug!(table, rows, "loaded table");
        report.tables.push(TableLoad { table: table.to_string(), rows });
    }
    Ok(report)
}

/// Load one CSV file into `table`, replacing any previous contents.
pub fn load_table(conn: &mut Connection, table: &str, path: &Path) -> Result<usize, MadangError> {
    let file = path.display().to_string();
    let load_err = |reason: String| MadangError::Load { file: file.clone(), reason };

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| load_err(e.to_string()))?;

    let headers: Vec<String> =
        reader.headers().map_err(|e| load_err(e.to_string()))?.iter().map(String::from).collect();
    if headers.is_empty() {
        return Err(load_err("file has no header row".to_string()));
    }

    let mut records: Vec<StringRecord> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| load_err(format!("row {}: {}", idx + 2, e)))?;
        if record.len() != headers.len() {
            return Err(load_err(format!(
                "row {} has {} fields, expected {}",
                idx + 2,
                record.len(),
                headers.len()
            )));
        }
        records.push(record);
    }

    let types: Vec<ColumnType> = (0..headers.len())
        .map(|col| infer_column_type(records.iter().map(|r| &r[col])))
        .collect();

    let column_defs = headers
        .iter()
        .zip(&types)
        .map(|(name, ty)| format!("{} {}", quote_ident(name), ty.sql_name()))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; headers.len()].join(", ");

    // Drop, recreate and repopulate atomically so a failed load never
    // leaves a half-filled table behind.
    let tx = conn.transaction().map_err(|e| load_err(e.to_string()))?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {table}; CREATE TABLE {table} ({defs});",
        table = quote_ident(table),
        defs = column_defs,
    ))
    .map_err(|e| load_err(e.to_string()))?;

    {
        let insert_sql =
            format!("INSERT INTO {} VALUES ({})", quote_ident(table), placeholders);
        let mut stmt = tx.prepare(&insert_sql).map_err(|e| load_err(e.to_string()))?;
        for record in &records {
            let values = record.iter().zip(&types).map(|(field, ty)| to_value(field, *ty));
            stmt.execute(params_from_iter(values))
                .map_err(|e| load_err(e.to_string()))?;
        }
    }

    tx.commit().map_err(|e| load_err(e.to_string()))?;
    Ok(records.len())
}

/// Pick the narrowest SQLite type that every non-empty value fits.
fn infer_column_type<'a>(values: impl Iterator<Item = &'a str>) -> ColumnType {
    let mut ty = ColumnType::Integer;
    let mut saw_value = false;
    for v in values {
        if v.is_empty() {
            continue;
        }
        saw_value = true;
        if ty == ColumnType::Integer && v.parse::<i64>().is_err() {
            ty = ColumnType::Real;
        }
        if ty == ColumnType::Real && v.parse::<f64>().is_err() {
            return ColumnType::Text;
        }
    }
    if saw_value {
        ty
    } else {
        ColumnType::Text
    }
}

fn to_value(field: &str, ty: ColumnType) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    match ty {
        ColumnType::Integer => field
            .parse::<i64>()
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::Text(field.to_string())),
        ColumnType::Real => field
            .parse::<f64>()
            .map(Value::Real)
            .unwrap_or_else(|_| Value::Text(field.to_string())),
        ColumnType::Text => Value::Text(field.to_string()),
    }
}

/// Double-quote an identifier so arbitrary CSV headers are accepted.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
