//! Madang data browser.
//!
//! Loads the three Madang bookstore CSV files (book, customer, orders) into
//! an in-memory SQLite database and exposes an interactive session with
//! three modes: browse the raw tables, run one of the bundled analyses, or
//! run freeform SQL against the loaded data.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod formatter;
pub mod loader;
pub mod repl;
pub mod script;

pub use error::MadangError;
pub use executor::{QueryResult, SqlExecutor};
pub use loader::LoadReport;
