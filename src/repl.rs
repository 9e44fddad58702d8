//! Interactive session: a flat three-way mode switch over the executor.
//!
//! The three modes are mutually exclusive and any mode is reachable from
//! any other with one meta-command. Loading happens once, before the first
//! prompt; switching modes never reloads.
//!
//! Error containment follows the source of the failure: operator-typed SQL
//! in freeform mode is caught and rendered inline, while a failure in a
//! bundled catalog query or in the loader indicates a defect and is allowed
//! to escalate out of the session.

use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{
    catalog,
    commands::MetaCommand,
    executor::SqlExecutor,
    formatter::{OutputFormat, ResultFormatter},
    loader,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    BrowseTables,
    RunCatalogQuery,
    RunFreeformQuery,
}

pub struct Repl {
    executor: SqlExecutor,
    editor: DefaultEditor,
    formatter: ResultFormatter,
    mode: Mode,
    history_file: Option<String>,
}

impl Repl {
    pub fn new(
        executor: SqlExecutor,
        format: Option<OutputFormat>,
        history_file: Option<String>,
    ) -> anyhow::Result<Self> {
        let editor = DefaultEditor::new()?;
        let mut formatter = ResultFormatter::new();

        if let Some(fmt) = format {
            formatter.set_format(fmt);
        }

        Ok(Repl {
            executor,
            editor,
            formatter,
            mode: Mode::RunFreeformQuery,
            history_file,
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        if let Some(ref path) = self.history_file {
            let _ = self.editor.load_history(path);
        }

        self.print_banner();
        self.print_mode_banner();

        loop {
            let prompt = match self.mode {
                Mode::BrowseTables => "madang:browse> ",
                Mode::RunCatalogQuery => "madang:catalog> ",
                Mode::RunFreeformQuery => "madang> ",
            };
            match self.editor.readline(prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(line.as_str());

                    if let Some(meta_cmd) = MetaCommand::parse(&line) {
                        if self.handle_meta_command(meta_cmd)? {
                            break;
                        }
                    } else {
                        match self.mode {
                            Mode::BrowseTables => self.handle_browse_input(line.trim())?,
                            Mode::RunCatalogQuery => self.handle_catalog_input(line.trim())?,
                            Mode::RunFreeformQuery => self.handle_freeform_input(&line),
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("\\quit");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_file {
            let _ = self.editor.save_history(path);
        }

        self.print_goodbye();
        Ok(())
    }

    /// Returns Ok(true) when the session should end.
    fn handle_meta_command(&mut self, cmd: MetaCommand) -> anyhow::Result<bool> {
        match cmd {
            MetaCommand::Quit => {
                return Ok(true);
            }
            MetaCommand::Help => {
                self.print_help();
            }
            MetaCommand::Browse(table) => {
                self.mode = Mode::BrowseTables;
                match table {
                    Some(name) => self.handle_browse_input(&name)?,
                    None => self.print_mode_banner(),
                }
            }
            MetaCommand::Catalog(entry) => {
                self.mode = Mode::RunCatalogQuery;
                match entry {
                    Some(number) => self.run_catalog_entry(number)?,
                    None => self.print_mode_banner(),
                }
            }
            MetaCommand::Freeform => {
                self.mode = Mode::RunFreeformQuery;
                self.print_mode_banner();
            }
            MetaCommand::DescribeTable(table_name) => {
                match self.executor.describe_table(&table_name) {
                    Ok(result) => self.formatter.print_result(&result),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            MetaCommand::ListTables => match self.executor.list_tables() {
                Ok(result) => self.formatter.print_result(&result),
                Err(e) => eprintln!("Error: {}", e),
            },
            MetaCommand::SetFormat(format) => {
                self.formatter.set_format(format);
                let format_name = match format {
                    OutputFormat::Table => "table",
                    OutputFormat::Json => "json",
                    OutputFormat::Csv => "csv",
                };
                println!("Output format set to: {}", format_name);
            }
            MetaCommand::Timing => {
                let state = if self.executor.toggle_timing() { "on" } else { "off" };
                println!("Timing is {}", state);
            }
            MetaCommand::Reload => {
                // A reload failure is a load failure: fatal, no fallback.
                let report = self.executor.reload()?;
                for t in &report.tables {
                    println!("Reloaded {} ({} rows)", t.table, t.rows);
                }
            }
        }
        Ok(false)
    }

    /// Browse mode: the input line names one of the three base tables.
    fn handle_browse_input(&mut self, name: &str) -> anyhow::Result<()> {
        if !loader::TABLES.iter().any(|(table, _)| *table == name) {
            let choices: Vec<&str> = loader::TABLES.iter().map(|(table, _)| *table).collect();
            eprintln!("Unknown table '{}'. Choose one of: {}", name, choices.join(", "));
            return Ok(());
        }

        // Name is validated against the fixed table set, so splicing is safe.
        let result = self
            .executor
            .execute(&format!("SELECT * FROM {}", name))
            .map_err(|e| anyhow::anyhow!("browsing table '{}' failed: {}", name, e))?;
        self.formatter.print_result(&result);
        Ok(())
    }

    /// Catalog mode: the input line is a 1-based entry number.
    fn handle_catalog_input(&mut self, input: &str) -> anyhow::Result<()> {
        match input.parse::<usize>() {
            Ok(number) => self.run_catalog_entry(number),
            Err(_) => {
                eprintln!(
                    "Type an entry number between 1 and {} (or \\catalog to list them)",
                    catalog::entries().len()
                );
                Ok(())
            }
        }
    }

    fn run_catalog_entry(&mut self, number: usize) -> anyhow::Result<()> {
        let Some(entry) = catalog::get(number) else {
            eprintln!(
                "No catalog entry {}. Valid entries: 1..{}",
                number,
                catalog::entries().len()
            );
            return Ok(());
        };

        println!("{}. {}", number, entry.label);
        println!("{}", entry.description);
        println!("\n{}\n", entry.sql);

        // A failure here is a defect in the bundled catalog itself, so it
        // escalates instead of being treated as routine.
        let result = self
            .executor
            .execute(entry.sql)
            .map_err(|e| anyhow::anyhow!("catalog entry {} failed: {}", number, e))?;
        self.formatter.print_result(&result);
        Ok(())
    }

    /// Freeform mode: the input line is SQL, executed on Enter. Failures
    /// are routine here; render them inline and keep the session alive.
    fn handle_freeform_input(&mut self, sql: &str) {
        match self.executor.execute(sql) {
            Ok(result) => {
                println!("Query OK.");
                self.formatter.print_result(&result);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
    }

    fn print_banner(&self) {
        println!("Madang data browser v{}", env!("CARGO_PKG_VERSION"));
        let loaded: Vec<String> = self
            .executor
            .load_report()
            .tables
            .iter()
            .map(|t| format!("{} ({} rows)", t.table, t.rows))
            .collect();
        println!("Loaded from {}: {}", self.executor.data_dir().display(), loaded.join(", "));
        println!("Type \\help for help, \\quit to exit\n");
    }

    fn print_mode_banner(&self) {
        match self.mode {
            Mode::BrowseTables => {
                let choices: Vec<&str> = loader::TABLES.iter().map(|(table, _)| *table).collect();
                println!("Browse mode. Type a table name to view it: {}", choices.join(", "));
            }
            Mode::RunCatalogQuery => {
                println!("Catalog mode. Type an entry number to run it:");
                for (i, entry) in catalog::entries().iter().enumerate() {
                    println!("  {}. {}", i + 1, entry.label);
                    println!("     {}", entry.description);
                }
            }
            Mode::RunFreeformQuery => {
                println!("SQL mode. Enter a statement to run it, e.g.: SELECT * FROM book LIMIT 5;");
            }
        }
    }

    fn print_goodbye(&self) {
        println!("Goodbye!");
    }

    fn print_help(&self) {
        println!(
            "
Meta-commands:
  \\browse [table] - Switch to browse mode (optionally show a table)
  \\catalog [n]    - Switch to catalog mode (optionally run entry n)
  \\sql            - Switch to freeform SQL mode
  \\d [table]      - Describe table or list all tables
  \\dt             - List tables
  \\f <format>     - Set output format (table, json, csv)
  \\timing         - Toggle query timing
  \\reload         - Reload the three CSV files
  \\h, \\help      - Show this help
  \\q, \\quit      - Exit

Modes:
  browse  - type a table name (book, customer, orders) to dump it
  catalog - type an entry number to run a bundled analysis
  sql     - type any SQL statement to run it against the loaded tables
"
        );
    }
}
