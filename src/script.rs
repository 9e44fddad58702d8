//! One-shot and scripted execution for -c, -f and piped stdin.
//!
//! These paths run trusted input, so the first failure stops the run and
//! propagates (catalog-style escalation, not freeform containment).

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use crate::{
    executor::SqlExecutor,
    formatter::{OutputFormat, ResultFormatter},
};

pub struct ScriptExecutor {
    executor: SqlExecutor,
    formatter: ResultFormatter,
    verbose: bool,
}

impl ScriptExecutor {
    pub fn new(
        executor: SqlExecutor,
        verbose: bool,
        format: Option<OutputFormat>,
    ) -> Self {
        let mut formatter = ResultFormatter::new();

        if let Some(fmt) = format {
            formatter.set_format(fmt);
        }

        ScriptExecutor { executor, formatter, verbose }
    }

    /// Execute SQL from a file.
    pub fn execute_file(&mut self, file_path: &Path) -> anyhow::Result<()> {
        let contents = fs::read_to_string(file_path).map_err(|e| {
            anyhow::anyhow!("Failed to read file '{}': {}", file_path.display(), e)
        })?;
        self.execute_script(&contents)
    }

    /// Execute SQL read from stdin.
    pub fn execute_stdin(&mut self) -> anyhow::Result<()> {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        self.execute_script(&contents)
    }

    /// Execute one or more statements, stopping on the first error.
    pub fn execute_script(&mut self, sql: &str) -> anyhow::Result<()> {
        for statement in split_statements(sql) {
            if self.verbose {
                println!("{};", statement);
            }
            let result = self
                .executor
                .execute(statement)
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            self.formatter.print_result(&result);
        }
        Ok(())
    }
}

/// Split a script on semicolons, dropping blanks and comment-only chunks.
/// Semicolons inside string literals are not handled; scripts are trusted
/// input here.
fn split_statements(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.lines().all(|l| l.trim().starts_with("--") || l.trim().is_empty()))
        .collect()
}
