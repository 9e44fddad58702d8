use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use madang::{
    config::Config,
    executor::SqlExecutor,
    formatter::OutputFormat,
    repl::Repl,
    script::ScriptExecutor,
};

#[derive(Parser, Debug)]
#[command(name = "madang")]
#[command(version)]
#[command(about = "Interactive browser for the Madang bookstore dataset")]
#[command(long_about = "Madang data browser

Loads Book_madang.csv, Customer_madang.csv and Orders_madang.csv from the
data directory into an in-memory SQL engine, then offers three modes:
browse the raw tables, run a bundled analysis, or run freeform SQL.

USAGE MODES:
  Interactive session:  madang [--data-dir <DIR>]
  Execute command:      madang -c \"SELECT * FROM book LIMIT 5\"
  Execute file:         madang -f script.sql
  Execute from stdin:   cat queries.sql | madang

CONFIGURATION:
  Settings can be configured in ~/.madangrc (TOML format):
    [display]
    format = \"table\"          # Default output format

    [data]
    dir = \"/srv/madang/csv\"   # Default data directory

    [history]
    file = \"~/.madang_history\"

EXAMPLES:
  # Interactive session over the bundled dataset
  madang

  # Point at another copy of the three CSV files
  madang --data-dir /srv/madang/csv

  # One-shot query as JSON
  madang -c \"SELECT * FROM orders\" --format json")]
struct Args {
    /// Directory containing the three Madang CSV files
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Execute SQL commands from file
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Execute SQL command directly and exit
    #[arg(short, long, value_name = "SQL")]
    command: Option<String>,

    /// Read SQL commands from stdin (auto-detected when piped)
    #[arg(long)]
    stdin: bool,

    /// Echo each statement during file/stdin execution
    #[arg(short, long)]
    verbose: bool,

    /// Output format for query results
    #[arg(long, value_parser = ["table", "json", "csv"], value_name = "FORMAT")]
    format: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Load configuration from ~/.madangrc
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config file: {}", e);
        Config::default()
    });

    // Command-line flags override config, config overrides defaults
    let format =
        args.format.as_deref().and_then(parse_format).or_else(|| config.get_output_format());

    let data_dir = args
        .data_dir
        .or_else(|| config.data.dir.clone().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"));

    // One shared connection per session; a load failure here is fatal.
    let executor = SqlExecutor::new(data_dir)?;

    if let Some(cmd) = args.command {
        let mut script = ScriptExecutor::new(executor, args.verbose, format);
        script.execute_script(&cmd)?;
    } else if let Some(file_path) = args.file {
        let mut script = ScriptExecutor::new(executor, args.verbose, format);
        script.execute_file(&file_path)?;
    } else if args.stdin || is_stdin_piped() {
        let mut script = ScriptExecutor::new(executor, args.verbose, format);
        script.execute_stdin()?;
    } else {
        let mut repl = Repl::new(executor, format, Some(config.history.file.clone()))?;
        repl.run()?;
    }

    Ok(())
}

fn parse_format(format_str: &str) -> Option<OutputFormat> {
    match format_str {
        "table" => Some(OutputFormat::Table),
        "json" => Some(OutputFormat::Json),
        "csv" => Some(OutputFormat::Csv),
        _ => None,
    }
}

fn is_stdin_piped() -> bool {
    // Interactive terminals get the REPL; pipes and files get script mode
    !atty::is(atty::Stream::Stdin)
}
