use crate::formatter::OutputFormat;

#[derive(Debug, Clone)]
pub enum MetaCommand {
    Quit,
    Help,
    /// Switch to browse mode, optionally showing a table right away.
    Browse(Option<String>),
    /// Switch to catalog mode, optionally running an entry right away.
    Catalog(Option<usize>),
    /// Switch to freeform SQL mode.
    Freeform,
    DescribeTable(String),
    ListTables,
    SetFormat(OutputFormat),
    Timing,
    Reload,
}

impl MetaCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();

        if !trimmed.starts_with('\\') {
            return None;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        match parts.first() {
            Some(&"\\q") | Some(&"\\quit") => Some(MetaCommand::Quit),
            Some(&"\\h") | Some(&"\\help") => Some(MetaCommand::Help),
            Some(&"\\browse") | Some(&"\\b") => {
                Some(MetaCommand::Browse(parts.get(1).map(|t| t.to_string())))
            }
            Some(&"\\catalog") | Some(&"\\c") => match parts.get(1) {
                Some(n) => n.parse::<usize>().ok().map(|n| MetaCommand::Catalog(Some(n))),
                None => Some(MetaCommand::Catalog(None)),
            },
            Some(&"\\sql") | Some(&"\\s") => Some(MetaCommand::Freeform),
            Some(&"\\d") => {
                if let Some(table_name) = parts.get(1) {
                    Some(MetaCommand::DescribeTable(table_name.to_string()))
                } else {
                    Some(MetaCommand::ListTables)
                }
            }
            Some(&"\\dt") => Some(MetaCommand::ListTables),
            Some(&"\\f") => {
                if let Some(format_str) = parts.get(1) {
                    match *format_str {
                        "table" => Some(MetaCommand::SetFormat(OutputFormat::Table)),
                        "json" => Some(MetaCommand::SetFormat(OutputFormat::Json)),
                        "csv" => Some(MetaCommand::SetFormat(OutputFormat::Csv)),
                        _ => None,
                    }
                } else {
                    None
                }
            }
            Some(&"\\timing") => Some(MetaCommand::Timing),
            Some(&"\\reload") => Some(MetaCommand::Reload),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit() {
        assert!(matches!(MetaCommand::parse("\\q"), Some(MetaCommand::Quit)));
        assert!(matches!(MetaCommand::parse("\\quit"), Some(MetaCommand::Quit)));
    }

    #[test]
    fn test_parse_help() {
        assert!(matches!(MetaCommand::parse("\\h"), Some(MetaCommand::Help)));
        assert!(matches!(MetaCommand::parse("\\help"), Some(MetaCommand::Help)));
    }

    #[test]
    fn test_parse_browse() {
        assert!(matches!(MetaCommand::parse("\\browse"), Some(MetaCommand::Browse(None))));
        if let Some(MetaCommand::Browse(Some(table))) = MetaCommand::parse("\\browse book") {
            assert_eq!(table, "book");
        } else {
            panic!("Failed to parse browse command with table");
        }
    }

    #[test]
    fn test_parse_catalog() {
        assert!(matches!(MetaCommand::parse("\\catalog"), Some(MetaCommand::Catalog(None))));
        assert!(matches!(MetaCommand::parse("\\catalog 2"), Some(MetaCommand::Catalog(Some(2)))));
        assert!(MetaCommand::parse("\\catalog two").is_none());
    }

    #[test]
    fn test_parse_freeform() {
        assert!(matches!(MetaCommand::parse("\\sql"), Some(MetaCommand::Freeform)));
        assert!(matches!(MetaCommand::parse("\\s"), Some(MetaCommand::Freeform)));
    }

    #[test]
    fn test_parse_list_tables() {
        assert!(matches!(MetaCommand::parse("\\d"), Some(MetaCommand::ListTables)));
        assert!(matches!(MetaCommand::parse("\\dt"), Some(MetaCommand::ListTables)));
    }

    #[test]
    fn test_parse_describe_table() {
        if let Some(MetaCommand::DescribeTable(name)) = MetaCommand::parse("\\d orders") {
            assert_eq!(name, "orders");
        } else {
            panic!("Failed to parse describe table command");
        }
    }

    #[test]
    fn test_parse_set_format() {
        assert!(matches!(
            MetaCommand::parse("\\f table"),
            Some(MetaCommand::SetFormat(OutputFormat::Table))
        ));
        assert!(matches!(
            MetaCommand::parse("\\f json"),
            Some(MetaCommand::SetFormat(OutputFormat::Json))
        ));
        assert!(matches!(
            MetaCommand::parse("\\f csv"),
            Some(MetaCommand::SetFormat(OutputFormat::Csv))
        ));
        assert!(MetaCommand::parse("\\f yaml").is_none());
    }

    #[test]
    fn test_parse_timing() {
        assert!(matches!(MetaCommand::parse("\\timing"), Some(MetaCommand::Timing)));
    }

    #[test]
    fn test_parse_reload() {
        assert!(matches!(MetaCommand::parse("\\reload"), Some(MetaCommand::Reload)));
    }

    #[test]
    fn test_non_meta_command() {
        assert!(MetaCommand::parse("SELECT * FROM book").is_none());
        assert!(MetaCommand::parse("book").is_none());
    }
}
