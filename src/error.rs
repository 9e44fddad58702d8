use thiserror::Error;

/// Error taxonomy for the browser.
///
/// Load and config failures originate in our own plumbing; query failures
/// carry the engine's diagnostic text verbatim so the operator sees exactly
/// what SQLite rejected.
#[derive(Debug, Error)]
pub enum MadangError {
    #[error("failed to load '{file}': {reason}")]
    Load { file: String, reason: String },

    #[error("{0}")]
    Query(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for MadangError {
    fn from(e: rusqlite::Error) -> Self {
        MadangError::Query(e.to_string())
    }
}
