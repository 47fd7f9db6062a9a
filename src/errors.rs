// errors.rs
use thiserror::Error;

/// Errors that end a run: local storage, filesystem, configuration and
/// interactive input. Remote failures are handled inside `crate::remote`
/// and never surface here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("Viewer error: {0}")]
    Viewer(String),
}
