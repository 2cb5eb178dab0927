/// Errors from journal discovery and reading.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("home directory not available")]
    NoHomeDir,
}
