use thiserror::Error;

/// Faults that end a session outright
#[derive(Error, Debug)]
pub enum AtmError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input closed")]
    InputClosed,
    #[error("Expected a number, got {0:?}")]
    InvalidNumber(String),
    #[error("Config error: {0}")]
    Config(String),
}
