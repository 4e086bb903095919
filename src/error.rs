use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid date pattern: {0:?}")]
    InvalidDatePattern(String),

    #[error("invalid start date {0:?}, expected YYYY-MM-DD")]
    InvalidStartDate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
