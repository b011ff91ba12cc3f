use thiserror::Error;

pub type Result<T> = std::result::Result<T, UtilError>;

#[derive(Error, Debug)]
pub enum UtilError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unavailable decimation: ratio = {ratio}")]
    UnavailableDecimation { ratio: u32 },

    #[error("Timestamp parsing error: {0}")]
    TimestampParse(#[from] chrono::ParseError),

    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(f64),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
