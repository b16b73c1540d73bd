#[derive(Debug, thiserror::Error)]
pub enum SalesError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingField(String),

    #[error("Malformed sales records: {count} row(s) have an unparseable date, empty field or invalid amount")]
    MalformedRecords { count: i64 },

    #[error("Unsupported data source: {0}")]
    UnsupportedSource(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, SalesError>;
