use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Schema mismatch in table '{table}': {detail}")]
    SchemaMismatch { table: String, detail: String },

    #[error("Unsupported payload version: expected {expected}, got {found}")]
    PayloadVersion { expected: u32, found: u32 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
