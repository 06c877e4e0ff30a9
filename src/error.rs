use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Store Error: {0}")]
    Store(String),

    #[error("Health data access is not authorized")]
    Unauthorized,
}

pub type PickerResult<T> = Result<T, PickerError>;
