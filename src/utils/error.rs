// src/utils/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid filing type: {0}")]
    InvalidFilingType(String),

    #[error("Invalid section pattern: {0}")]
    InvalidPattern(String),

    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
