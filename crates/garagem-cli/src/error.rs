use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] garagem_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Car ID cannot be empty")]
    EmptyCarId,
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("Provide --image or --image-url for a new car")]
    MissingImage,
    #[error("Image storage is not configured; set the GARAGEM_STORAGE_* variables or pass --image-url")]
    StorageNotConfigured,
}
