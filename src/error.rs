use thiserror::Error;

#[derive(Debug, Error)]
pub enum VinlyError {
    #[error("failed to parse catalog snapshot: {0}")]
    Catalog(#[source] serde_json::Error),
    #[error("invalid configuration in local storage: {0}")]
    Config(#[source] serde_json::Error),
    #[error("local storage is not available")]
    StorageUnavailable,
}

pub type Result<T> = std::result::Result<T, VinlyError>;
