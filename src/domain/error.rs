use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Please select the file to download")]
    NoSelection,

    #[error("Download service error: {0}")]
    Service(String),
}
