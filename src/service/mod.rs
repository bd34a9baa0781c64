pub mod manager;
pub mod models;

pub use manager::{DownloadManager, ServiceError};
pub use models::{DownloadQueryRow, DownloadRequest};
