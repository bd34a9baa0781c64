pub mod error;
pub mod model;

pub use error::AppError;
pub use model::{
    CompletionResult, DownloadRequestHandle, DownloadStatus, DownloadTarget, NotificationPayload,
    RequestId, TargetId, DOWNLOAD_TARGETS,
};
