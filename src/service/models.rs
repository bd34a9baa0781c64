use crate::domain::DownloadStatus;

/// A download request handed to the download manager.
///
/// The transfer-policy flags mirror the request surface of a mobile download
/// service; the desktop manager records them but has no metered/roaming or
/// charging notion to enforce.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub title: String,
    pub description: String,
    pub allow_metered: bool,
    pub allow_roaming: bool,
    pub require_charging: bool,
}

impl DownloadRequest {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: description.into(),
            allow_metered: false,
            allow_roaming: false,
            require_charging: false,
        }
    }

    pub fn allow_metered(mut self, allowed: bool) -> Self {
        self.allow_metered = allowed;
        self
    }

    pub fn allow_roaming(mut self, allowed: bool) -> Self {
        self.allow_roaming = allowed;
        self
    }

    pub fn require_charging(mut self, required: bool) -> Self {
        self.require_charging = required;
        self
    }
}

/// Row returned by a status query against the download manager.
#[derive(Debug, Clone)]
pub struct DownloadQueryRow {
    pub status: DownloadStatus,
    pub description: String,
}

/// Internal per-download bookkeeping.
#[derive(Debug, Clone)]
pub(crate) struct DownloadRecord {
    pub(crate) request: DownloadRequest,
    pub(crate) status: RecordStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordStatus {
    Running,
    Success,
    Failure,
}

impl RecordStatus {
    pub(crate) fn as_download_status(self) -> DownloadStatus {
        match self {
            RecordStatus::Success => DownloadStatus::Success,
            RecordStatus::Failure => DownloadStatus::Failure,
            RecordStatus::Running => DownloadStatus::Unknown,
        }
    }
}
