use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Selector for the built-in download targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetId {
    Glide,
    LoadApp,
    Retrofit,
}

/// A downloadable resource, defined at build time and selected by user input.
#[derive(Debug, Clone, Copy)]
pub struct DownloadTarget {
    pub id: TargetId,
    pub url: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const DOWNLOAD_TARGETS: [DownloadTarget; 3] = [
    DownloadTarget {
        id: TargetId::Glide,
        url: "https://github.com/bumptech/glide/archive/refs/heads/master.zip",
        title: "Glide",
        description: "Glide - Image Loading Library by BumpTech",
    },
    DownloadTarget {
        id: TargetId::LoadApp,
        url: "https://github.com/udacity/nd940-c3-advanced-android-programming-project-starter/archive/refs/heads/master.zip",
        title: "LoadApp",
        description: "LoadApp - Current repository by Udacity",
    },
    DownloadTarget {
        id: TargetId::Retrofit,
        url: "https://github.com/square/retrofit/archive/refs/heads/trunk.zip",
        title: "Retrofit",
        description: "Retrofit - Type-safe HTTP client by Square, Inc",
    },
];

impl DownloadTarget {
    pub fn get(id: TargetId) -> DownloadTarget {
        // The table covers every TargetId variant
        DOWNLOAD_TARGETS
            .iter()
            .copied()
            .find(|target| target.id == id)
            .unwrap_or(DOWNLOAD_TARGETS[0])
    }
}

/// Opaque identifier correlating an enqueue call with its completion event
/// and status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to the single outstanding download request.
///
/// Held by the controller from a successful enqueue until the matching
/// completion event has been consumed; at most one is live at a time.
#[derive(Debug, Clone, Copy)]
pub struct DownloadRequestHandle {
    pub request_id: RequestId,
    pub issued_at: Instant,
}

impl DownloadRequestHandle {
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            issued_at: Instant::now(),
        }
    }
}

/// Terminal status of a download as reported by the download manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    Success,
    Failure,
    Unknown,
}

/// Result of a status query, consumed once by the detail screen.
#[derive(Debug, Clone)]
pub struct CompletionResult {
    pub status: DownloadStatus,
    pub description: String,
}

/// Deep-link payload embedded in a notification's activation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub request_id: RequestId,
}

impl NotificationPayload {
    pub fn new(request_id: RequestId) -> Self {
        Self { request_id }
    }

    /// Serialize for embedding in a notification action.
    pub fn to_deep_link(self) -> String {
        serde_json::to_string(&self).unwrap_or_default()
    }

    /// Parse an activation payload; `None` for absent or stale links.
    pub fn from_deep_link(link: &str) -> Option<Self> {
        serde_json::from_str(link).ok()
    }
}
