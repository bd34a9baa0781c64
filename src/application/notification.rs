use tracing::info;

use crate::domain::{NotificationPayload, RequestId};

pub const NOTIFICATION_TITLE: &str = "Download finished";
pub const NOTIFICATION_TEXT: &str = "Your requested download has completed";
pub const NOTIFICATION_ACTION_LABEL: &str = "Check the status";

/// A posted notification with its deep-link action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub text: &'static str,
    pub action_label: &'static str,
    /// Serialized [`NotificationPayload`] delivered on activation.
    pub deep_link: String,
}

/// Owns the single current notification.
///
/// Posting is idempotent per request id: a new post replaces whatever is
/// outstanding, which matches the one-download-at-a-time tracking model.
#[derive(Debug, Default)]
pub struct NotificationPresenter {
    current: Option<Notification>,
}

impl NotificationPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a completion notification for the given request.
    pub fn post(&mut self, request_id: RequestId) {
        info!(request_id = request_id.0, "posting notification");
        self.current = Some(Notification {
            title: NOTIFICATION_TITLE,
            text: NOTIFICATION_TEXT,
            action_label: NOTIFICATION_ACTION_LABEL,
            deep_link: NotificationPayload::new(request_id).to_deep_link(),
        });
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Consume the current notification, returning its activation payload.
    pub fn activate(&mut self) -> Option<NotificationPayload> {
        self.current
            .take()
            .and_then(|n| NotificationPayload::from_deep_link(&n.deep_link))
    }

    /// Dismiss everything outstanding. A no-op when nothing is posted.
    pub fn cancel_all(&mut self) {
        self.current = None;
    }
}
