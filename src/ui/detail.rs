use iced::{
    widget::{button, column, text, Space},
    Element, Length,
};

use crate::domain::{CompletionResult, DownloadStatus, NotificationPayload};
use crate::service::DownloadManager;

pub const STATUS_SUCCESS: &str = "Success";
pub const STATUS_FAILED: &str = "Failed";

#[derive(Debug, Clone)]
pub enum DetailMessage {
    BackPressed,
}

/// Static result screen reached through the notification deep link.
///
/// All querying happens on entry; afterwards the screen only renders.
#[derive(Debug)]
pub struct DetailScreen {
    result: Option<CompletionResult>,
}

impl DetailScreen {
    /// Resolve the final download state for the given activation payload.
    ///
    /// A missing payload renders as undetermined, and a query miss degrades
    /// to the failure rendering; neither is surfaced as an error.
    pub fn enter(payload: Option<NotificationPayload>, manager: &DownloadManager) -> Self {
        let result = payload.map(|payload| {
            match manager.query_by_id(payload.request_id) {
                Some(row) => CompletionResult {
                    status: row.status,
                    description: row.description,
                },
                None => CompletionResult {
                    status: DownloadStatus::Unknown,
                    description: String::new(),
                },
            }
        });

        Self { result }
    }

    pub fn status_text(&self) -> &'static str {
        match &self.result {
            Some(result) if result.status == DownloadStatus::Success => STATUS_SUCCESS,
            Some(_) => STATUS_FAILED,
            None => "",
        }
    }

    pub fn description(&self) -> &str {
        self.result
            .as_ref()
            .map(|result| result.description.as_str())
            .unwrap_or("")
    }

    pub fn view(&self) -> Element<'_, DetailMessage> {
        column![
            text("Download status").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text(self.description()).size(16),
            text(self.status_text()).size(16),
            Space::new().height(Length::Fixed(20.0)),
            button("Back").on_press(DetailMessage::BackPressed).padding([10, 20]),
        ]
        .padding(20)
        .spacing(10)
        .into()
    }
}
