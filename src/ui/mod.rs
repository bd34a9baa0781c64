pub mod detail;
pub mod loading_button;

pub use detail::{DetailMessage, DetailScreen};
pub use loading_button::{ButtonEvent, ButtonFrame, ButtonState, LoadingButton};

use iced::{
    widget::{button, column, progress_bar, radio, text, Space},
    Element, Length,
};

use crate::application::Notification;
use crate::domain::{TargetId, DOWNLOAD_TARGETS};

/// Main screen state
pub struct MainView {
    pub selected: Option<TargetId>,
    pub status_message: String,
}

impl Default for MainView {
    fn default() -> Self {
        Self {
            selected: None,
            status_message: "Pick a resource, then press the button".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum MainMessage {
    TargetSelected(TargetId),
    DownloadPressed,
    NotificationActivated,
}

impl MainView {
    pub fn update(&mut self, message: MainMessage) {
        match message {
            MainMessage::TargetSelected(id) => {
                self.selected = Some(id);
            }
            MainMessage::DownloadPressed | MainMessage::NotificationActivated => {
                // Handled by the app
            }
        }
    }

    pub fn view(
        &self,
        frame: &ButtonFrame,
        notification: Option<&Notification>,
    ) -> Element<'_, MainMessage> {
        let mut selector = column![].spacing(6);
        for target in DOWNLOAD_TARGETS {
            selector = selector.push(radio(
                target.description,
                target.id,
                self.selected,
                MainMessage::TargetSelected,
            ));
        }

        // The trigger only accepts presses while the frame says so; clicks
        // during loading never reach the state machine.
        let mut trigger = button(text(frame.label)).padding([10, 20]);
        if frame.interactive {
            trigger = trigger.on_press(MainMessage::DownloadPressed);
        }

        let mut content = column![
            text("LoadApp").size(32),
            Space::new().height(Length::Fixed(20.0)),
            selector,
            Space::new().height(Length::Fixed(20.0)),
            trigger,
            progress_bar(0.0..=1.0, frame.fill_fraction),
            Space::new().height(Length::Fixed(10.0)),
            text(&self.status_message).size(14),
        ]
        .padding(20)
        .spacing(10);

        if let Some(notification) = notification {
            content = content
                .push(Space::new().height(Length::Fixed(20.0)))
                .push(text(notification.title).size(16))
                .push(text(notification.text).size(14))
                .push(
                    button(text(notification.action_label))
                        .on_press(MainMessage::NotificationActivated)
                        .padding([10, 20]),
                );
        }

        content.into()
    }
}
