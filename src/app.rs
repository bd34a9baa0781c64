use futures::{Stream, StreamExt};
use iced::{Element, Task};
use tokio::sync::broadcast;
use tracing::info;

use crate::application::{BridgeOutcome, CompletionEventBridge, NotificationPresenter};
use crate::domain::{
    AppError, DownloadRequestHandle, DownloadStatus, DownloadTarget, NotificationPayload, RequestId,
};
use crate::service::{DownloadManager, DownloadRequest};
use crate::ui::{
    loading_button, ButtonEvent, DetailMessage, DetailScreen, LoadingButton, MainMessage, MainView,
};

pub struct LoadApp {
    view: MainView,
    button: LoadingButton,
    manager: DownloadManager,
    bridge: CompletionEventBridge,
    notifications: NotificationPresenter,
    // The single outstanding request; stale once its completion is consumed
    handle: Option<DownloadRequestHandle>,
    screen: Screen,
    subscribed: bool,
    // Bumped on every click; ticks from earlier driver runs are stale
    animation_cycle: u64,
}

enum Screen {
    Main,
    Detail(DetailScreen),
}

impl Default for LoadApp {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadApp {
    pub fn new() -> Self {
        Self {
            view: MainView::default(),
            button: LoadingButton::new(),
            manager: DownloadManager::new(),
            bridge: CompletionEventBridge::new(),
            notifications: NotificationPresenter::new(),
            handle: None,
            screen: Screen::Main,
            subscribed: false,
            animation_cycle: 0,
        }
    }

    fn trigger_download(&mut self) -> Task<Message> {
        if !self.button.is_interactive() {
            return Task::none();
        }

        let Some(target_id) = self.view.selected else {
            self.view.status_message = AppError::NoSelection.to_string();
            return Task::none();
        };
        let target = DownloadTarget::get(target_id);
        let request = request_for(&target);

        self.button.handle(ButtonEvent::Click);
        self.view.status_message = format!("Requesting {}", target.title);
        self.animation_cycle += 1;
        let cycle = self.animation_cycle;

        let mut tasks = Vec::new();

        // The receiver must exist before the transfer is spawned, or a
        // fast-failing download broadcasts to nobody and the event is lost.
        if !self.subscribed {
            self.subscribed = true;
            tasks.push(Task::stream(completion_events(self.manager.subscribe())));
        }

        let manager = self.manager.clone();
        tasks.push(
            // enqueue runs on the background executor; the result comes back
            // as a message
            Task::perform(
                async move {
                    manager
                        .enqueue(request)
                        .map_err(|e| AppError::Service(e.to_string()))
                },
                Message::Enqueued,
            ),
        );
        tasks.push(Task::stream(
            loading_button::animation_ticks().map(move |progress| Message::AnimationTick(cycle, progress)),
        ));

        Task::batch(tasks)
    }

    fn enter_detail(&mut self, payload: Option<NotificationPayload>) {
        self.notifications.cancel_all();
        self.screen = Screen::Detail(DetailScreen::enter(payload, &self.manager));
    }
}

fn request_for(target: &DownloadTarget) -> DownloadRequest {
    DownloadRequest::new(target.url, target.title, target.description)
        .allow_metered(true)
        .allow_roaming(true)
        .require_charging(false)
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(MainMessage),
    /// Result of handing the request to the download manager
    Enqueued(Result<RequestId, AppError>),
    /// Animation driver progress (0.0 to 1.0), tagged with the driver cycle
    /// it belongs to
    AnimationTick(u64, f32),
    /// A download-completion broadcast arrived
    CompletionEvent(RequestId),
    DetailMessage(DetailMessage),
}

/// Adapt the manager's completion broadcast into a message stream. The
/// stream ends when the receiver is closed, which unsubscribes it.
fn completion_events(rx: broadcast::Receiver<RequestId>) -> impl Stream<Item = Message> + Send {
    futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(id) => return Some((Message::CompletionEvent(id), rx)),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
}

pub fn update(app: &mut LoadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                MainMessage::DownloadPressed => return app.trigger_download(),
                MainMessage::NotificationActivated => {
                    let payload = app.notifications.activate();
                    app.enter_detail(payload);
                }
                MainMessage::TargetSelected(_) => {}
            }
        }
        Message::Enqueued(Ok(id)) => {
            info!(request_id = id.0, "request accepted by download manager");
            app.handle = Some(DownloadRequestHandle::new(id));
            app.bridge.track(id);
            app.view.status_message = format!("Download #{} in progress", id);

            // The transfer may already be terminal if it finished before
            // this message was processed; settle it from the record. The
            // buffered broadcast for the same id then lands as a duplicate
            // and is dropped by the bridge.
            let settled = app
                .manager
                .query_by_id(id)
                .is_some_and(|row| row.status != DownloadStatus::Unknown);
            if settled {
                return update(app, Message::CompletionEvent(id));
            }
        }
        Message::Enqueued(Err(e)) => {
            app.view.status_message = e.to_string();
            app.button.handle(ButtonEvent::Finished);
        }
        Message::AnimationTick(cycle, progress) => {
            // Ticks from a superseded driver run must not touch the control
            if cycle == app.animation_cycle {
                app.button.handle(ButtonEvent::Tick(progress));
            }
        }
        Message::CompletionEvent(id) => {
            if app.bridge.on_event(id) == BridgeOutcome::Matched {
                app.handle = None;
                app.button.handle(ButtonEvent::Finished);
                app.notifications.post(id);
                app.view.status_message = format!("Download #{} finished", id);
            }
        }
        Message::DetailMessage(DetailMessage::BackPressed) => {
            // Main screen state survives the round trip, so a still-tracked
            // download keeps matching future completion events.
            app.screen = Screen::Main;
        }
    }
    Task::none()
}

pub fn view(app: &LoadApp) -> Element<'_, Message> {
    match &app.screen {
        Screen::Main => app
            .view
            .view(&app.button.render(), app.notifications.current())
            .map(Message::UiMessage),
        Screen::Detail(detail) => detail.view().map(Message::DetailMessage),
    }
}
