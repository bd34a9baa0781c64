pub mod completion_bridge;
pub mod notification;

pub use completion_bridge::{BridgeOutcome, CompletionEventBridge};
pub use notification::{Notification, NotificationPresenter};
