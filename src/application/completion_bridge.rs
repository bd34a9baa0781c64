use tracing::{debug, info};

use crate::domain::RequestId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeOutcome {
    /// The event matched the tracked request; the tracked id is now cleared.
    Matched,
    /// Unrelated, duplicate, or late event; dropped without state change.
    Ignored,
}

/// Correlates download-completion events against the single outstanding
/// request id.
///
/// The bridge itself is just the matching state; the subscription to the
/// manager's broadcast channel is owned by the screen driving it, so the
/// receiver's lifetime scopes the listening.
#[derive(Debug, Default)]
pub struct CompletionEventBridge {
    tracked: Option<RequestId>,
}

impl CompletionEventBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a freshly enqueued request.
    pub fn track(&mut self, id: RequestId) {
        self.tracked = Some(id);
    }

    /// Restore the tracked id after the owning screen was torn down and
    /// recreated mid-download. Without this, completion events for that id
    /// are permanently dropped.
    pub fn restore(&mut self, id: RequestId) {
        self.track(id);
    }

    pub fn tracked(&self) -> Option<RequestId> {
        self.tracked
    }

    /// Feed one completion event through the bridge.
    pub fn on_event(&mut self, id: RequestId) -> BridgeOutcome {
        match self.tracked {
            Some(tracked) if tracked == id => {
                self.tracked = None;
                info!(request_id = id.0, "completion event matched");
                BridgeOutcome::Matched
            }
            _ => {
                debug!(request_id = id.0, "completion event ignored");
                BridgeOutcome::Ignored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_event_is_ignored() {
        let mut bridge = CompletionEventBridge::new();
        bridge.track(RequestId(1));

        assert_eq!(bridge.on_event(RequestId(2)), BridgeOutcome::Ignored);
        assert_eq!(bridge.tracked(), Some(RequestId(1)));
    }

    #[test]
    fn test_event_without_tracking_is_ignored() {
        let mut bridge = CompletionEventBridge::new();
        assert_eq!(bridge.on_event(RequestId(1)), BridgeOutcome::Ignored);
    }

    #[test]
    fn test_matched_event_clears_tracked_id() {
        let mut bridge = CompletionEventBridge::new();
        bridge.track(RequestId(7));

        assert_eq!(bridge.on_event(RequestId(7)), BridgeOutcome::Matched);
        assert_eq!(bridge.tracked(), None);
    }

    #[test]
    fn test_duplicate_event_is_a_no_op() {
        let mut bridge = CompletionEventBridge::new();
        bridge.track(RequestId(7));

        assert_eq!(bridge.on_event(RequestId(7)), BridgeOutcome::Matched);
        assert_eq!(bridge.on_event(RequestId(7)), BridgeOutcome::Ignored);
    }

    #[test]
    fn test_restore_allows_matching_after_recreation() {
        let mut bridge = CompletionEventBridge::new();
        bridge.restore(RequestId(3));

        assert_eq!(bridge.on_event(RequestId(3)), BridgeOutcome::Matched);
    }
}
