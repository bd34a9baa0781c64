use std::time::Duration;

use futures::Stream;

pub const LABEL_IDLE: &str = "Download";
pub const LABEL_LOADING: &str = "We are loading";

/// One full animation cycle. A fixed constant, independent of the actual
/// transfer time: the animation is a best-effort indicator, not a true
/// progress bar.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(2000);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Visual/interactive state of the trigger control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    Loading,
    Completed,
}

impl ButtonState {
    pub fn is_interactive(self) -> bool {
        !matches!(self, ButtonState::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonEvent {
    /// User clicked the control.
    Click,
    /// The animation driver advanced to the given progress.
    Tick(f32),
    /// A matched completion event ended the download early.
    Finished,
}

/// Pure transition function; invalid combinations leave the state unchanged.
pub fn transition(state: ButtonState, event: ButtonEvent) -> ButtonState {
    match (state, event) {
        (ButtonState::Idle | ButtonState::Completed, ButtonEvent::Click) => ButtonState::Loading,
        (ButtonState::Loading, ButtonEvent::Tick(progress)) if progress >= 1.0 => {
            ButtonState::Completed
        }
        (ButtonState::Loading, ButtonEvent::Finished) => ButtonState::Completed,
        (state, _) => state,
    }
}

/// What the render step needs to draw one frame of the control.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonFrame {
    pub label: &'static str,
    /// Fraction of the control width filled with the highlight color.
    pub fill_fraction: f32,
    /// Sweep of the circular indicator anchored to the right edge.
    pub arc_sweep_degrees: f32,
    pub interactive: bool,
}

/// Pure render function for a state/progress pair.
pub fn frame(state: ButtonState, progress: f32) -> ButtonFrame {
    match state {
        ButtonState::Idle | ButtonState::Completed => ButtonFrame {
            label: LABEL_IDLE,
            fill_fraction: 0.0,
            arc_sweep_degrees: 0.0,
            interactive: true,
        },
        ButtonState::Loading => ButtonFrame {
            label: LABEL_LOADING,
            fill_fraction: progress,
            arc_sweep_degrees: progress * 360.0,
            interactive: false,
        },
    }
}

/// The loading button: state plus animation progress, mutated only through
/// [`handle`](LoadingButton::handle).
#[derive(Debug)]
pub struct LoadingButton {
    state: ButtonState,
    progress: f32,
}

impl Default for LoadingButton {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingButton {
    pub fn new() -> Self {
        Self {
            state: ButtonState::Idle,
            progress: 0.0,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_interactive(&self) -> bool {
        self.state.is_interactive()
    }

    /// Apply one event. Returns `true` when the frame changed and a redraw
    /// is due.
    pub fn handle(&mut self, event: ButtonEvent) -> bool {
        let next = transition(self.state, event);

        let progress_changed = match event {
            // Progress only advances while loading; it stays frozen at its
            // last value on leaving the state.
            ButtonEvent::Tick(progress) if self.state == ButtonState::Loading => {
                self.progress = progress.clamp(0.0, 1.0);
                true
            }
            _ => false,
        };

        if next != self.state {
            if next == ButtonState::Loading {
                self.progress = 0.0;
            }
            self.state = next;
            return true;
        }
        progress_changed
    }

    pub fn render(&self) -> ButtonFrame {
        frame(self.state, self.progress)
    }
}

/// Time-driven animation stream, scheduled through the UI loop rather than
/// blocking anywhere. Emits monotonically increasing progress from 0.0 to
/// exactly 1.0 over [`ANIMATION_DURATION`], then ends.
pub fn animation_ticks() -> impl Stream<Item = f32> + Send {
    let total_frames = (ANIMATION_DURATION.as_millis() / FRAME_INTERVAL.as_millis()) as u32;

    futures::stream::unfold(0u32, move |frame_index| async move {
        if frame_index > total_frames {
            return None;
        }
        tokio::time::sleep(FRAME_INTERVAL).await;
        let progress = frame_index as f32 / total_frames as f32;
        Some((progress, frame_index + 1))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_from_interactive_states_starts_loading() {
        assert_eq!(
            transition(ButtonState::Idle, ButtonEvent::Click),
            ButtonState::Loading
        );
        assert_eq!(
            transition(ButtonState::Completed, ButtonEvent::Click),
            ButtonState::Loading
        );
    }

    #[test]
    fn test_click_resets_progress() {
        let mut button = LoadingButton::new();
        button.handle(ButtonEvent::Click);
        button.handle(ButtonEvent::Tick(0.5));
        button.handle(ButtonEvent::Finished);

        button.handle(ButtonEvent::Click);
        assert_eq!(button.state(), ButtonState::Loading);
        assert_eq!(button.progress(), 0.0);
    }

    #[test]
    fn test_click_while_loading_is_a_no_op() {
        let mut button = LoadingButton::new();
        button.handle(ButtonEvent::Click);
        button.handle(ButtonEvent::Tick(0.3));

        assert!(!button.handle(ButtonEvent::Click));
        assert_eq!(button.state(), ButtonState::Loading);
        assert_eq!(button.progress(), 0.3);
    }

    #[test]
    fn test_monotone_ticks_complete_exactly_at_one() {
        let mut button = LoadingButton::new();
        button.handle(ButtonEvent::Click);

        let mut completions = 0;
        for step in 0..=10 {
            button.handle(ButtonEvent::Tick(step as f32 / 10.0));
            if step < 10 {
                assert_eq!(button.state(), ButtonState::Loading);
            }
            if button.state() == ButtonState::Completed {
                completions += 1;
            }
        }
        assert_eq!(button.state(), ButtonState::Completed);
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_finished_ends_loading() {
        let mut button = LoadingButton::new();
        button.handle(ButtonEvent::Click);
        button.handle(ButtonEvent::Tick(0.4));
        button.handle(ButtonEvent::Finished);

        assert_eq!(button.state(), ButtonState::Completed);
        // Frozen at its last value, not reset.
        assert_eq!(button.progress(), 0.4);
    }

    #[test]
    fn test_ticks_outside_loading_do_not_mutate_progress() {
        let mut button = LoadingButton::new();
        assert!(!button.handle(ButtonEvent::Tick(0.8)));
        assert_eq!(button.progress(), 0.0);
        assert_eq!(button.state(), ButtonState::Idle);

        // Leftover ticks from a finished driver are absorbed silently.
        button.handle(ButtonEvent::Click);
        button.handle(ButtonEvent::Finished);
        assert!(!button.handle(ButtonEvent::Tick(0.9)));
        assert_eq!(button.progress(), 0.0);
    }

    #[test]
    fn test_render_contract() {
        let idle = frame(ButtonState::Idle, 0.0);
        assert_eq!(idle.label, LABEL_IDLE);
        assert!(idle.interactive);
        assert_eq!(idle.fill_fraction, 0.0);

        let loading = frame(ButtonState::Loading, 0.25);
        assert_eq!(loading.label, LABEL_LOADING);
        assert!(!loading.interactive);
        assert_eq!(loading.fill_fraction, 0.25);
        assert_eq!(loading.arc_sweep_degrees, 90.0);

        let completed = frame(ButtonState::Completed, 0.7);
        assert_eq!(completed.label, LABEL_IDLE);
        assert!(completed.interactive);
    }

    #[tokio::test]
    async fn test_animation_ticks_are_monotone_and_end_at_one() {
        use futures::StreamExt;

        let ticks: Vec<f32> = animation_ticks().collect().await;
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&1.0));
        assert!(ticks.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
