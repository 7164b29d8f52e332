//! Two step confirmation for quitting the window manager.
use std::time::{Duration, Instant};

/// How close together two quit presses need to be for the second to confirm the first.
pub const CONFIRM_WINDOW: Duration = Duration::from_secs(5);

/// How long clients are given to close themselves once quitting has been confirmed.
pub const GRACE_PERIOD: Duration = Duration::from_secs(60);

/// The outcome of a quit key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitPress {
    /// We are already on our way out
    Ignored,
    /// The press has been noted: another press is needed to confirm
    Unconfirmed,
    /// Start shutting down
    Confirmed,
}

/// Tracks quit presses and whether we are in the process of quitting.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuitState {
    last_press: Option<Instant>,
    quitting: bool,
}

impl QuitState {
    /// Whether quitting has been confirmed.
    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Register a quit press at `now`.
    pub fn press(&mut self, now: Instant) -> QuitPress {
        if self.quitting {
            return QuitPress::Ignored;
        }

        let confirmed = matches!(
            self.last_press,
            Some(t) if now.saturating_duration_since(t) <= CONFIRM_WINDOW
        );

        if confirmed {
            self.quitting = true;
            QuitPress::Confirmed
        } else {
            self.last_press = Some(now);
            QuitPress::Unconfirmed
        }
    }
}
