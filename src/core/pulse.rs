//! The border pulse animation used to acknowledge input.
use crate::{core::config::Config, Color};
use std::time::{Duration, Instant};

/// An unfocused / focused pair of border colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderColors {
    /// The colour of frames that do not hold focus
    pub unfocused: Color,
    /// The colour of the focused frame
    pub focused: Color,
}

impl BorderColors {
    /// Create a new pair of border colours from 0xRRGGBB values.
    pub const fn new(unfocused: u32, focused: u32) -> Self {
        Self {
            unfocused: Color::new_from_hex(unfocused),
            focused: Color::new_from_hex(focused),
        }
    }

    /// Interpolate each colour of the pair towards `other`.
    pub fn blend(&self, other: BorderColors, t: f64) -> BorderColors {
        BorderColors {
            unfocused: self.unfocused.blend(other.unfocused, t),
            focused: self.focused.blend(other.focused, t),
        }
    }
}

/// The state of the pulse animation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pulse {
    started: Option<Instant>,
}

impl Pulse {
    /// (Re)start the animation from its first frame.
    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Stop the animation, returning borders to their base colours.
    pub fn stop(&mut self) {
        self.started = None;
    }

    /// Whether there are still frames of the animation to draw.
    pub fn is_active(&self) -> bool {
        self.started.is_some()
    }

    /// How far through the animation we are at `now`, from 0.0 to 1.0.
    ///
    /// `None` when the animation is not running.
    pub fn progress(&self, now: Instant, total: Duration) -> Option<f64> {
        let started = self.started?;
        if total.is_zero() {
            return Some(1.0);
        }
        let elapsed = now.saturating_duration_since(started).as_secs_f64();

        Some((elapsed / total.as_secs_f64()).min(1.0))
    }

    /// Whether the animation has reached its final frame at `now`.
    pub fn is_finished(&self, now: Instant, total: Duration) -> bool {
        matches!(self.progress(now, total), Some(p) if p >= 1.0)
    }
}

/// The border colours to draw with at `now`.
///
/// Quitting overrides everything else. While pulsing the colours fade from the pulse
/// colours back to the base colours.
pub fn border_colors(config: &Config, pulse: &Pulse, quitting: bool, now: Instant) -> BorderColors {
    if quitting {
        return config.quit_colors;
    }

    match pulse.progress(now, config.pulse_total) {
        Some(t) => config.pulse_colors.blend(config.base_colors, t),
        None => config.base_colors,
    }
}
