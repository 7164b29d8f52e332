//! Key bindings and the modifier state reported alongside input events
use crate::{core::actions::Action, KeySym};
use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User defined key bindings
pub type KeyBindings = HashMap<Binding, Action>;

bitflags! {
    /// The X modifier and button mask carried by input events.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModMask: u16 {
        /// Shift
        const SHIFT   = 1 << 0;
        /// Caps Lock
        const LOCK    = 1 << 1;
        /// Control
        const CONTROL = 1 << 2;
        /// Alt
        const MOD1    = 1 << 3;
        /// Num Lock
        const MOD2    = 1 << 4;
        /// Usually unused
        const MOD3    = 1 << 5;
        /// Super
        const MOD4    = 1 << 6;
        /// AltGr
        const MOD5    = 1 << 7;
    }
}

/// A keysym pressed while the trigger key is held, along with whether shift was down.
///
/// The keysym is the one the keyboard produces with that shift state so shifted bindings
/// name the shifted symbol: `Binding::shifted('E')` rather than `'e'`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    /// The keysym produced by the key press
    pub keysym: KeySym,
    /// Whether shift was held
    pub shift: bool,
}

impl Binding {
    /// A binding for a key pressed without shift.
    pub fn plain(k: impl Into<KeySym>) -> Self {
        Self {
            keysym: k.into(),
            shift: false,
        }
    }

    /// A binding for a key pressed with shift.
    pub fn shifted(k: impl Into<KeySym>) -> Self {
        Self {
            keysym: k.into(),
            shift: true,
        }
    }
}

/// Mouse buttons after modifier emulation has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// 1: pick a window
    Left,
    /// 3: pick a workspace
    Right,
    /// 4: previous hidden window
    ScrollUp,
    /// 5: next hidden window
    ScrollDown,
}

impl MouseButton {
    /// Map a raw button press to the action it should perform.
    ///
    /// Control-click is treated as the middle button and alt-click as the right button.
    /// The middle button in turn acts as the scroll wheel: up with shift, down without.
    pub fn from_press(button: u8, state: ModMask) -> Option<Self> {
        let button = if state.contains(ModMask::CONTROL) {
            2
        } else if state.contains(ModMask::MOD1) {
            3
        } else {
            button
        };

        match button {
            1 => Some(Self::Left),
            2 if state.contains(ModMask::SHIFT) => Some(Self::ScrollUp),
            2 => Some(Self::ScrollDown),
            3 => Some(Self::Right),
            4 => Some(Self::ScrollUp),
            5 => Some(Self::ScrollDown),
            _ => None,
        }
    }

    /// Whether this button scrolls rather than picks.
    pub fn is_wheel(&self) -> bool {
        matches!(self, Self::ScrollUp | Self::ScrollDown)
    }
}
