//! X keysyms used by the default key bindings.
//!
//! Printable Latin-1 characters map directly onto their keysym value so a [KeySym] can
//! be built from a `char`. Everything else is named in [XKeySym].
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::*;

/// A raw X keysym value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeySym(pub u32);

impl KeySym {
    /// The keysym X reports for an unmapped keycode slot.
    pub const NONE: KeySym = KeySym(0);

    /// Whether this is the empty keysym.
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Look up a keysym by its X name (e.g. "Return") or as a single printable character.
    pub fn from_name(s: &str) -> crate::Result<KeySym> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(KeySym::from(c));
        }

        Ok(XKeySym::from_str(s)?.into())
    }
}

impl From<char> for KeySym {
    fn from(c: char) -> Self {
        KeySym(c as u32)
    }
}

impl From<XKeySym> for KeySym {
    fn from(k: XKeySym) -> Self {
        KeySym(k.code())
    }
}

impl fmt::Display for KeySym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(named) = XKeySym::iter().find(|k| k.code() == self.0) {
            return write!(f, "{}", named.as_ref());
        }

        match char::from_u32(self.0) {
            Some(c) if (0x20..0x7f).contains(&self.0) => write!(f, "{c}"),
            _ => write!(f, "{:#x}", self.0),
        }
    }
}

/// Named, non printable keysyms from X11/keysymdef.h and XF86keysym.h
#[allow(non_camel_case_types)]
#[derive(AsRefStr, EnumString, EnumIter, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum XKeySym {
    /// XK_BackSpace
    #[strum(serialize = "BackSpace")]
    XK_BackSpace,
    /// XK_Tab
    #[strum(serialize = "Tab")]
    XK_Tab,
    /// XK_Return
    #[strum(serialize = "Return")]
    XK_Return,
    /// XK_Escape
    #[strum(serialize = "Escape")]
    XK_Escape,
    /// XK_Delete
    #[strum(serialize = "Delete")]
    XK_Delete,
    /// XK_Home
    #[strum(serialize = "Home")]
    XK_Home,
    /// XK_Left
    #[strum(serialize = "Left")]
    XK_Left,
    /// XK_Up
    #[strum(serialize = "Up")]
    XK_Up,
    /// XK_Right
    #[strum(serialize = "Right")]
    XK_Right,
    /// XK_Down
    #[strum(serialize = "Down")]
    XK_Down,
    /// XK_Page_Up
    #[strum(to_string = "Page_Up", serialize = "Prior")]
    XK_Page_Up,
    /// XK_Page_Down
    #[strum(to_string = "Page_Down", serialize = "Next")]
    XK_Page_Down,
    /// XK_End
    #[strum(serialize = "End")]
    XK_End,
    /// XK_ISO_Left_Tab
    #[strum(serialize = "ISO_Left_Tab")]
    XK_ISO_Left_Tab,
    /// XK_F1
    #[strum(serialize = "F1")]
    XK_F1,
    /// XK_F2
    #[strum(serialize = "F2")]
    XK_F2,
    /// XK_F3
    #[strum(serialize = "F3")]
    XK_F3,
    /// XK_F4
    #[strum(serialize = "F4")]
    XK_F4,
    /// XK_F5
    #[strum(serialize = "F5")]
    XK_F5,
    /// XK_F6
    #[strum(serialize = "F6")]
    XK_F6,
    /// XK_F7
    #[strum(serialize = "F7")]
    XK_F7,
    /// XK_F8
    #[strum(serialize = "F8")]
    XK_F8,
    /// XK_F9
    #[strum(serialize = "F9")]
    XK_F9,
    /// XK_F10
    #[strum(serialize = "F10")]
    XK_F10,
    /// XK_F11
    #[strum(serialize = "F11")]
    XK_F11,
    /// XK_F12
    #[strum(serialize = "F12")]
    XK_F12,
    /// XK_Shift_L
    #[strum(serialize = "Shift_L")]
    XK_Shift_L,
    /// XK_Caps_Lock
    #[strum(serialize = "Caps_Lock")]
    XK_Caps_Lock,
    /// XK_Super_L
    #[strum(serialize = "Super_L")]
    XK_Super_L,
    /// XF86XK_AudioLowerVolume
    #[strum(serialize = "XF86AudioLowerVolume")]
    XF86XK_AudioLowerVolume,
    /// XF86XK_AudioMute
    #[strum(serialize = "XF86AudioMute")]
    XF86XK_AudioMute,
    /// XF86XK_AudioRaiseVolume
    #[strum(serialize = "XF86AudioRaiseVolume")]
    XF86XK_AudioRaiseVolume,
}

impl XKeySym {
    /// The raw keysym value.
    pub fn code(&self) -> u32 {
        match self {
            XKeySym::XK_BackSpace => 0xff08,
            XKeySym::XK_Tab => 0xff09,
            XKeySym::XK_Return => 0xff0d,
            XKeySym::XK_Escape => 0xff1b,
            XKeySym::XK_Delete => 0xffff,
            XKeySym::XK_Home => 0xff50,
            XKeySym::XK_Left => 0xff51,
            XKeySym::XK_Up => 0xff52,
            XKeySym::XK_Right => 0xff53,
            XKeySym::XK_Down => 0xff54,
            XKeySym::XK_Page_Up => 0xff55,
            XKeySym::XK_Page_Down => 0xff56,
            XKeySym::XK_End => 0xff57,
            XKeySym::XK_ISO_Left_Tab => 0xfe20,
            XKeySym::XK_F1 => 0xffbe,
            XKeySym::XK_F2 => 0xffbf,
            XKeySym::XK_F3 => 0xffc0,
            XKeySym::XK_F4 => 0xffc1,
            XKeySym::XK_F5 => 0xffc2,
            XKeySym::XK_F6 => 0xffc3,
            XKeySym::XK_F7 => 0xffc4,
            XKeySym::XK_F8 => 0xffc5,
            XKeySym::XK_F9 => 0xffc6,
            XKeySym::XK_F10 => 0xffc7,
            XKeySym::XK_F11 => 0xffc8,
            XKeySym::XK_F12 => 0xffc9,
            XKeySym::XK_Shift_L => 0xffe1,
            XKeySym::XK_Caps_Lock => 0xffe5,
            XKeySym::XK_Super_L => 0xffeb,
            XKeySym::XF86XK_AudioLowerVolume => 0x1008ff11,
            XKeySym::XF86XK_AudioMute => 0x1008ff12,
            XKeySym::XF86XK_AudioRaiseVolume => 0x1008ff13,
        }
    }

    /// The function key F`n` for `n` in 1..=12.
    pub fn function_key(n: usize) -> Option<XKeySym> {
        XKeySym::iter()
            .filter(|k| (0xffbe..=0xffc9).contains(&k.code()))
            .nth(n.checked_sub(1)?)
    }
}
