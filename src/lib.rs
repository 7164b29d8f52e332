//! trellis: a keyboard driven tiling window manager for X11.
//!
//! Every screen is divided into a tree of non-overlapping frames. Frames hold at
//! most one window each and windows that do not currently have a frame are
//! parked off screen until they are asked for. The pure state of the window
//! manager lives in [pure] and is manipulated by the handlers in [core], which
//! talk to the X server exclusively through the [x::XConn] trait.
//!
//! A concrete [XConn][x::XConn] implementation backed by [x11rb][::x11rb] is
//! available behind the `x11rb` feature (enabled by default).
#![warn(
    clippy::complexity,
    clippy::correctness,
    clippy::style,
    future_incompatible,
    missing_debug_implementations,
    rust_2018_idioms
)]
#![deny(clippy::all)]
#![allow(clippy::too_many_arguments)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod core;
pub mod keysyms;
pub mod pure;
pub mod util;
pub mod x;

#[cfg(feature = "x11rb")]
pub mod x11rb;

#[doc(inline)]
pub use crate::core::{config::Config, State, WindowManager};
#[doc(inline)]
pub use keysyms::KeySym;
#[doc(inline)]
pub use pure::{geometry::Rect, Installation};

/// An X11 ID for a given resource
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Xid(pub u32);

impl fmt::Display for Xid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Xid {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A 24-bit RGB colour as used for frame borders and list text.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Color(u32);

impl Color {
    /// Create a new Color from a 0xRRGGBB hex value.
    pub const fn new_from_hex(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    /// The 0xRRGGBB value of this colour.
    pub fn rgb_u32(&self) -> u32 {
        self.0
    }

    /// Linearly interpolate between two colours per channel.
    ///
    /// `t = 0.0` gives `self` and `t = 1.0` gives `other`.
    pub fn blend(&self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let chan = |c: u32, shift: u32| ((c >> shift) & 0xff) as f64;
        let mix = |shift: u32| {
            let (a, b) = (chan(self.0, shift), chan(other.0, shift));
            ((a + (b - a) * t).round() as u32) << shift
        };

        Color(mix(16) | mix(8) | mix(0))
    }
}

impl From<u32> for Color {
    fn from(rgb: u32) -> Self {
        Self::new_from_hex(rgb)
    }
}

/// Error variants from the core trellis library.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Another window manager already holds substructure redirect on the root window
    #[error("unable to become the window manager: is another window manager running?")]
    AnotherWmRunning,

    /// The key used to trigger window manager actions is not present on this keyboard
    #[error("the window manager trigger key {0} is not present on the keyboard")]
    MissingTriggerKey(String),

    /// The X server did not report any screens that we can manage
    #[error("no screens were reported by the X server")]
    NoScreens,

    /// The keyboard mapping reported by the X server is unusable
    #[error("too few keysyms per keycode: {0}")]
    TooFewKeysyms(u8),

    /// An attempt was made to work with a client that is not being managed
    #[error("{0} is not a known client")]
    UnknownClient(Xid),

    /// A generic error type for use in user code when needing to construct
    /// a simple [Error].
    #[error("Unhandled error: {0}")]
    Custom(String),

    /// An IO error was encountered
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Parsing an [Atom][crate::x::Atom] from a str failed.
    #[error(transparent)]
    Strum(#[from] strum::ParseError),

    /// Something went wrong using the [x11rb] module.
    #[cfg(feature = "x11rb")]
    #[error(transparent)]
    X11rb(#[from] crate::x11rb::X11rbError),
}

/// A Result where the error type is a trellis [Error]
pub type Result<T> = std::result::Result<T, Error>;
